//! HTTP API handlers and plumbing

use axum::http::Uri;

use crate::error::ApiError;

pub mod context;
pub mod envelope;
pub mod extract;
pub mod health;
pub mod recipes;

pub use context::{request_context_middleware, RequestContext};
pub use envelope::ApiResponse;
pub use health::health_routes;
pub use recipes::{
    create_recipe, delete_recipe, get_recipe, list_recipes, search_recipes, update_recipe,
};

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
