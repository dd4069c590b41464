//! rlp-api library - recipe CRUD service
//!
//! Routes, request plumbing and the store adapter for the recipe database.
//! The binary in `main.rs` only resolves configuration and serves
//! [`build_router`].

use axum::Router;
use sqlx::AnyPool;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: AnyPool,
}

impl AppState {
    pub fn new(db: AnyPool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let recipes = Router::new()
        .route("/recipes", get(api::list_recipes).post(api::create_recipe))
        .route("/recipes/", get(api::list_recipes).post(api::create_recipe))
        .route("/recipes/search", get(api::search_recipes))
        .route(
            "/recipes/:id",
            get(api::get_recipe)
                .put(api::update_recipe)
                .delete(api::delete_recipe),
        );

    let routes = Router::new()
        .merge(recipes)
        .merge(api::health_routes())
        .fallback(api::not_found)
        .with_state(state);
    apply_layers(routes)
}

/// Wrap routes in the service middleware stack
///
/// Layer order, outermost first: CORS, request context (logging and
/// `x-request-id`), panic catcher, routes.
pub fn apply_layers(routes: Router) -> Router {
    use axum::middleware;
    use tower_http::catch_panic::CatchPanicLayer;
    use tower_http::cors::CorsLayer;

    routes
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(middleware::from_fn(api::request_context_middleware))
        .layer(CorsLayer::permissive())
}
