//! Service endpoints: health check and welcome message

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use super::envelope::ApiResponse;
use crate::AppState;

/// Health check response
///
/// Returned bare (not enveloped) so monitoring can check every service the
/// same way.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "rlp-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /
pub async fn root() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::data(json!({
        "message": "Welcome to the FF14 Recipe Level Predictor API",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Build service routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
