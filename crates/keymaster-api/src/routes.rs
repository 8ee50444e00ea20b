//! API route definitions

use crate::{handlers, state::AppState};
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Build scope suggestion routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai/scopes", post(handlers::suggest_scopes))
        .route("/api/scopes", get(handlers::list_scopes))
        .route("/api", get(api_info))
        .route("/", get(root_endpoint))
}

/// Build health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(api_routes())
        .merge(health_routes())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}

/// Root endpoint for basic connectivity
async fn root_endpoint() -> Json<Value> {
    Json(json!({
        "service": "keymaster API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}

/// API info endpoint
async fn api_info() -> Json<Value> {
    Json(json!({
        "api": "keymaster API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "suggest_scopes": "POST /api/ai/scopes",
            "scopes": "GET /api/scopes",
            "health": "GET /health",
            "ready": "GET /ready"
        }
    }))
}
