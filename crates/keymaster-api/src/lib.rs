//! keymaster API server library
//!
//! HTTP surface for scope suggestions: `POST /api/ai/scopes` takes a free-text
//! description and answers with suggested scopes and reasoning.

#![forbid(unsafe_code)]

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::{Router, extract::DefaultBodyLimit};
use keymaster_core::Config;
use keymaster_core::context_error::Result;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

/// Build the API router with all routes and middleware
///
/// # Errors
///
/// Returns an error if the configured suggestion backend cannot be built.
pub fn build_router(config: Config) -> Result<Router> {
    let state = AppState::new(config)?;

    info!(
        provider = %state.provider_name(),
        model_configured = state.suggester.has_generator(),
        timeout = ?state.suggester.timeout(),
        "Scope suggester ready"
    );

    Ok(build_router_with_state(state))
}

/// Build the API router around prepared state
///
/// Used directly by tests that inject a scripted suggester.
pub fn build_router_with_state(state: AppState) -> Router {
    let max_body_bytes = state.config.api.max_body_bytes;
    let cors = middleware::cors_layer(&state.config.api);

    let mut app = routes::build_router()
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes));

    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    app.layer(axum::middleware::from_fn(
        middleware::request_logging_middleware,
    ))
    .layer(TraceLayer::new_for_http())
}
