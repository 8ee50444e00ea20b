//! Scope suggestion endpoints

use crate::extractors::ScopeRequestJson;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use keymaster_core::Scope;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Response header naming the path that produced a suggestion
pub static SUGGESTION_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-suggestion-source");

/// Scope vocabulary response
#[derive(Debug, Clone, Serialize)]
pub struct ScopeListResponse {
    /// All scopes in canonical order
    pub scopes: Vec<Scope>,
}

/// Suggest scopes for a free-text description
///
/// Always answers `200` once the description is valid; model failures fall
/// back to keyword inference.
///
/// # Example Request
///
/// ```json
/// { "description": "Sync orders from the storefront and update inventory" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "suggestedScopes": ["read", "write"],
///   "reasoning": "Syncing requires reading orders and updating stock levels."
/// }
/// ```
#[instrument(skip_all, fields(description_len = request.description.len()))]
pub async fn suggest_scopes(
    State(state): State<Arc<AppState>>,
    request: ScopeRequestJson,
) -> Response {
    let outcome = state.suggester.suggest_request(&request).await;

    info!(
        source = %outcome.source,
        scopes = ?outcome.suggestion.suggested_scopes,
        "Scope suggestion served"
    );

    (
        [(
            SUGGESTION_SOURCE_HEADER.clone(),
            HeaderValue::from_static(outcome.source.as_str()),
        )],
        Json(outcome.suggestion),
    )
        .into_response()
}

/// List the scope vocabulary
pub async fn list_scopes() -> Json<ScopeListResponse> {
    Json(ScopeListResponse {
        scopes: Scope::ALL.to_vec(),
    })
}
