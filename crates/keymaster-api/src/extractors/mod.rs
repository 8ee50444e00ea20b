//! Custom extractors and the API error type they reject with

pub mod scope_request;

pub use scope_request::ScopeRequestJson;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Error type returned by extractors and handlers
#[derive(Debug)]
pub struct ApiError {
    /// Error message
    pub message: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Error code for API responses
    pub code: String,
    /// Additional context
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(message: impl Into<String>, status: StatusCode, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            code: code.into(),
            details: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, "INVALID_INPUT")
    }

    /// Create an internal server error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<keymaster_core::Error> for ApiError {
    fn from(err: keymaster_core::Error) -> Self {
        match err {
            keymaster_core::Error::Validation { field, message } => {
                Self::invalid_input(message).with_details(serde_json::json!({ "field": field }))
            }
            other => Self::internal_error(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = ApiErrorResponse {
            error: self.message,
            code: self.code,
            details: self.details,
        };

        (self.status, Json(response)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let err = ApiError::from(keymaster_core::Error::validation(
            "description",
            "Description is required",
        ));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_INPUT");
        assert_eq!(err.to_string(), "INVALID_INPUT: Description is required");
        assert_eq!(err.details, Some(serde_json::json!({"field": "description"})));
    }

    #[test]
    fn test_other_core_errors_map_to_500() {
        let err = ApiError::from(keymaster_core::Error::UnknownScope {
            scope: "superuser".to_string(),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let response = ApiError::invalid_input("Description is required")
            .with_details(serde_json::json!({"field": "description"}))
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"], "Description is required");
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"]["field"], "description");
    }
}
