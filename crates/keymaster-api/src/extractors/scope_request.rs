//! Scope request extractor
//!
//! Reads the body as arbitrary JSON first so that a missing or mistyped
//! `description` produces the same 400 as a blank one, instead of axum's
//! generic `Json` rejection.

use crate::extractors::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use keymaster_core::ScopeRequest;
use serde_json::json;

/// Validated scope request taken from a JSON body
#[derive(Debug)]
pub struct ScopeRequestJson(pub ScopeRequest);

#[async_trait]
impl<S> FromRequest<S> for ScopeRequestJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            ApiError::new(rejection.body_text(), rejection.status(), "INVALID_BODY")
        })?;

        let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|err| {
            ApiError::invalid_input("Request body must be valid JSON")
                .with_details(json!({ "json_error": err.to_string() }))
        })?;

        let request = ScopeRequest::from_value(payload).map_err(ApiError::from)?;
        Ok(Self(request))
    }
}

impl std::ops::Deref for ScopeRequestJson {
    type Target = ScopeRequest;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use pretty_assertions::assert_eq;

    async fn extract(body: &'static str) -> Result<ScopeRequestJson, ApiError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        ScopeRequestJson::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_accepts_description() {
        let request = extract(r#"{"description": "read invoices", "extra": 1}"#)
            .await
            .unwrap();
        assert_eq!(request.description, "read invoices");
    }

    #[tokio::test]
    async fn test_rejects_invalid_payloads() {
        let cases = [
            ("{}", "Description is required"),
            (r#"{"description": null}"#, "Description is required"),
            (r#"{"description": "   "}"#, "Description is required"),
            (r#"{"description": 42}"#, "Description must be a string"),
            (r#"{"description": ["a"]}"#, "Description must be a string"),
            ("[]", "Description is required"),
        ];

        for (body, message) in cases {
            let err = extract(body).await.unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(err.code, "INVALID_INPUT");
            assert_eq!(err.message, message, "body: {body}");
        }
    }

    #[tokio::test]
    async fn test_rejects_unparsable_body() {
        let err = extract("description=hello").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_INPUT");
        assert!(err.details.is_some());
    }
}
