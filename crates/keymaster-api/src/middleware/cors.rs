//! CORS layer for cross-origin request handling

use axum::http::{HeaderName, HeaderValue, Method, header, request::Parts};
use keymaster_core::config::ApiConfig;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::debug;

/// Build the CORS layer from API configuration
///
/// A `*` entry allows every origin. Entries of the form `*.example.com`
/// allow any subdomain of `example.com`; everything else must match exactly.
/// Returns `None` when CORS is disabled.
pub fn cors_layer(config: &ApiConfig) -> Option<CorsLayer> {
    if !config.enable_cors {
        debug!("CORS disabled in configuration");
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("x-suggestion-source"),
        ])
        .max_age(Duration::from_secs(86400));

    let origins = config.cors_origins.clone();
    let layer = if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| is_origin_allowed(origin, &origins))
            },
        ))
    };

    Some(layer)
}

/// Check if the given origin is allowed by the CORS policy
fn is_origin_allowed(origin: &str, allowed_origins: &[String]) -> bool {
    allowed_origins.iter().any(|allowed| {
        if allowed == "*" || allowed == origin {
            return true;
        }
        allowed.strip_prefix("*.").is_some_and(|domain| {
            origin
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
        })
    })
}
