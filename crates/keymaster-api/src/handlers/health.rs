//! Health check endpoints for monitoring and diagnostics

use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Process uptime in seconds
    pub uptime_seconds: u64,
    /// Suggestion backend status
    pub suggestion: SuggestionHealth,
}

/// Suggestion backend status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionHealth {
    /// Configured provider (`none`, `workers_ai`, `mock`)
    pub provider: String,
    /// Whether a model backend is wired in; when false every answer comes
    /// from the keyword fallback
    pub model_configured: bool,
}

/// Readiness check response (simpler than health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Service readiness status
    pub ready: bool,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Basic health check endpoint for monitoring systems
///
/// The service stays healthy without a model: suggestions degrade to the
/// keyword fallback, so a missing backend is reported but never fails the check.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2024-03-15T14:25:30Z",
///   "uptime_seconds": 3600,
///   "suggestion": { "provider": "workers_ai", "model_configured": true }
/// }
/// ```
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let suggestion = SuggestionHealth {
        provider: state.provider_name(),
        model_configured: state.suggester.has_generator(),
    };

    debug!(provider = %suggestion.provider, "Health check");

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        uptime_seconds: get_uptime_seconds(),
        suggestion,
    })
}

/// Readiness check endpoint for Kubernetes-style health checks
///
/// The service has no external dependency it must wait for.
pub async fn readiness_check() -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        ready: true,
        timestamp: chrono::Utc::now(),
    })
}

/// Process uptime in seconds, measured from the first call
pub fn get_uptime_seconds() -> u64 {
    static START_TIME: std::sync::LazyLock<std::time::Instant> =
        std::sync::LazyLock::new(std::time::Instant::now);
    START_TIME.elapsed().as_secs()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use keymaster_core::Config;
    use keymaster_suggest::ScopeSuggester;

    #[tokio::test]
    async fn test_health_reports_fallback_only() {
        let state = Arc::new(AppState::with_suggester(
            Config::default(),
            ScopeSuggester::fallback_only(),
        ));

        let Json(health) = health_check(State(state)).await;

        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(health.suggestion.provider, "none");
        assert!(!health.suggestion.model_configured);
    }

    #[tokio::test]
    async fn test_health_response_serialization() {
        let health_response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
            uptime_seconds: 3600,
            suggestion: SuggestionHealth {
                provider: "workers_ai".to_string(),
                model_configured: true,
            },
        };

        let json = serde_json::to_value(&health_response).expect("Failed to serialize");
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["uptime_seconds"], 3600);
        assert_eq!(json["suggestion"]["provider"], "workers_ai");
        assert_eq!(json["suggestion"]["model_configured"], true);
    }

    #[tokio::test]
    async fn test_readiness_check() {
        let Json(readiness) = readiness_check().await;
        assert!(readiness.ready);
    }

    #[test]
    fn test_get_uptime_seconds() {
        let uptime1 = get_uptime_seconds();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let uptime2 = get_uptime_seconds();

        assert!(uptime2 >= uptime1);
        assert!(uptime1 < 3600);
    }
}
