//! Scope suggestion orchestration
//!
//! `validate -> compose -> invoke -> extract`, with a single model attempt.
//! Unavailability, invocation failures, timeouts and malformed output all end
//! in the keyword fallback; only invalid input is reported to the caller.

use crate::error::{SuggestionError, SuggestionResult};
use crate::generator::{Generation, TextGenerator};
use crate::{extract, fallback, prompt};
use keymaster_core::{ScopeRequest, ScopeSuggestion, SuggestionSource};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// A suggestion together with the path that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionOutcome {
    /// The suggestion returned to the client
    pub suggestion: ScopeSuggestion,
    /// Model or fallback
    pub source: SuggestionSource,
}

impl SuggestionOutcome {
    fn fallback(description: &str) -> Self {
        Self {
            suggestion: fallback::infer(description),
            source: SuggestionSource::Fallback,
        }
    }
}

/// Stateless scope suggestion service
///
/// Holds no per-request state; concurrent calls are independent.
#[derive(Clone)]
pub struct ScopeSuggester {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl std::fmt::Debug for ScopeSuggester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeSuggester")
            .field("generator", &self.generator_name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ScopeSuggester {
    /// Create a suggester; `None` means no model is configured
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// A suggester that always uses the keyword fallback
    pub fn fallback_only() -> Self {
        Self::new(None, Duration::from_secs(1))
    }

    /// Name of the configured backend, if any
    pub fn generator_name(&self) -> Option<&str> {
        self.generator.as_deref().map(|generator| generator.name())
    }

    /// Whether a model backend is configured
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Invocation timeout
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Suggest scopes for a raw description
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::InvalidInput`] if the description is blank.
    /// No model call is made in that case.
    pub async fn suggest(&self, description: &str) -> SuggestionResult<SuggestionOutcome> {
        let request = ScopeRequest::new(description)?;
        Ok(self.suggest_request(&request).await)
    }

    /// Suggest scopes for an arbitrary JSON payload carrying a `description`
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::InvalidInput`] if the payload has no usable
    /// description.
    pub async fn suggest_value(
        &self,
        payload: serde_json::Value,
    ) -> SuggestionResult<SuggestionOutcome> {
        let request = ScopeRequest::from_value(payload)?;
        Ok(self.suggest_request(&request).await)
    }

    /// Suggest scopes for an already validated request; never fails
    pub async fn suggest_request(&self, request: &ScopeRequest) -> SuggestionOutcome {
        let description = request.description.as_str();

        match self.invoke(description).await {
            Ok(raw) => match extract::extract(&raw) {
                Ok(suggestion) => {
                    debug!(scopes = ?suggestion.suggested_scopes, "Model suggestion accepted");
                    SuggestionOutcome {
                        suggestion,
                        source: SuggestionSource::Model,
                    }
                }
                Err(err) => {
                    degrade(&err);
                    SuggestionOutcome::fallback(description)
                }
            },
            Err(err) => {
                degrade(&err);
                SuggestionOutcome::fallback(description)
            }
        }
    }

    /// Single attempt at the model, bounded by the configured timeout
    async fn invoke(&self, description: &str) -> SuggestionResult<String> {
        let Some(generator) = self.generator.as_ref() else {
            return Err(SuggestionError::unavailable("no text generator configured"));
        };

        let prompt = prompt::compose(description);

        match tokio::time::timeout(self.timeout, generator.generate(&prompt)).await {
            Ok(Ok(Generation::Model(text))) => Ok(text),
            Ok(Ok(Generation::Unavailable { reason })) => {
                Err(SuggestionError::CapabilityUnavailable { reason })
            }
            Ok(Err(err)) => Err(err),
            Err(_) => Err(SuggestionError::timeout(self.timeout.as_secs())),
        }
    }
}

/// Log a degradation to the fallback path once
fn degrade(err: &SuggestionError) {
    let severity = err.severity();
    match err {
        SuggestionError::CapabilityUnavailable { .. } => {
            info!(%severity, error = %err, "Model unavailable, using keyword fallback");
        }
        _ if err.is_recoverable() => {
            warn!(%severity, error = %err, "Model path failed, using keyword fallback");
        }
        _ => {
            error!(%severity, error = %err, "Model backend misconfigured, using keyword fallback");
        }
    }
}
