//! Text-generation capability used by the suggestion pipeline

use crate::error::SuggestionResult;
use crate::prompt::Prompt;
use async_trait::async_trait;

/// Outcome of a single generation attempt
///
/// Unavailability is an expected, common outcome (no model configured, no
/// credentials) and is therefore a variant rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Raw text completion returned by the model
    Model(String),
    /// The capability cannot be used for this request
    Unavailable {
        /// Why the capability is unavailable
        reason: String,
    },
}

impl Generation {
    /// Create an unavailable outcome
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Single-shot text generation backend
///
/// One request, one text response: no streaming and no conversation state.
/// Implementations surface transport, quota and backend failures as
/// [`crate::SuggestionError::Invocation`] or [`crate::SuggestionError::Http`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run the prompt and return the raw completion
    async fn generate(&self, prompt: &Prompt) -> SuggestionResult<Generation>;

    /// Backend name for logs and health output
    fn name(&self) -> &str;
}
