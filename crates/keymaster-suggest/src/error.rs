//! Error types for the scope suggestion service

use thiserror::Error;

/// Result type alias for suggestion operations
pub type SuggestionResult<T> = Result<T, SuggestionError>;

/// Errors that can occur while producing a scope suggestion
///
/// Only [`SuggestionError::InvalidInput`] is ever returned to callers of
/// [`crate::ScopeSuggester::suggest`]; everything else is absorbed by the
/// keyword fallback.
#[derive(Error, Debug)]
pub enum SuggestionError {
    /// Missing, non-string, or blank description
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message
        message: String,
    },

    /// No model configured or reachable
    #[error("Text generation unavailable: {reason}")]
    CapabilityUnavailable {
        /// Why the capability is unavailable
        reason: String,
    },

    /// The model replied but the reply is not a usable suggestion
    #[error("Malformed model output: {reason}")]
    MalformedModelOutput {
        /// What was wrong with the output
        reason: String,
    },

    /// The backend rejected or failed the invocation
    #[error("Model invocation failed: {message}")]
    Invocation {
        /// Error message
        message: String,
    },

    /// The invocation did not finish in time
    #[error("Model invocation timed out after {seconds} seconds")]
    Timeout {
        /// Timeout duration
        seconds: u64,
    },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Error message
        message: String,
    },
}

impl SuggestionError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a capability unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a malformed output error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedModelOutput {
            reason: reason.into(),
        }
    }

    /// Create an invocation error
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub const fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the failure is transient rather than a setup or input problem
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidInput { .. } | Self::Configuration { .. }
        )
    }

    /// Get error severity level for logging
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidInput { .. } | Self::CapabilityUnavailable { .. } => ErrorSeverity::Info,
            Self::MalformedModelOutput { .. } | Self::Timeout { .. } | Self::Json(_) => {
                ErrorSeverity::Warning
            }
            Self::Invocation { .. } | Self::Http(_) => ErrorSeverity::Error,
            Self::Configuration { .. } => ErrorSeverity::Critical,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Informational - expected degradation
    Info,
    /// Warning - should be investigated
    Warning,
    /// Error - backend failed but the request was still answered
    Error,
    /// Critical - service cannot be set up
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl From<keymaster_core::Error> for SuggestionError {
    fn from(err: keymaster_core::Error) -> Self {
        match err {
            keymaster_core::Error::Validation { message, .. } => Self::InvalidInput { message },
            keymaster_core::Error::Configuration { message } => Self::Configuration { message },
            other => Self::InvalidInput {
                message: other.to_string(),
            },
        }
    }
}

// Conversions to core error types
impl From<SuggestionError> for keymaster_core::context_error::ContextError {
    fn from(err: SuggestionError) -> Self {
        Self::with_context(err, "Scope suggestion error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SuggestionError::invalid_input("Description is required");
        assert!(matches!(err, SuggestionError::InvalidInput { .. }));

        let err = SuggestionError::timeout(15);
        assert!(matches!(err, SuggestionError::Timeout { seconds: 15 }));
    }

    #[test]
    fn test_error_recoverable() {
        assert!(SuggestionError::unavailable("no model").is_recoverable());
        assert!(SuggestionError::malformed("not json").is_recoverable());
        assert!(SuggestionError::invocation("quota").is_recoverable());
        assert!(SuggestionError::timeout(1).is_recoverable());

        assert!(!SuggestionError::invalid_input("blank").is_recoverable());
        assert!(!SuggestionError::configuration("bad url").is_recoverable());
    }

    #[test]
    fn test_error_severity() {
        assert_eq!(
            SuggestionError::unavailable("no model").severity(),
            ErrorSeverity::Info
        );
        assert_eq!(
            SuggestionError::malformed("x").severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            SuggestionError::invocation("503").severity(),
            ErrorSeverity::Error
        );
        assert_eq!(
            SuggestionError::configuration("x").severity(),
            ErrorSeverity::Critical
        );
    }

    #[test]
    fn test_error_display() {
        let err = SuggestionError::timeout(30);
        assert!(err.to_string().contains("30 seconds"));

        let err = SuggestionError::malformed("missing reasoning");
        assert_eq!(err.to_string(), "Malformed model output: missing reasoning");
    }

    #[test]
    fn test_core_validation_maps_to_invalid_input() {
        let core = keymaster_core::Error::validation("description", "Description is required");
        let err = SuggestionError::from(core);

        match err {
            SuggestionError::InvalidInput { message } => {
                assert_eq!(message, "Description is required");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }
}
