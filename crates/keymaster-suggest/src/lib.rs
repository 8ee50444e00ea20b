//! Scope suggestion service for API keys
//!
//! Turns a free-text description of an API key's intended use into a set of
//! scopes from the closed vocabulary `read`, `write`, `delete`, `admin`. A
//! text-generation model is asked first; whenever it is unavailable, fails,
//! times out, or answers with something unparsable, a deterministic keyword
//! matcher produces the answer instead.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod error;
pub mod extract;
pub mod fallback;
pub mod generator;
pub mod mock;
pub mod prompt;
pub mod service;
pub mod workers_ai;

pub use error::{ErrorSeverity, SuggestionError, SuggestionResult};
pub use generator::{Generation, TextGenerator};
pub use prompt::Prompt;
pub use service::{ScopeSuggester, SuggestionOutcome};

// Re-export commonly used items
pub use mock::MockGenerator;
pub use workers_ai::WorkersAiGenerator;

use keymaster_core::config::{ProviderKind, SuggestionConfig};
use std::sync::Arc;

/// Select the text-generation backend described by configuration
///
/// `ProviderKind::None` yields no backend, which the suggester treats as the
/// capability being unavailable.
pub fn build_generator(
    config: &SuggestionConfig,
) -> SuggestionResult<Option<Arc<dyn TextGenerator>>> {
    let generator: Option<Arc<dyn TextGenerator>> = match config.provider {
        ProviderKind::None => None,
        ProviderKind::WorkersAi => Some(Arc::new(WorkersAiGenerator::new(config)?)),
        ProviderKind::Mock => Some(Arc::new(MockGenerator::default())),
    };
    Ok(generator)
}

/// Build a suggester from configuration
pub fn build_suggester(config: &SuggestionConfig) -> SuggestionResult<ScopeSuggester> {
    Ok(ScopeSuggester::new(
        build_generator(config)?,
        config.timeout(),
    ))
}
