//! Application state management

use keymaster_core::{Config, context_error::Result};
use keymaster_suggest::{ScopeSuggester, build_suggester};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Scope suggestion service
    pub suggester: ScopeSuggester,
}

impl AppState {
    /// Create new application state, selecting the model backend from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured backend cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let suggester = build_suggester(&config.suggestion)?;
        Ok(Self::with_suggester(config, suggester))
    }

    /// Create application state around an existing suggester
    pub const fn with_suggester(config: Config, suggester: ScopeSuggester) -> Self {
        Self { config, suggester }
    }

    /// Name of the configured suggestion provider
    pub fn provider_name(&self) -> String {
        self.config.suggestion.provider.to_string()
    }
}
