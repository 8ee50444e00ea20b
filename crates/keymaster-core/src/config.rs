//! Configuration management for the keymaster backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Scope suggestion configuration
    #[serde(default)]
    pub suggestion: SuggestionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Text-generation backend used for scope suggestions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// No model configured; every request is answered by the keyword fallback
    #[default]
    None,
    /// Cloudflare Workers AI REST API
    WorkersAi,
    /// Scripted in-process generator
    Mock,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::WorkersAi => write!(f, "workers_ai"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Scope suggestion configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Backend selection
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model identifier passed to the backend
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the backend API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account identifier (Workers AI)
    #[serde(default)]
    pub account_id: Option<String>,

    /// Bearer token for the backend
    #[serde(default)]
    pub api_token: Option<String>,

    /// Upper bound on a single model invocation, in seconds
    #[serde(default = "default_suggestion_timeout")]
    pub timeout_seconds: u64,
}

impl fmt::Debug for SuggestionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    9002
}

const fn default_enable_cors() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

const fn default_max_body_bytes() -> usize {
    16 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_model() -> String {
    "@cf/meta/llama-3.1-8b-instruct".to_string()
}

fn default_base_url() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

const fn default_suggestion_timeout() -> u64 {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: default_enable_cors(),
            cors_origins: default_cors_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            base_url: default_base_url(),
            account_id: None,
            api_token: None,
            timeout_seconds: default_suggestion_timeout(),
        }
    }
}

impl SuggestionConfig {
    /// Invocation timeout as a duration
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }

    /// Whether credentials for the hosted backend are present
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.account_id) && present(&self.api_token)
    }
}

impl Config {
    /// Load configuration from an optional `config` file and the environment
    ///
    /// Environment variables use the `KEYMASTER` prefix and `__` for nesting,
    /// for example `KEYMASTER_SUGGESTION__PROVIDER=workers_ai`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed, or validated.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(
            config::File::with_name("config").required(false),
            config::Environment::with_prefix("KEYMASTER")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("api.cors_origins")
                .try_parsing(true),
        )
    }

    /// Load configuration from explicit sources, later sources taking precedence
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be built, parsed, or validated.
    pub fn load_from<F, E>(file: F, env: E) -> crate::Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the server cannot run with
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first problem found.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::Configuration {
                message: "server.port must be non-zero".to_string(),
            });
        }

        if self.suggestion.timeout_seconds == 0 {
            return Err(crate::Error::Configuration {
                message: "suggestion.timeout_seconds must be positive".to_string(),
            });
        }

        if self.suggestion.provider == ProviderKind::WorkersAi
            && self.suggestion.base_url.trim().is_empty()
        {
            return Err(crate::Error::Configuration {
                message: "suggestion.base_url is required for the workers_ai provider"
                    .to_string(),
            });
        }

        Ok(())
    }
}
