//! Cloudflare Workers AI text generation backend

use crate::error::{SuggestionError, SuggestionResult};
use crate::generator::{Generation, TextGenerator};
use crate::prompt::Prompt;
use async_trait::async_trait;
use keymaster_core::config::SuggestionConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Chat-style request body accepted by the `ai/run` endpoint
#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    messages: [Message<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response envelope returned by the Cloudflare API
#[derive(Debug, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Workers AI backend
///
/// Calls `POST {base_url}/accounts/{account_id}/ai/run/{model}` with a bearer
/// token. Without an account id or token the backend reports itself as
/// unavailable instead of failing.
pub struct WorkersAiGenerator {
    /// Base URL of the Cloudflare API
    base_url: String,

    /// Model identifier, e.g. `@cf/meta/llama-3.1-8b-instruct`
    model: String,

    /// Account identifier
    account_id: Option<String>,

    /// Bearer token
    api_token: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl std::fmt::Debug for WorkersAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkersAiGenerator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

impl WorkersAiGenerator {
    /// Create a new Workers AI backend from configuration
    ///
    /// The HTTP client timeout matches the suggestion timeout so a hung
    /// connection never outlives the orchestrator's own deadline.
    pub fn new(config: &SuggestionConfig) -> SuggestionResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SuggestionError::configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            account_id: non_blank(config.account_id.as_deref()),
            api_token: non_blank(config.api_token.as_deref()),
            client,
        })
    }

    /// Endpoint for a given account
    fn run_url(&self, account_id: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, account_id, self.model
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[async_trait]
impl TextGenerator for WorkersAiGenerator {
    async fn generate(&self, prompt: &Prompt) -> SuggestionResult<Generation> {
        let (Some(account_id), Some(api_token)) = (&self.account_id, &self.api_token) else {
            return Ok(Generation::unavailable(
                "Workers AI account id or API token not configured",
            ));
        };

        let body = RunRequest {
            messages: [
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        let url = self.run_url(account_id);
        debug!(model = %self.model, "Invoking Workers AI");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            debug!(%status, "Workers AI returned an error status");
            return Err(SuggestionError::invocation(format!(
                "Workers AI returned {status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        let body = response.text().await?;
        let envelope: RunEnvelope = serde_json::from_str(&body)?;
        if !envelope.success {
            let reasons = envelope
                .errors
                .iter()
                .map(|e| match e.code {
                    Some(code) => format!("{code}: {}", e.message),
                    None => e.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SuggestionError::invocation(format!(
                "Workers AI reported failure: {reasons}"
            )));
        }

        let text = envelope
            .result
            .and_then(|result| result.response)
            .unwrap_or_default();

        Ok(Generation::Model(text))
    }

    fn name(&self) -> &str {
        "workers_ai"
    }
}
