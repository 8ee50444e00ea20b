//! Mock text generator for testing

use crate::error::{SuggestionError, SuggestionResult};
use crate::generator::{Generation, TextGenerator};
use crate::prompt::Prompt;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, sleep};

/// What the mock does when invoked
#[derive(Debug, Clone)]
enum Behavior {
    Reply(String),
    Unavailable(String),
    Fail(String),
}

/// Scripted text generator that records every invocation
#[derive(Debug, Clone)]
pub struct MockGenerator {
    behavior: Behavior,

    /// Artificial latency before answering
    delay: Option<Duration>,

    /// Number of times `generate` was called
    calls: Arc<AtomicUsize>,

    /// Last prompt received
    last_prompt: Arc<Mutex<Option<Prompt>>>,
}

impl MockGenerator {
    /// A generator that always returns `reply` verbatim
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reply(reply.into()))
    }

    /// A generator that reports the capability as unavailable
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Unavailable(reason.into()))
    }

    /// A generator whose invocations always fail
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Set processing delay for testing
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of invocations so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<Prompt> {
        self.last_prompt
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl Default for MockGenerator {
    /// Replies with a fenced read-only suggestion, like a well-behaved model
    fn default() -> Self {
        Self::replying(
            "```json\n{\"suggestedScopes\": [\"read\"], \"reasoning\": \"Mock model suggestion\"}\n```",
        )
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &Prompt) -> SuggestionResult<Generation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.clone());
        }

        if let Some(delay) = self.delay {
            sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Reply(text) => Ok(Generation::Model(text.clone())),
            Behavior::Unavailable(reason) => Ok(Generation::unavailable(reason.clone())),
            Behavior::Fail(message) => Err(SuggestionError::invocation(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
