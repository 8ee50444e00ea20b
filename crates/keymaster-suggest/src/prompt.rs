//! Prompt composition for scope suggestions

use keymaster_core::Scope;
use serde::Serialize;
use std::sync::LazyLock;

/// A composed two-part instruction for the text-generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// Fixed system instruction
    pub system: String,
    /// The user's description, verbatim
    pub user: String,
}

static SYSTEM_INSTRUCTION: LazyLock<String> = LazyLock::new(|| {
    let vocabulary = Scope::ALL
        .iter()
        .map(|scope| scope.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an expert in API key security and access control.\n\
         Based on the provided description of the API key's intended use, suggest the optimal scopes and permissions.\n\
         \n\
         Available scopes: {vocabulary}\n\
         \n\
         Respond ONLY with valid JSON in this exact format:\n\
         {{\n  \"suggestedScopes\": [\"scope1\", \"scope2\"],\n  \"reasoning\": \"explanation of why these scopes are needed\"\n}}"
    )
});

/// The system instruction shared by every request
pub fn system_instruction() -> &'static str {
    SYSTEM_INSTRUCTION.as_str()
}

/// Compose the prompt for a validated description
pub fn compose(description: &str) -> Prompt {
    Prompt {
        system: system_instruction().to_string(),
        user: description.to_string(),
    }
}
