//! Deterministic keyword-based scope inference
//!
//! Used whenever the model path is unavailable or its output cannot be parsed.
//! Pure and total: the same description always yields the same suggestion, and
//! `read` is always granted.

use keymaster_core::{Scope, ScopeSuggestion};

/// Keywords that grant each non-default scope, checked in vocabulary order
const RULES: [(Scope, &[&str]); 3] = [
    (Scope::Write, &["write", "create", "update", "post"]),
    (Scope::Delete, &["delete", "remove"]),
    (Scope::Admin, &["admin", "manage", "all"]),
];

/// Infer scopes from a description using substring matching
pub fn infer(description: &str) -> ScopeSuggestion {
    let lowered = description.to_lowercase();

    let mut suggested_scopes = vec![Scope::Read];
    suggested_scopes.extend(
        RULES
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(scope, _)| *scope),
    );

    let reasoning = reasoning_for(description, &suggested_scopes);

    ScopeSuggestion {
        suggested_scopes,
        reasoning,
    }
}

fn reasoning_for(description: &str, scopes: &[Scope]) -> String {
    let joined = scopes
        .iter()
        .map(|scope| scope.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Based on the description \"{description}\", the suggested scopes are: {joined}. \
         These permissions should provide the necessary access for the described use case."
    )
}
