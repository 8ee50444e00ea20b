//! Structured-output extraction from raw model text

use crate::error::{SuggestionError, SuggestionResult};
use keymaster_core::ScopeSuggestion;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

/// A fence tagged `json` in any case
static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?i:json)[ \t]*\r?\n?(.*?)\r?\n?```").expect("json fence pattern is valid")
});

/// Any fence, tagged or not
static ANY_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[ \t]*\r?\n?(.*?)\r?\n?```").expect("fence pattern is valid")
});

/// The shape the model is instructed to produce
#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(rename = "suggestedScopes")]
    suggested_scopes: Vec<String>,
    reasoning: String,
}

/// Candidate JSON text
///
/// The first `json`-tagged fence wins, then the first fence of any kind, then
/// the whole reply.
pub fn candidate(raw: &str) -> &str {
    [&*JSON_FENCE, &*ANY_FENCE]
        .into_iter()
        .find_map(|fence| fence.captures(raw).and_then(|caps| caps.get(1)))
        .map_or(raw, |m| m.as_str())
        .trim()
}

/// Parse a scope suggestion out of raw model text
///
/// Scopes outside the vocabulary are dropped and `read` is always present in
/// the result.
///
/// # Errors
///
/// Returns [`SuggestionError::MalformedModelOutput`] if the candidate is not a
/// JSON object with a `suggestedScopes` string array and a `reasoning` string.
pub fn extract(raw: &str) -> SuggestionResult<ScopeSuggestion> {
    let candidate = candidate(raw);
    if candidate.is_empty() {
        return Err(SuggestionError::malformed("empty completion"));
    }

    let parsed: RawSuggestion = serde_json::from_str(candidate)
        .map_err(|e| SuggestionError::malformed(format!("{e}")))?;

    let (suggestion, rejected) =
        ScopeSuggestion::normalized(parsed.suggested_scopes, parsed.reasoning);

    if !rejected.is_empty() {
        debug!(?rejected, "Dropped scopes outside the vocabulary");
    }

    Ok(suggestion)
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use keymaster_core::Scope;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_extract_fenced_json() {
        let raw = "```json\n{\"suggestedScopes\":[\"read\",\"write\"],\"reasoning\":\"x\"}\n```";
        let suggestion = extract(raw).unwrap();

        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read, Scope::Write]);
        assert_eq!(suggestion.reasoning, "x");
    }

    #[test]
    fn test_extract_untagged_fence_with_prose() {
        let raw = "Here you go:\n```\n{\"suggestedScopes\":[\"read\"],\"reasoning\":\"read only\"}\n```\nLet me know!";
        let suggestion = extract(raw).unwrap();

        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read]);
        assert_eq!(suggestion.reasoning, "read only");
    }

    #[test]
    fn test_extract_bare_json() {
        let raw = "  {\"suggestedScopes\": [\"read\", \"delete\"], \"reasoning\": \"cleanup job\"}\n";
        let suggestion = extract(raw).unwrap();

        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read, Scope::Delete]);
    }

    #[test]
    fn test_extract_normalizes_scopes() {
        let raw = r#"{"suggestedScopes": ["admin", "billing", "admin"], "reasoning": "ops"}"#;
        let suggestion = extract(raw).unwrap();

        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read, Scope::Admin]);
    }

    #[test]
    fn test_extract_prefers_json_fence_over_earlier_example() {
        let raw = "Example of the format:\n```\nsuggestedScopes / reasoning\n```\n\
                   Answer:\n```json\n{\"suggestedScopes\":[\"read\",\"write\"],\"reasoning\":\"x\"}\n```";
        let suggestion = extract(raw).unwrap();

        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read, Scope::Write]);
        assert_eq!(suggestion.reasoning, "x");
    }

    #[rstest]
    #[case("```JSON\n{\"suggestedScopes\":[\"delete\"],\"reasoning\":\"r\"}\n```")]
    #[case("```Json {\"suggestedScopes\":[\"delete\"],\"reasoning\":\"r\"} ```")]
    fn test_extract_json_tag_is_case_insensitive(#[case] raw: &str) {
        let suggestion = extract(raw).unwrap();
        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read, Scope::Delete]);
    }

    #[test]
    fn test_candidate_prefers_fence() {
        assert_eq!(candidate("```json\n{}\n```"), "{}");
        assert_eq!(candidate("```json {} ```"), "{}");
        assert_eq!(candidate("  plain  "), "plain");
    }

    #[rstest]
    #[case("not json at all")]
    #[case("")]
    #[case("```json\n```")]
    #[case(r#"{"suggestedScopes": ["read"]}"#)]
    #[case(r#"{"reasoning": "no scopes"}"#)]
    #[case(r#"{"suggestedScopes": "read", "reasoning": "x"}"#)]
    #[case(r#"{"suggestedScopes": [1, 2], "reasoning": "x"}"#)]
    #[case(r#"{"suggestedScopes": ["read"], "reasoning": 7}"#)]
    #[case(r#"["read", "write"]"#)]
    fn test_extract_rejects(#[case] raw: &str) {
        let err = extract(raw).unwrap_err();
        assert!(matches!(err, SuggestionError::MalformedModelOutput { .. }));
    }
}
