//! Core data types shared by the suggestion service and the HTTP surface

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// A named permission that can be granted to an API key
///
/// The vocabulary is closed: nothing outside this enum can ever be suggested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Read access
    Read,
    /// Create and update access
    Write,
    /// Delete access
    Delete,
    /// Full administrative access
    Admin,
}

impl Scope {
    /// The full vocabulary, in canonical order
    pub const ALL: [Self; 4] = [Self::Read, Self::Write, Self::Delete, Self::Admin];

    /// Wire identifier of the scope
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::UnknownScope {
                scope: s.to_string(),
            })
    }
}

/// A request for scope suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ScopeRequest {
    /// Free-text description of what the key will be used for
    #[validate(custom(function = "validate_description"))]
    pub description: String,
}

impl ScopeRequest {
    /// Build a validated request from a description
    ///
    /// # Errors
    ///
    /// Returns a validation error if the description is empty after trimming.
    pub fn new(description: impl Into<String>) -> crate::Result<Self> {
        let request = Self {
            description: description.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Build a validated request from an arbitrary JSON payload
    ///
    /// The payload must be an object carrying a string `description` that is
    /// not blank.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the field is missing, not a string, or blank.
    pub fn from_value(payload: serde_json::Value) -> crate::Result<Self> {
        match payload.get("description") {
            None | Some(serde_json::Value::Null) => Err(crate::Error::validation(
                "description",
                "Description is required",
            )),
            Some(serde_json::Value::String(description)) => Self::new(description.clone()),
            Some(_) => Err(crate::Error::validation(
                "description",
                "Description must be a string",
            )),
        }
    }
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Description is required".into());
        return Err(err);
    }
    Ok(())
}

/// Suggested scopes with an explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSuggestion {
    /// Ordered, de-duplicated scopes; always contains `read`
    #[serde(rename = "suggestedScopes")]
    pub suggested_scopes: Vec<Scope>,
    /// Why these scopes were chosen
    pub reasoning: String,
}

impl ScopeSuggestion {
    /// Build a suggestion from raw identifiers, enforcing the vocabulary invariants
    ///
    /// Unknown identifiers are dropped, duplicates keep their first position, and
    /// `read` is prepended when missing. The returned list of rejected identifiers
    /// is for diagnostics only.
    pub fn normalized<I, S>(scopes: I, reasoning: impl Into<String>) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suggested_scopes: Vec<Scope> = Vec::with_capacity(Scope::ALL.len());
        let mut rejected = Vec::new();

        for raw in scopes {
            match raw.as_ref().parse::<Scope>() {
                Ok(scope) if !suggested_scopes.contains(&scope) => suggested_scopes.push(scope),
                Ok(_) => {}
                Err(_) => rejected.push(raw.as_ref().to_string()),
            }
        }

        if !suggested_scopes.contains(&Scope::Read) {
            suggested_scopes.insert(0, Scope::Read);
        }

        (
            Self {
                suggested_scopes,
                reasoning: reasoning.into(),
            },
            rejected,
        )
    }

    /// Whether the suggestion grants the given scope
    pub fn contains(&self, scope: Scope) -> bool {
        self.suggested_scopes.contains(&scope)
    }
}

/// Which path produced a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Parsed from the text-generation model
    Model,
    /// Produced by the keyword fallback
    Fallback,
}

impl SuggestionSource {
    /// Header-friendly identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("read", Scope::Read)]
    #[case("WRITE", Scope::Write)]
    #[case(" delete ", Scope::Delete)]
    #[case("Admin", Scope::Admin)]
    fn test_scope_parse(#[case] input: &str, #[case] expected: Scope) {
        assert_eq!(input.parse::<Scope>().unwrap(), expected);
    }

    #[test]
    fn test_scope_parse_unknown() {
        let err = "billing".parse::<Scope>().unwrap_err();
        assert!(matches!(err, crate::Error::UnknownScope { .. }));
    }

    #[test]
    fn test_scope_serde_lowercase() {
        let json = serde_json::to_string(&Scope::ALL).unwrap();
        assert_eq!(json, r#"["read","write","delete","admin"]"#);
    }

    #[test]
    fn test_request_rejects_blank() {
        assert!(ScopeRequest::new("").is_err());
        assert!(ScopeRequest::new("   \n\t").is_err());
        assert!(ScopeRequest::new("read invoices").is_ok());
    }

    #[test]
    fn test_request_keeps_description_verbatim() {
        let request = ScopeRequest::new("  read invoices ").unwrap();
        assert_eq!(request.description, "  read invoices ");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"description": null}))]
    #[case(json!({"description": 42}))]
    #[case(json!({"description": ["read"]}))]
    #[case(json!({"description": "  "}))]
    #[case(json!("read everything"))]
    fn test_request_from_value_rejects(#[case] payload: serde_json::Value) {
        let err = ScopeRequest::from_value(payload).unwrap_err();
        assert!(matches!(err, crate::Error::Validation { .. }));
    }

    #[test]
    fn test_request_from_value_accepts() {
        let request =
            ScopeRequest::from_value(json!({"description": "sync orders", "extra": true}))
                .unwrap();
        assert_eq!(request.description, "sync orders");
    }

    #[test]
    fn test_suggestion_wire_format() {
        let suggestion = ScopeSuggestion {
            suggested_scopes: vec![Scope::Read, Scope::Write],
            reasoning: "x".to_string(),
        };
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(
            value,
            json!({"suggestedScopes": ["read", "write"], "reasoning": "x"})
        );
    }

    #[test]
    fn test_normalized_filters_and_dedupes() {
        let (suggestion, rejected) =
            ScopeSuggestion::normalized(["write", "billing", "write", "read"], "because");

        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read, Scope::Write]);
        assert_eq!(rejected, vec!["billing".to_string()]);
        assert_eq!(suggestion.reasoning, "because");
    }

    #[test]
    fn test_normalized_never_empty() {
        let (suggestion, rejected) = ScopeSuggestion::normalized(Vec::<String>::new(), "");
        assert_eq!(suggestion.suggested_scopes, vec![Scope::Read]);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_normalized_preserves_model_order() {
        let (suggestion, _) = ScopeSuggestion::normalized(["read", "admin", "delete"], "");
        assert_eq!(
            suggestion.suggested_scopes,
            vec![Scope::Read, Scope::Admin, Scope::Delete]
        );
        assert!(suggestion.contains(Scope::Admin));
        assert!(!suggestion.contains(Scope::Write));
    }
}
