//! Structured suggestions returned to callers
//!
//! A [`ParsedResult`] wraps the JSON object extracted from the model reply
//! exactly as parsed. The four expected keys may be missing or hold
//! unexpected values; the accessors treat anything that is not an array of
//! strings as empty.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ValidationRules,
    Accessibility,
    UxSuggestions,
    EdgeCases,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ValidationRules,
        Category::Accessibility,
        Category::UxSuggestions,
        Category::EdgeCases,
    ];

    /// JSON key for the category
    pub fn key(self) -> &'static str {
        match self {
            Category::ValidationRules => "validationRules",
            Category::Accessibility => "accessibility",
            Category::UxSuggestions => "uxSuggestions",
            Category::EdgeCases => "edgeCases",
        }
    }
}

/// Typed form of the four categories, used to build results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub validation_rules: Vec<String>,
    pub accessibility: Vec<String>,
    pub ux_suggestions: Vec<String>,
    pub edge_cases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedResult(Value);

impl ParsedResult {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Strings under `category`, in reply order; missing keys read as empty
    pub fn items(&self, category: Category) -> Vec<&str> {
        self.0
            .get(category.key())
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Fixed response served in mock mode
    pub fn canned() -> Self {
        Suggestions {
            validation_rules: vec![
                "Mark required fields and reject empty submissions".to_string(),
                "Validate email fields against a standard email format".to_string(),
                "Enforce a minimum password length of 8 characters".to_string(),
            ],
            accessibility: vec![
                "Associate every input with a visible <label>".to_string(),
                "Announce validation errors with aria-live regions".to_string(),
                "Ensure error messages do not rely on color alone".to_string(),
            ],
            ux_suggestions: vec![
                "Validate inline on blur instead of only on submit".to_string(),
                "Show password requirements before the user types".to_string(),
                "Preserve entered values when validation fails".to_string(),
            ],
            edge_cases: vec![
                "Leading and trailing whitespace in text inputs".to_string(),
                "Very long input values and pasted content".to_string(),
                "Unicode and emoji characters in name fields".to_string(),
            ],
        }
        .into()
    }
}

impl From<Suggestions> for ParsedResult {
    fn from(suggestions: Suggestions) -> Self {
        // A struct of string vectors always serializes
        Self(serde_json::to_value(suggestions).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_read_as_empty() {
        let result = ParsedResult::from_value(json!({ "validationRules": ["a", "b"] }));
        assert_eq!(result.items(Category::ValidationRules), vec!["a", "b"]);
        assert!(result.items(Category::Accessibility).is_empty());
        assert!(result.items(Category::EdgeCases).is_empty());
    }

    #[test]
    fn test_unexpected_shapes_are_tolerated() {
        let result = ParsedResult::from_value(json!({
            "uxSuggestions": "not an array",
            "edgeCases": ["ok", 3, null, "also ok"],
            "extra": true
        }));
        assert!(result.items(Category::UxSuggestions).is_empty());
        assert_eq!(result.items(Category::EdgeCases), vec!["ok", "also ok"]);
        // Extra keys survive untouched
        assert_eq!(result.as_value()["extra"], json!(true));
    }

    #[test]
    fn test_canned_result_fills_every_category() {
        let canned = ParsedResult::canned();
        for category in Category::ALL {
            assert!(!canned.items(category).is_empty(), "{} empty", category.key());
        }
        assert_eq!(canned, ParsedResult::canned());
    }

    #[test]
    fn test_serializes_transparently() {
        let value = json!({ "accessibility": ["x"] });
        let result = ParsedResult::from_value(value.clone());
        assert_eq!(serde_json::to_value(&result).unwrap(), value);
        assert_eq!(result.items(Category::Accessibility), vec!["x"]);
    }
}
