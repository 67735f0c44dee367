//! Submitted answers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single filled-in value.
///
/// Checkboxes answer with a boolean; every other field type (including
/// radio/dropdown selections and dates) answers with a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
}

impl AnswerValue {
    /// Empty for the purpose of `required`: blank text or an unticked box
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Bool(checked) => !checked,
            AnswerValue::Text(text) => text.trim().is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            AnswerValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(checked) => Some(*checked),
            AnswerValue::Text(_) => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(checked) => write!(f, "{}", checked),
            AnswerValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

/// Answers keyed by field id
pub type Answers = BTreeMap<String, AnswerValue>;

/// One recorded submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    /// Reference only; the form may since have been edited or deleted
    pub form_id: String,
    /// Title at submission time
    pub form_title: String,
    pub responses: Answers,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Response {
    pub fn answer(&self, field_id: &str) -> Option<&AnswerValue> {
        self.responses.get(field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(AnswerValue::from("   ").is_empty());
        assert!(AnswerValue::from(false).is_empty());
        assert!(!AnswerValue::from("x").is_empty());
        assert!(!AnswerValue::from(true).is_empty());
    }

    #[test]
    fn test_untagged_answers_parse_from_json() {
        let answers: Answers =
            serde_json::from_str(r#"{"name": "Alice", "agree": true}"#).unwrap();
        assert_eq!(answers["name"], AnswerValue::Text("Alice".to_string()));
        assert_eq!(answers["agree"], AnswerValue::Bool(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(AnswerValue::from(true).to_string(), "true");
        assert_eq!(AnswerValue::from("Blue").to_string(), "Blue");
    }
}
