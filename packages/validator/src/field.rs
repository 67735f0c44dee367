//! Single-field validation

use crate::ValidationError;
use formsmith_model::{AnswerValue, Field, FieldType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern is valid"));

static PATTERNS: Lazy<Mutex<PatternCache>> = Lazy::new(Default::default);

/// Author patterns compiled once and reused across answers.
///
/// Invalid patterns are remembered as `None` so they warn only once.
#[derive(Debug, Default)]
struct PatternCache {
    compiled: HashMap<String, Option<Regex>>,
}

impl PatternCache {
    const MAX_ENTRIES: usize = 256;

    fn get(&mut self, pattern: &str) -> Option<Regex> {
        if let Some(compiled) = self.compiled.get(pattern) {
            return compiled.clone();
        }

        if self.compiled.len() >= Self::MAX_ENTRIES {
            self.compiled.clear();
        }

        let compiled = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern, error = %e, "Ignoring invalid validation pattern");
                None
            }
        };
        self.compiled.insert(pattern.to_string(), compiled.clone());
        compiled
    }

    fn len(&self) -> usize {
        self.compiled.len()
    }
}

fn author_pattern(pattern: &str) -> Option<Regex> {
    PATTERNS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(pattern)
}

/// Validate one answer against its field definition.
///
/// Returns the first failing check, or `None` when the answer is acceptable.
/// A missing answer is treated like an empty one.
pub fn validate_field(field: &Field, value: Option<&AnswerValue>) -> Option<ValidationError> {
    if field.required && value.map_or(true, AnswerValue::is_empty) {
        return Some(ValidationError::Required);
    }

    // Remaining checks only inspect non-empty text
    let text = value.and_then(AnswerValue::as_text).filter(|t| !t.is_empty())?;

    if let Some(rules) = field.validation.as_ref() {
        if field.field_type.supports_length() {
            let len = text.chars().count();
            if let Some(min) = rules.min_length.filter(|min| len < *min) {
                return Some(ValidationError::MinLength(min));
            }
            if let Some(max) = rules.max_length.filter(|max| len > *max) {
                return Some(ValidationError::MaxLength(max));
            }
        }

        if field.field_type.supports_pattern() {
            if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
                if author_pattern(pattern).is_some_and(|re| !re.is_match(text)) {
                    return Some(ValidationError::Pattern);
                }
            }
        }
    }

    match field.field_type {
        FieldType::Email if !EMAIL.is_match(text) => Some(ValidationError::Email),
        FieldType::Phone => {
            let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            (!PHONE.is_match(&digits)).then_some(ValidationError::Phone)
        }
        _ => None,
    }
}
