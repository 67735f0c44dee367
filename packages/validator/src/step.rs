//! Step-level validation

use crate::{validate_field, ValidationError};
use formsmith_model::{Answers, Field, Form};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of validating a page of fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepValidation {
    errors: BTreeMap<String, ValidationError>,
}

impl StepValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors keyed by field id
    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    pub fn error(&self, field_id: &str) -> Option<&ValidationError> {
        self.errors.get(field_id)
    }

    pub fn into_errors(self) -> BTreeMap<String, ValidationError> {
        self.errors
    }

    fn check<'a>(&mut self, fields: impl Iterator<Item = &'a Field>, answers: &Answers) {
        for field in fields {
            if let Some(error) = validate_field(field, answers.get(&field.id)) {
                self.errors.insert(field.id.clone(), error);
            }
        }
    }
}

/// Validate the fields shown on page `step`.
///
/// For single-step forms every field is checked and `step` is ignored.
pub fn validate_step(form: &Form, step: usize, answers: &Answers) -> StepValidation {
    let mut report = StepValidation::default();
    report.check(form.fields_for_step(step), answers);
    report
}

/// Validate every reachable page of the form
pub fn validate_form(form: &Form, answers: &Answers) -> StepValidation {
    let mut report = StepValidation::default();
    for step in 0..form.total_steps() {
        report.check(form.fields_for_step(step), answers);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_model::{AnswerValue, FieldDraft, FieldType, StepDraft};

    fn two_step_form() -> Form {
        let mut form = Form::new("Wizard");
        form.is_multi_step = true;
        form.steps = vec![
            StepDraft::new("About you").into_step("s1".to_string()),
            StepDraft::new("Details").into_step("s2".to_string()),
        ];
        form.fields = vec![
            FieldDraft::new(FieldType::Text, "Name")
                .required(true)
                .into_field("name".to_string(), Some(0)),
            FieldDraft::new(FieldType::Textarea, "Bio")
                .required(true)
                .into_field("bio".to_string(), Some(1)),
        ];
        form
    }

    #[test]
    fn test_steps_validate_independently() {
        let form = two_step_form();
        let mut answers = Answers::new();
        answers.insert("name".to_string(), AnswerValue::from("Alice"));

        assert!(validate_step(&form, 0, &answers).is_valid());

        let second = validate_step(&form, 1, &answers);
        assert!(!second.is_valid());
        assert_eq!(second.error("bio"), Some(&ValidationError::Required));
        assert_eq!(second.errors().len(), 1);
    }

    #[test]
    fn test_single_step_checks_all_fields() {
        let mut form = two_step_form();
        form.is_multi_step = false;

        let report = validate_step(&form, 0, &Answers::new());
        assert_eq!(report.errors().len(), 2);
    }

    #[test]
    fn test_validate_form_covers_every_step() {
        let form = two_step_form();
        let report = validate_form(&form, &Answers::new());
        assert_eq!(
            report.into_errors().into_keys().collect::<Vec<_>>(),
            vec!["bio".to_string(), "name".to_string()]
        );
    }

    #[test]
    fn test_validation_leaves_form_untouched() {
        let form = two_step_form();
        let before = form.clone();
        let _ = validate_form(&form, &Answers::new());
        assert_eq!(form, before);
    }
}
