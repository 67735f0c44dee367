//! # Formsmith Model
//!
//! Schema types for the form designer: fields, steps, forms, templates and
//! submitted responses.
//!
//! These types carry data and structural helpers only. Every edit to a live
//! form goes through `formsmith-editor`; validation of filled-in answers
//! lives in `formsmith-validator`.
//!
//! JSON keys are camelCase so that persisted blobs and exported documents stay
//! readable by the browser build of the designer.

pub mod double_option;
mod field;
mod form;
mod response;
mod templates;

pub use field::{Field, FieldDraft, FieldPatch, FieldType, FieldValidation};
pub use form::{Form, FormBody, Step, StepDraft, StepPatch, Template};
pub use response::{AnswerValue, Answers, Response};
pub use templates::builtin_templates;

use chrono::{DateTime, Utc};

/// Generate a fresh opaque identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current wall-clock time, used for every timestamp in the model
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Replace each run of whitespace with a single underscore.
///
/// Used to derive download file names from form titles.
pub fn file_stem(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn test_file_stem_collapses_whitespace() {
        assert_eq!(file_stem("Customer  Survey\t2024"), "Customer_Survey_2024");
        assert_eq!(file_stem("Plain"), "Plain");
    }
}
