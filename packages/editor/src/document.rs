//! # Form Document Files
//!
//! Export and import of a single form as pretty-printed JSON.
//!
//! ## Lifecycle
//!
//! ```text
//! current form → export → <title>.json → import → new current form
//!                                          ↓
//!                                  fresh id, fresh updatedAt
//! ```
//!
//! Import checks structure only (the JSON must look like a form). Step
//! indices, option lists and validation rules are taken as they are.

use crate::errors::{EditorError, EditorResult};
use chrono::{DateTime, Utc};
use formsmith_model::{Form, FormBody};
use serde::Deserialize;

/// A rendered document ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub file_name: String,
    pub contents: String,
}

/// Imported JSON. Identity fields are optional since import replaces them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedForm {
    #[serde(flatten)]
    body: FormBody,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Serialize a form for download
pub fn export_document(form: &Form) -> EditorResult<DocumentFile> {
    let contents = serde_json::to_string_pretty(form).map_err(EditorError::Serialization)?;

    Ok(DocumentFile {
        file_name: format!("{}.json", formsmith_model::file_stem(&form.title)),
        contents,
    })
}

/// Parse an exported document into a new form with a fresh id
pub fn import_document(contents: &str) -> EditorResult<Form> {
    let imported: ImportedForm =
        serde_json::from_str(contents).map_err(EditorError::MalformedImport)?;

    let mut form = Form::from_body(imported.body);
    if let Some(created_at) = imported.created_at {
        form.created_at = created_at;
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_model::{FieldDraft, FieldType, StepDraft};

    fn sample() -> Form {
        let mut form = Form::new("Event  Signup");
        form.is_multi_step = true;
        form.steps = vec![StepDraft::new("Details").into_step("s1".to_string())];
        form.fields = vec![FieldDraft::new(FieldType::Date, "When")
            .required(true)
            .into_field("when".to_string(), Some(0))];
        form
    }

    #[test]
    fn test_export_file_name_and_pretty_json() {
        let file = export_document(&sample()).unwrap();
        assert_eq!(file.file_name, "Event_Signup.json");
        assert!(file.contents.contains("\n  \"title\": \"Event  Signup\""));
    }

    #[test]
    fn test_round_trip_keeps_content_not_identity() {
        let original = sample();
        let file = export_document(&original).unwrap();
        let imported = import_document(&file.contents).unwrap();

        assert_ne!(imported.id, original.id);
        assert_eq!(imported.title, original.title);
        assert_eq!(imported.fields, original.fields);
        assert_eq!(imported.steps, original.steps);
        assert_eq!(imported.is_multi_step, original.is_multi_step);
        assert_eq!(imported.created_at, original.created_at);
    }

    #[test]
    fn test_minimal_document() {
        let form = import_document(r#"{"title": "Bare"}"#).unwrap();
        assert_eq!(form.title, "Bare");
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_malformed_document() {
        let err = import_document("{\"fields\": 12}").unwrap_err();
        assert!(matches!(err, EditorError::MalformedImport(_)));

        let err = import_document("not json").unwrap_err();
        assert!(matches!(err, EditorError::MalformedImport(_)));
    }
}
