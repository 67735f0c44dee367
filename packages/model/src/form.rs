//! Forms, steps and templates

use crate::field::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named partition of fields for multi-step forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A step that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StepDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn into_step(self, id: String) -> Step {
        Step {
            id,
            title: self.title,
            description: self.description,
        }
    }
}

/// Partial update for a step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::double_option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

impl Step {
    pub fn merge(&mut self, patch: &StepPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

/// The editable document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display and fill order
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub is_multi_step: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// Fresh empty single-step form with a new id
    pub fn new(title: impl Into<String>) -> Self {
        let now = crate::now();
        Self {
            id: crate::new_id(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            steps: Vec::new(),
            is_multi_step: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Instantiate a template body as a new document
    pub fn from_body(body: FormBody) -> Self {
        let now = crate::now();
        Self {
            id: crate::new_id(),
            title: body.title,
            description: body.description,
            fields: body.fields,
            steps: body.steps,
            is_multi_step: body.is_multi_step,
            created_at: now,
            updated_at: now,
        }
    }

    /// Content without document identity
    pub fn body(&self) -> FormBody {
        FormBody {
            title: self.title.clone(),
            description: self.description.clone(),
            fields: self.fields.clone(),
            steps: self.steps.clone(),
            is_multi_step: self.is_multi_step,
        }
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn step_index(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// Number of pages shown when filling (always at least one)
    pub fn total_steps(&self) -> usize {
        if self.is_multi_step {
            self.steps.len().max(1)
        } else {
            1
        }
    }

    /// Fields shown on the given page, in field order.
    ///
    /// Single-step forms show every field regardless of `step`.
    pub fn fields_for_step(&self, step: usize) -> impl Iterator<Item = &Field> + '_ {
        let multi = self.is_multi_step;
        self.fields
            .iter()
            .filter(move |f| !multi || f.step == Some(step))
    }
}

/// Reusable form content: everything but id and timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBody {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub is_multi_step: bool,
}

/// A named form body used to seed new forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub form_data: FormBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldDraft, FieldType};

    fn multi_step_form() -> Form {
        let mut form = Form::new("Survey");
        form.is_multi_step = true;
        form.steps = vec![
            StepDraft::new("One").into_step("s1".to_string()),
            StepDraft::new("Two").into_step("s2".to_string()),
        ];
        form.fields = vec![
            FieldDraft::new(FieldType::Text, "A").into_field("a".to_string(), Some(0)),
            FieldDraft::new(FieldType::Text, "B").into_field("b".to_string(), Some(1)),
            FieldDraft::new(FieldType::Text, "C").into_field("c".to_string(), Some(1)),
        ];
        form
    }

    #[test]
    fn test_fields_for_step_multi() {
        let form = multi_step_form();
        let ids: Vec<_> = form.fields_for_step(1).map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(form.total_steps(), 2);
    }

    #[test]
    fn test_fields_for_step_single_ignores_step() {
        let mut form = multi_step_form();
        form.is_multi_step = false;
        assert_eq!(form.fields_for_step(0).count(), 3);
        assert_eq!(form.total_steps(), 1);
    }

    #[test]
    fn test_body_round_trip_assigns_new_identity() {
        let form = multi_step_form();
        let copy = Form::from_body(form.body());
        assert_ne!(copy.id, form.id);
        assert_eq!(copy.fields, form.fields);
        assert_eq!(copy.steps, form.steps);
        assert!(copy.is_multi_step);
    }

    #[test]
    fn test_form_json_keys() {
        let form = multi_step_form();
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["isMultiStep"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
