//! # Form Mutations
//!
//! Semantic edits to a form document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one user-level edit
//! 2. **Validated**: a mutation that targets a missing id or an invalid
//!    position fails without touching the form
//! 3. **Order-preserving**: only `ReorderFields` changes the relative order
//!    of fields; everything else keeps it
//!
//! ## Mutation Semantics
//!
//! ### ReorderFields
//! - List splice: the field at `from` is removed and reinserted at `to`
//! - `[A, B, C, D]` with `from = 0, to = 2` becomes `[B, C, A, D]`
//!
//! ### DeleteStep
//! - Removes the step only; reassignment of the fields that pointed at it is
//!   a post-effect (see `post_effects`)
//!
//! ### UpdateField / UpdateStep
//! - Merge of a partial record; ids and positions never change

use formsmith_model::{Field, FieldPatch, Form, Step, StepPatch};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a field to the end of the form
    InsertField { field: Field },

    /// Merge a partial update into a field
    #[serde(rename_all = "camelCase")]
    UpdateField { field_id: String, updates: FieldPatch },

    /// Remove a field
    #[serde(rename_all = "camelCase")]
    DeleteField { field_id: String },

    /// Move a field from one position to another
    ReorderFields { from: usize, to: usize },

    /// Append a step
    InsertStep { step: Step },

    /// Merge a partial update into a step
    #[serde(rename_all = "camelCase")]
    UpdateStep { step_id: String, updates: StepPatch },

    /// Remove a step
    #[serde(rename_all = "camelCase")]
    DeleteStep { step_id: String },

    /// Switch between single-page and multi-step filling
    SetMultiStep { enabled: bool },

    /// Change the form's title and/or description
    UpdateDetails {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(
            default,
            deserialize_with = "formsmith_model::double_option::deserialize",
            skip_serializing_if = "Option::is_none"
        )]
        description: Option<Option<String>>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("No form is open")]
    NoCurrentForm,

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Step not found: {0}")]
    StepNotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Index {index} out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Mutation {
    /// Apply mutation to the form with validation
    pub fn apply(&self, form: &mut Form) -> Result<(), MutationError> {
        self.validate(form)?;

        match self {
            Mutation::InsertField { field } => {
                form.fields.push(field.clone());
            }

            Mutation::UpdateField { field_id, updates } => {
                if let Some(field) = form.fields.iter_mut().find(|f| &f.id == field_id) {
                    field.merge(updates);
                }
            }

            Mutation::DeleteField { field_id } => {
                form.fields.retain(|f| &f.id != field_id);
            }

            Mutation::ReorderFields { from, to } => {
                let field = form.fields.remove(*from);
                form.fields.insert(*to, field);
            }

            Mutation::InsertStep { step } => {
                form.steps.push(step.clone());
            }

            Mutation::UpdateStep { step_id, updates } => {
                if let Some(step) = form.steps.iter_mut().find(|s| &s.id == step_id) {
                    step.merge(updates);
                }
            }

            Mutation::DeleteStep { step_id } => {
                form.steps.retain(|s| &s.id != step_id);
            }

            Mutation::SetMultiStep { enabled } => {
                form.is_multi_step = *enabled;
            }

            Mutation::UpdateDetails { title, description } => {
                if let Some(title) = title {
                    form.title = title.clone();
                }
                if let Some(description) = description {
                    form.description = description.clone();
                }
            }
        }

        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, form: &Form) -> Result<(), MutationError> {
        match self {
            Mutation::InsertField { field } => {
                if form.field(&field.id).is_some() {
                    return Err(MutationError::DuplicateId(field.id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateField { field_id, .. } | Mutation::DeleteField { field_id } => {
                form.field(field_id)
                    .ok_or_else(|| MutationError::FieldNotFound(field_id.clone()))?;
                Ok(())
            }

            Mutation::ReorderFields { from, to } => {
                let len = form.fields.len();
                for index in [*from, *to] {
                    if index >= len {
                        return Err(MutationError::IndexOutOfRange { index, len });
                    }
                }
                Ok(())
            }

            Mutation::InsertStep { step } => {
                if form.step_index(&step.id).is_some() {
                    return Err(MutationError::DuplicateId(step.id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateStep { step_id, .. } | Mutation::DeleteStep { step_id } => {
                form.step_index(step_id)
                    .ok_or_else(|| MutationError::StepNotFound(step_id.clone()))?;
                Ok(())
            }

            Mutation::SetMultiStep { .. } | Mutation::UpdateDetails { .. } => Ok(()),
        }
    }

    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertField { .. } => "insert_field",
            Mutation::UpdateField { .. } => "update_field",
            Mutation::DeleteField { .. } => "delete_field",
            Mutation::ReorderFields { .. } => "reorder_fields",
            Mutation::InsertStep { .. } => "insert_step",
            Mutation::UpdateStep { .. } => "update_step",
            Mutation::DeleteStep { .. } => "delete_step",
            Mutation::SetMultiStep { .. } => "set_multi_step",
            Mutation::UpdateDetails { .. } => "update_details",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_model::{FieldDraft, FieldType, StepDraft};

    fn form_with(ids: &[&str]) -> Form {
        let mut form = Form::new("Test");
        form.fields = ids
            .iter()
            .map(|id| FieldDraft::new(FieldType::Text, *id).into_field(id.to_string(), None))
            .collect();
        form
    }

    fn ids(form: &Form) -> Vec<&str> {
        form.fields.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateField {
            field_id: "f-123".to_string(),
            updates: FieldPatch::label("Hello"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert!(json.contains("\"kind\":\"updateField\""));
        assert!(json.contains("\"fieldId\":\"f-123\""));

        let deserialized: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_serialized_clear_still_clears() {
        let mut form = form_with(&["a"]);
        form.fields[0].placeholder = Some("ph".to_string());
        form.description = Some("About".to_string());

        let mutations = [
            Mutation::UpdateField {
                field_id: "a".to_string(),
                updates: FieldPatch {
                    placeholder: Some(None),
                    ..FieldPatch::default()
                },
            },
            Mutation::UpdateDetails {
                title: None,
                description: Some(None),
            },
        ];

        for mutation in mutations {
            let json = serde_json::to_string(&mutation).unwrap();
            let back: Mutation = serde_json::from_str(&json).unwrap();
            assert_eq!(back, mutation);
            back.apply(&mut form).unwrap();
        }

        assert_eq!(form.fields[0].placeholder, None);
        assert_eq!(form.description, None);
    }

    #[test]
    fn test_reorder_is_splice_not_swap() {
        let mut form = form_with(&["A", "B", "C", "D"]);
        Mutation::ReorderFields { from: 0, to: 2 }.apply(&mut form).unwrap();
        assert_eq!(ids(&form), vec!["B", "C", "A", "D"]);

        Mutation::ReorderFields { from: 3, to: 0 }.apply(&mut form).unwrap();
        assert_eq!(ids(&form), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_out_of_range_rejected() {
        let mut form = form_with(&["A", "B"]);
        let result = Mutation::ReorderFields { from: 0, to: 2 }.apply(&mut form);
        assert_eq!(result, Err(MutationError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(ids(&form), vec!["A", "B"]);
    }

    #[test]
    fn test_update_keeps_position_and_id() {
        let mut form = form_with(&["A", "B", "C"]);
        Mutation::UpdateField {
            field_id: "B".to_string(),
            updates: FieldPatch::required(true),
        }
        .apply(&mut form)
        .unwrap();

        assert_eq!(ids(&form), vec!["A", "B", "C"]);
        assert!(form.fields[1].required);
    }

    #[test]
    fn test_validation_rejects_missing_ids() {
        let form = form_with(&["A"]);

        let delete = Mutation::DeleteField {
            field_id: "nope".to_string(),
        };
        assert_eq!(
            delete.validate(&form),
            Err(MutationError::FieldNotFound("nope".to_string()))
        );

        let step = Mutation::UpdateStep {
            step_id: "nope".to_string(),
            updates: StepPatch::default(),
        };
        assert!(matches!(step.validate(&form), Err(MutationError::StepNotFound(_))));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut form = form_with(&["A"]);
        let insert = Mutation::InsertField {
            field: FieldDraft::new(FieldType::Email, "Again").into_field("A".to_string(), None),
        };
        assert_eq!(insert.apply(&mut form), Err(MutationError::DuplicateId("A".to_string())));
        assert_eq!(form.fields.len(), 1);
    }

    #[test]
    fn test_step_crud() {
        let mut form = form_with(&[]);
        Mutation::InsertStep {
            step: StepDraft::new("One").into_step("s1".to_string()),
        }
        .apply(&mut form)
        .unwrap();
        Mutation::UpdateStep {
            step_id: "s1".to_string(),
            updates: StepPatch {
                title: Some("First".to_string()),
                description: Some(Some("Intro".to_string())),
            },
        }
        .apply(&mut form)
        .unwrap();

        assert_eq!(form.steps[0].title, "First");
        assert_eq!(form.steps[0].description.as_deref(), Some("Intro"));

        Mutation::DeleteStep {
            step_id: "s1".to_string(),
        }
        .apply(&mut form)
        .unwrap();
        assert!(form.steps.is_empty());
    }
}
