//! # Edit Session State
//!
//! Designer state that is not part of the document: which field is selected,
//! which step the canvas shows, the preview viewport and the colour theme.
//!
//! None of this is recorded in history. It is persisted with the rest of the
//! store so the designer reopens where the user left off.

use formsmith_model::Form;
use serde::{Deserialize, Serialize};

/// Viewport used by the preview pane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// Colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Designer UI state for the current form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    /// Field shown in the property panel
    pub selected_field: Option<String>,

    /// Step shown on the canvas; new fields land here
    pub current_step: usize,

    pub preview_mode: PreviewMode,

    pub theme: Theme,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update selection
    pub fn set_selection(&mut self, field_id: Option<String>) {
        self.selected_field = field_id;
    }

    /// Clear the selection if it points at `field_id`
    pub fn deselect(&mut self, field_id: &str) {
        if self.selected_field.as_deref() == Some(field_id) {
            self.selected_field = None;
        }
    }

    /// Drop state that no longer matches `form` (after undo/redo)
    pub fn reconcile(&mut self, form: &Form) {
        if let Some(id) = &self.selected_field {
            if form.field(id).is_none() {
                self.selected_field = None;
            }
        }
        let last = form.total_steps().saturating_sub(1);
        self.current_step = self.current_step.min(last);
    }

    /// Start of a new document: selection and step cursor reset, view
    /// preferences kept
    pub fn reset_document_state(&mut self) {
        self.selected_field = None;
        self.current_step = 0;
    }

    /// Step a new field should be placed on
    pub fn placement_step(&self, form: &Form) -> Option<usize> {
        if !form.is_multi_step {
            return None;
        }
        let last = form.steps.len().saturating_sub(1);
        Some(self.current_step.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_model::{FieldDraft, FieldType, StepDraft};

    #[test]
    fn test_session_creation() {
        let session = EditSession::new();
        assert!(session.selected_field.is_none());
        assert_eq!(session.current_step, 0);
        assert_eq!(session.preview_mode, PreviewMode::Desktop);
        assert_eq!(session.theme, Theme::Light);
    }

    #[test]
    fn test_deselect_only_matching() {
        let mut session = EditSession::new();
        session.set_selection(Some("a".to_string()));
        session.deselect("b");
        assert_eq!(session.selected_field.as_deref(), Some("a"));
        session.deselect("a");
        assert!(session.selected_field.is_none());
    }

    #[test]
    fn test_reconcile_after_restore() {
        let mut form = Form::new("F");
        form.fields = vec![FieldDraft::new(FieldType::Text, "A").into_field("a".to_string(), None)];

        let mut session = EditSession::new();
        session.set_selection(Some("gone".to_string()));
        session.current_step = 4;
        session.reconcile(&form);

        assert!(session.selected_field.is_none());
        assert_eq!(session.current_step, 0);
    }

    #[test]
    fn test_placement_step_clamped() {
        let mut form = Form::new("F");
        assert_eq!(EditSession::new().placement_step(&form), None);

        form.is_multi_step = true;
        form.steps = vec![StepDraft::new("Only").into_step("s".to_string())];

        let session = EditSession {
            current_step: 3,
            ..EditSession::default()
        };
        assert_eq!(session.placement_step(&form), Some(0));
    }

    #[test]
    fn test_theme_wire_names() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
