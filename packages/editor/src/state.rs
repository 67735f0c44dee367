//! Persisted state blob
//!
//! Everything the designer needs to reopen: the current form, the session
//! state, the collections and the auto-save switch. History is deliberately
//! absent; it is scoped to one editing session.

use crate::session::{PreviewMode, Theme};
use chrono::{DateTime, Utc};
use formsmith_model::{builtin_templates, Form, Response, Template};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub current_form: Option<Form>,
    pub selected_field: Option<String>,
    pub preview_mode: PreviewMode,
    pub current_step: usize,
    pub templates: Vec<Template>,
    pub saved_forms: Vec<Form>,
    pub form_responses: Vec<Response>,
    pub theme: Theme,
    pub auto_save_enabled: bool,
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            current_form: None,
            selected_field: None,
            preview_mode: PreviewMode::default(),
            current_step: 0,
            templates: builtin_templates(),
            saved_forms: Vec::new(),
            form_responses: Vec::new(),
            theme: Theme::default(),
            auto_save_enabled: true,
            last_saved: None,
        }
    }
}
