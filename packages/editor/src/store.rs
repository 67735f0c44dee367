//! # Form Store
//!
//! Single owner of the current form and every collection around it.
//!
//! ## Edit cycle
//!
//! ```text
//! operation → Mutation → PostEffectEngine (working copy) → new Form
//!                                                            ↓
//!                                   history capture + auto-save trigger
//!                                                            ↓
//!                                                    persist state blob
//! ```
//!
//! Each accepted mutation produces exactly one new form value and one history
//! entry. A mutation that targets a missing id (or no form at all) leaves
//! everything as it was: no history entry, no auto-save, no write.

use crate::autosave::AutoSaveScheduler;
use crate::config::EditorConfig;
use crate::document::{export_document, import_document, DocumentFile};
use crate::errors::EditorResult;
use crate::history::History;
use crate::mutations::{Mutation, MutationError};
use crate::post_effects::PostEffectEngine;
use crate::session::{EditSession, PreviewMode, Theme};
use crate::state::PersistedState;
use chrono::{DateTime, Utc};
use formsmith_common::{load_json, save_json, Storage};
use formsmith_model::{
    builtin_templates, Answers, FieldDraft, FieldPatch, Form, Response, StepDraft, StepPatch,
    Template,
};
use formsmith_responses::{export_csv, ClientMetadata, CsvExport, ResponseCollector};
use formsmith_validator::{FillSession, StepValidation};
use std::time::Instant;
use tracing::{debug, info, warn};

const NEW_FORM_TITLE: &str = "New Form";

/// The designer's state container
pub struct FormStore {
    config: EditorConfig,
    current_form: Option<Form>,
    session: EditSession,
    templates: Vec<Template>,
    saved_forms: Vec<Form>,
    responses: ResponseCollector,
    history: History,
    auto_save: AutoSaveScheduler,
    last_saved: Option<DateTime<Utc>>,
    post_effects: PostEffectEngine,
    storage: Option<Box<dyn Storage>>,
}

impl FormStore {
    /// In-memory store with the built-in templates and nothing else
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: History::with_max_entries(config.max_history),
            auto_save: AutoSaveScheduler::new(config.auto_save_delay(), config.auto_save_enabled),
            config,
            current_form: None,
            session: EditSession::new(),
            templates: builtin_templates(),
            saved_forms: Vec::new(),
            responses: ResponseCollector::new(),
            last_saved: None,
            post_effects: PostEffectEngine::new(),
            storage: None,
        }
    }

    /// Restore from `storage`, or start fresh when it holds nothing.
    ///
    /// A restored current form becomes the first history entry; earlier
    /// history does not survive a reload.
    pub fn open(config: EditorConfig, storage: Box<dyn Storage>) -> EditorResult<Self> {
        let state: PersistedState = match load_json(storage.as_ref())? {
            Some(state) => state,
            None => PersistedState {
                auto_save_enabled: config.auto_save_enabled,
                ..PersistedState::default()
            },
        };

        let mut store = Self::new(config);
        store.auto_save.set_enabled(state.auto_save_enabled);
        store.templates = state.templates;
        store.saved_forms = state.saved_forms;
        store.responses = ResponseCollector::from_responses(state.form_responses);
        store.last_saved = state.last_saved;
        store.session = EditSession {
            selected_field: state.selected_field,
            current_step: state.current_step,
            preview_mode: state.preview_mode,
            theme: state.theme,
        };

        if let Some(form) = state.current_form {
            store.history.capture(&form);
            store.session.reconcile(&form);
            store.current_form = Some(form);
        }
        store.storage = Some(storage);

        info!(
            theme = ?store.session.theme,
            saved_forms = store.saved_forms.len(),
            responses = store.responses.len(),
            "Opened form store"
        );
        Ok(store)
    }

    /// Attach a persistence backend; the current state is written immediately
    pub fn with_storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self.persist();
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn current_form(&self) -> Option<&Form> {
        self.current_form.as_ref()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn selected_field(&self) -> Option<&str> {
        self.session.selected_field.as_deref()
    }

    pub fn preview_mode(&self) -> PreviewMode {
        self.session.preview_mode
    }

    pub fn current_step(&self) -> usize {
        self.session.current_step
    }

    /// Theme to apply after opening
    pub fn theme(&self) -> Theme {
        self.session.theme
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn saved_forms(&self) -> &[Form] {
        &self.saved_forms
    }

    pub fn saved_form(&self, form_id: &str) -> Option<&Form> {
        self.saved_forms.iter().find(|f| f.id == form_id)
    }

    pub fn responses(&self) -> &ResponseCollector {
        &self.responses
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn auto_save(&self) -> &AutoSaveScheduler {
        &self.auto_save
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    // ---- mutations ----

    /// Apply a mutation (and its post-effects) to the current form.
    ///
    /// On success the new form is stamped, captured in history, scheduled
    /// for auto-save and persisted.
    pub fn try_apply(&mut self, mutation: Mutation) -> EditorResult<Vec<Mutation>> {
        let current = self
            .current_form
            .as_ref()
            .ok_or(MutationError::NoCurrentForm)?;

        let mut next = current.clone();
        let applied = self.post_effects.apply_with_effects(&mutation, &mut next)?;
        next.updated_at = formsmith_model::now();

        self.history.capture(&next);
        self.session.reconcile(&next);
        self.current_form = Some(next);
        self.trigger_auto_save();
        self.persist();

        debug!(
            mutation = mutation.name(),
            applied = applied.len(),
            history = self.history.len(),
            "Applied mutation"
        );
        Ok(applied)
    }

    /// `try_apply` for callers that treat a rejected edit as a no-op
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        let name = mutation.name();
        match self.try_apply(mutation) {
            Ok(_) => true,
            Err(e) => {
                debug!(mutation = name, error = %e, "Mutation skipped");
                false
            }
        }
    }

    /// Replace the current form wholesale. A form (not `None`) is captured
    /// in history without resetting it.
    pub fn set_current_form(&mut self, form: Option<Form>) {
        if let Some(form) = &form {
            self.history.capture(form);
            self.session.reconcile(form);
        }
        self.current_form = form;
        self.persist();
    }

    /// Append a field and return its new id.
    ///
    /// On a multi-step form the field lands on the step being edited.
    pub fn add_field(&mut self, draft: FieldDraft) -> Option<String> {
        let form = self.current_form.as_ref()?;
        let id = formsmith_model::new_id();
        let field = draft.into_field(id.clone(), self.session.placement_step(form));

        self.apply(Mutation::InsertField { field }).then_some(id)
    }

    pub fn update_field(&mut self, field_id: &str, updates: FieldPatch) -> bool {
        self.apply(Mutation::UpdateField {
            field_id: field_id.to_string(),
            updates,
        })
    }

    /// Remove a field; a selection pointing at it is cleared
    pub fn delete_field(&mut self, field_id: &str) -> bool {
        self.apply(Mutation::DeleteField {
            field_id: field_id.to_string(),
        })
    }

    /// Splice the field at `from` into position `to`
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> bool {
        self.apply(Mutation::ReorderFields { from, to })
    }

    pub fn add_step(&mut self, draft: StepDraft) -> Option<String> {
        self.current_form.as_ref()?;
        let id = formsmith_model::new_id();
        let step = draft.into_step(id.clone());

        self.apply(Mutation::InsertStep { step }).then_some(id)
    }

    pub fn update_step(&mut self, step_id: &str, updates: StepPatch) -> bool {
        self.apply(Mutation::UpdateStep {
            step_id: step_id.to_string(),
            updates,
        })
    }

    pub fn delete_step(&mut self, step_id: &str) -> bool {
        self.apply(Mutation::DeleteStep {
            step_id: step_id.to_string(),
        })
    }

    pub fn set_multi_step(&mut self, enabled: bool) -> bool {
        self.apply(Mutation::SetMultiStep { enabled })
    }

    pub fn update_form_details(
        &mut self,
        title: Option<String>,
        description: Option<Option<String>>,
    ) -> bool {
        self.apply(Mutation::UpdateDetails { title, description })
    }

    // ---- UI state ----

    pub fn set_selected_field(&mut self, field_id: Option<String>) {
        self.session.set_selection(field_id);
        self.persist();
    }

    pub fn set_preview_mode(&mut self, mode: PreviewMode) {
        self.session.preview_mode = mode;
        self.persist();
    }

    /// Move the canvas to `step`, clamped to the form's last step
    pub fn set_current_step(&mut self, step: usize) {
        let last = self
            .current_form
            .as_ref()
            .map_or(0, |f| f.total_steps().saturating_sub(1));
        self.session.current_step = step.min(last);
        self.persist();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.session.theme = theme;
        self.persist();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.session.theme.toggled();
        self.set_theme(theme);
        theme
    }

    // ---- forms and templates ----

    /// Upsert the current form into the saved forms by id
    pub fn save_form(&mut self) -> bool {
        let Some(form) = self.current_form.clone() else {
            return false;
        };

        match self.saved_forms.iter_mut().find(|f| f.id == form.id) {
            Some(existing) => *existing = form,
            None => self.saved_forms.push(form),
        }
        self.last_saved = Some(formsmith_model::now());
        self.persist();

        info!(saved_forms = self.saved_forms.len(), "Saved form");
        true
    }

    /// Open a saved form as a new editing lineage
    pub fn load_form(&mut self, form_id: &str) -> bool {
        let Some(form) = self.saved_form(form_id).cloned() else {
            debug!(form_id, "No saved form to load");
            return false;
        };
        self.start_document(form);
        true
    }

    /// Start an empty single-step form
    pub fn create_new_form(&mut self) -> String {
        let form = Form::new(NEW_FORM_TITLE);
        let id = form.id.clone();
        self.start_document(form);
        id
    }

    /// Copy the current form's content into a new template
    pub fn save_as_template(&mut self, name: &str, description: &str) -> Option<String> {
        let form = self.current_form.as_ref()?;
        let template = Template {
            id: formsmith_model::new_id(),
            name: name.to_string(),
            description: description.to_string(),
            form_data: form.body(),
        };
        let id = template.id.clone();

        self.templates.push(template);
        self.persist();
        info!(template_id = %id, "Saved template");
        Some(id)
    }

    /// Instantiate a template as a new form with a fresh id
    pub fn load_template(&mut self, template_id: &str) -> Option<String> {
        let template = self.templates.iter().find(|t| t.id == template_id)?;
        let form = Form::from_body(template.form_data.clone());
        let id = form.id.clone();
        self.start_document(form);
        Some(id)
    }

    fn start_document(&mut self, form: Form) {
        self.history.clear();
        self.history.capture(&form);
        self.session.reset_document_state();
        info!(form_id = %form.id, title = %form.title, "Opened form");
        self.current_form = Some(form);
        self.persist();
    }

    // ---- shareable links ----

    /// Save the current form and return `<base>/form/<id>`.
    ///
    /// Empty when there is no current form.
    pub fn generate_shareable_link(&mut self) -> String {
        let Some(id) = self.current_form.as_ref().map(|f| f.id.clone()) else {
            return String::new();
        };
        self.save_form();

        format!(
            "{}/form/{}",
            self.config.share_base_url.trim_end_matches('/'),
            id
        )
    }

    /// Find the saved form a link points at
    pub fn resolve_shareable_link(&self, link: &str) -> Option<&Form> {
        let (_, rest) = link.rsplit_once("/form/")?;
        let id = rest
            .split(|c| matches!(c, '/' | '?' | '#'))
            .next()
            .filter(|id| !id.is_empty())?;
        self.saved_form(id)
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        let Some(form) = self.history.undo() else {
            return false;
        };
        self.restore(form);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(form) = self.history.redo() else {
            return false;
        };
        self.restore(form);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, form: Form) {
        self.session.reconcile(&form);
        self.current_form = Some(form);
        self.persist();
        debug!(cursor = self.history.index(), "Restored history entry");
    }

    // ---- auto-save ----

    pub fn is_auto_save_enabled(&self) -> bool {
        self.auto_save.is_enabled()
    }

    pub fn set_auto_save(&mut self, enabled: bool) {
        self.auto_save.set_enabled(enabled);
        self.persist();
    }

    /// Re-arm the debounced save from now
    pub fn trigger_auto_save(&mut self) -> bool {
        self.trigger_auto_save_at(Instant::now())
    }

    pub fn trigger_auto_save_at(&mut self, now: Instant) -> bool {
        if self.current_form.is_none() {
            return false;
        }
        self.auto_save.trigger(now)
    }

    /// Save if the quiet period has elapsed by `now`.
    ///
    /// The form saved is whatever is current at this call.
    pub fn run_pending_auto_save(&mut self, now: Instant) -> bool {
        if !self.auto_save.take_due(now) {
            return false;
        }
        debug!("Auto-save fired");
        self.save_form()
    }

    /// Run a pending save immediately (before shutdown)
    pub fn flush_auto_save(&mut self) -> bool {
        self.auto_save.take_pending() && self.save_form()
    }

    // ---- responses ----

    /// Record answers for a form, tagged with the configured user agent
    pub fn submit_form_response(&mut self, form_id: &str, answers: Answers) -> String {
        let metadata = ClientMetadata {
            ip_address: None,
            user_agent: self.config.user_agent.clone(),
        };
        self.submit_form_response_with_metadata(form_id, answers, metadata)
    }

    pub fn submit_form_response_with_metadata(
        &mut self,
        form_id: &str,
        answers: Answers,
        metadata: ClientMetadata,
    ) -> String {
        let title = self.saved_form(form_id).map(|f| f.title.clone());
        let id = self
            .responses
            .submit(form_id, title.as_deref(), answers, metadata)
            .id
            .clone();
        self.persist();
        id
    }

    pub fn get_form_responses(&self, form_id: &str) -> Vec<&Response> {
        self.responses.for_form(form_id).collect()
    }

    pub fn delete_response(&mut self, response_id: &str) -> bool {
        let deleted = self.responses.delete(response_id);
        if deleted {
            self.persist();
        }
        deleted
    }

    /// CSV of a form's responses, `None` when it has none
    pub fn export_responses(&self, form_id: &str) -> EditorResult<Option<CsvExport>> {
        let form = self.saved_form(form_id).or_else(|| {
            self.current_form
                .as_ref()
                .filter(|f| f.id == form_id)
        });
        Ok(export_csv(form, self.responses.for_form(form_id))?)
    }

    // ---- document files ----

    pub fn export_form_document(&self) -> EditorResult<Option<DocumentFile>> {
        self.current_form.as_ref().map(export_document).transpose()
    }

    /// Import a document as the current form and return its new id.
    ///
    /// A malformed document changes nothing.
    pub fn import_form_document(&mut self, contents: &str) -> EditorResult<String> {
        let form = import_document(contents)?;
        let id = form.id.clone();
        info!(form_id = %id, fields = form.fields.len(), "Imported form document");
        self.set_current_form(Some(form));
        Ok(id)
    }

    // ---- filling ----

    /// Start filling a saved form
    pub fn open_for_fill(&self, form_id: &str) -> Option<FillSession> {
        self.saved_form(form_id).cloned().map(FillSession::new)
    }

    /// Validate and record a fill session's answers.
    ///
    /// Nothing is recorded when validation fails.
    pub fn submit_fill(&mut self, fill: &mut FillSession) -> Result<String, StepValidation> {
        let answers = fill.submit()?;
        let form_id = fill.form().id.clone();
        Ok(self.submit_form_response(&form_id, answers))
    }

    // ---- persistence ----

    /// Snapshot of everything that survives a reload
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            current_form: self.current_form.clone(),
            selected_field: self.session.selected_field.clone(),
            preview_mode: self.session.preview_mode,
            current_step: self.session.current_step,
            templates: self.templates.clone(),
            saved_forms: self.saved_forms.clone(),
            form_responses: self.responses.all().to_vec(),
            theme: self.session.theme,
            auto_save_enabled: self.auto_save.is_enabled(),
            last_saved: self.last_saved,
        }
    }

    /// Best-effort write; a failure keeps the previous blob
    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = save_json(storage.as_ref(), &self.persisted_state()) {
            warn!(error = %e, "Failed to persist editor state");
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("current_form", &self.current_form.as_ref().map(|f| &f.id))
            .field("saved_forms", &self.saved_forms.len())
            .field("responses", &self.responses.len())
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_common::MemoryStorage;
    use formsmith_model::{AnswerValue, FieldType};

    fn store_with_form() -> FormStore {
        let mut store = FormStore::default();
        store.create_new_form();
        store
    }

    #[test]
    fn test_operations_without_form_are_noops() {
        let mut store = FormStore::default();

        assert_eq!(store.add_field(FieldType::Text.default_field()), None);
        assert!(!store.delete_field("x"));
        assert!(!store.save_form());
        assert_eq!(store.generate_shareable_link(), "");
        assert!(store.history().is_empty());
        assert!(!store.auto_save().is_pending());
    }

    #[test]
    fn test_create_new_form_baseline() {
        let store = store_with_form();
        let form = store.current_form().unwrap();

        assert_eq!(form.title, "New Form");
        assert!(form.fields.is_empty());
        assert!(!form.is_multi_step);
        assert_eq!(store.history().len(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_mutation_replaces_form_and_stamps() {
        let mut store = store_with_form();
        let before = store.current_form().unwrap().clone();

        let id = store.add_field(FieldType::Email.default_field()).unwrap();
        let after = store.current_form().unwrap();

        assert_eq!(after.fields.len(), 1);
        assert_eq!(after.fields[0].id, id);
        assert!(after.updated_at >= before.updated_at);
        assert!(before.fields.is_empty());
        assert_eq!(store.history().len(), 2);
        assert!(store.auto_save().is_pending());
    }

    #[test]
    fn test_missing_targets_do_not_capture() {
        let mut store = store_with_form();
        store.add_field(FieldType::Text.default_field());
        let entries = store.history().len();

        assert!(!store.update_field("missing", FieldPatch::label("x")));
        assert!(!store.delete_step("missing"));
        assert!(!store.reorder_fields(0, 5));
        assert_eq!(store.history().len(), entries);
    }

    #[test]
    fn test_delete_selected_field_clears_selection() {
        let mut store = store_with_form();
        let id = store.add_field(FieldType::Text.default_field()).unwrap();
        store.set_selected_field(Some(id.clone()));

        assert!(store.delete_field(&id));
        assert_eq!(store.selected_field(), None);
    }

    #[test]
    fn test_add_field_uses_current_step() {
        let mut store = store_with_form();
        store.set_multi_step(true);
        store.add_step(StepDraft::new("One"));
        store.add_step(StepDraft::new("Two"));
        store.set_current_step(1);

        let id = store.add_field(FieldType::Phone.default_field()).unwrap();
        let form = store.current_form().unwrap();
        assert_eq!(form.field(&id).and_then(|f| f.step), Some(1));
    }

    #[test]
    fn test_save_form_upserts() {
        let mut store = store_with_form();
        assert!(store.save_form());
        store.update_form_details(Some("Renamed".to_string()), None);
        assert!(store.save_form());

        assert_eq!(store.saved_forms().len(), 1);
        assert_eq!(store.saved_forms()[0].title, "Renamed");
        assert!(store.last_saved().is_some());
    }

    #[test]
    fn test_load_template_fresh_lineage() {
        let mut store = store_with_form();
        store.add_field(FieldType::Text.default_field());

        let id = store.load_template("contact-us").unwrap();
        assert_ne!(id, "contact-us");
        assert_eq!(store.current_form().unwrap().fields.len(), 3);
        assert_eq!(store.history().len(), 1);
        assert!(store.load_template("nope").is_none());
    }

    #[test]
    fn test_save_as_template_copies_body() {
        let mut store = store_with_form();
        store.add_field(FieldType::Date.default_field());

        let id = store.save_as_template("Mine", "desc").unwrap();
        let template = store.templates().iter().find(|t| t.id == id).unwrap();
        assert_eq!(template.form_data.fields.len(), 1);
        assert_eq!(store.templates().len(), 3);
    }

    #[test]
    fn test_shareable_link_round_trip() {
        let mut store = store_with_form();
        let id = store.current_form().unwrap().id.clone();

        let link = store.generate_shareable_link();
        assert_eq!(link, format!("http://localhost:3000/form/{id}"));
        assert_eq!(store.resolve_shareable_link(&link).map(|f| f.id.as_str()), Some(id.as_str()));
        assert!(store.resolve_shareable_link("http://localhost:3000/other").is_none());
    }

    #[test]
    fn test_response_title_snapshot() {
        let mut store = store_with_form();
        store.save_form();
        let form_id = store.current_form().unwrap().id.clone();

        let mut answers = Answers::new();
        answers.insert("x".to_string(), AnswerValue::from("y"));
        let id = store.submit_form_response(&form_id, answers.clone());
        store.submit_form_response("ghost", answers);

        let response = store.responses().get(&id).unwrap();
        assert_eq!(response.form_title, "New Form");
        assert!(response.user_agent.is_some());
        assert_eq!(store.get_form_responses("ghost")[0].form_title, "Unknown Form");
    }

    #[test]
    fn test_auto_save_runs_at_fire_time() {
        let mut store = store_with_form();
        let start = Instant::now();
        store.trigger_auto_save_at(start);
        store.update_form_details(Some("Late edit".to_string()), None);

        // update_form_details re-armed from the wall clock, later than `start`
        assert!(!store.run_pending_auto_save(start));
        assert!(store.flush_auto_save());
        assert_eq!(store.saved_forms()[0].title, "Late edit");
    }

    #[test]
    fn test_disabled_auto_save_never_arms() {
        let mut store = store_with_form();
        store.set_auto_save(false);
        store.add_field(FieldType::Text.default_field());
        assert!(!store.auto_save().is_pending());
        assert!(!store.flush_auto_save());
    }

    #[test]
    fn test_import_malformed_changes_nothing() {
        let mut store = store_with_form();
        let before = store.current_form().cloned();

        assert!(store.import_form_document("{oops").is_err());
        assert_eq!(store.current_form().cloned(), before);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_persists_to_storage() {
        let storage = MemoryStorage::new();
        let mut store = FormStore::default().with_storage(Box::new(storage.clone()));
        store.create_new_form();
        store.set_theme(Theme::Dark);

        let reopened = FormStore::open(EditorConfig::default(), Box::new(storage)).unwrap();
        assert_eq!(reopened.theme(), Theme::Dark);
        assert!(reopened.current_form().is_some());
        assert_eq!(reopened.history().len(), 1);
    }
}
