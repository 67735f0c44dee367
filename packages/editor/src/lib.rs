//! # Formsmith Editor
//!
//! Core editing engine for form documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Form, Field, Step, Template, Response │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: FormStore                           │
//! │  - Apply mutations with post-effects        │
//! │  - Snapshot history (undo/redo)             │
//! │  - Debounced auto-save                      │
//! │  - Persist state blob                       │
//! └─────────────────────────────────────────────┘
//!           ↓                         ↓
//! ┌──────────────────────┐ ┌────────────────────┐
//! │ validator: fill/check│ │ responses: collect │
//! └──────────────────────┘ │ and export CSV     │
//!                          └────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One owner**: the store owns the current form and every collection
//! 2. **Values, not edits in place**: each mutation yields a new form
//! 3. **One edit, one snapshot**: a mutation and its post-effects are a
//!    single history entry
//! 4. **Fire-time saves**: auto-save reads the form when it fires
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formsmith_editor::{EditorConfig, FieldPatch, FieldType, FormStore};
//!
//! let mut store = FormStore::new(EditorConfig::default());
//! store.create_new_form();
//!
//! let id = store.add_field(FieldType::Email.default_field()).unwrap();
//! store.update_field(&id, FieldPatch::required(true));
//!
//! store.undo();
//! store.redo();
//!
//! let link = store.generate_shareable_link();
//! ```

mod autosave;
mod config;
mod document;
mod errors;
mod history;
mod mutations;
mod post_effects;
mod session;
mod state;
mod store;

pub use autosave::{spawn_auto_save, AutoSaveScheduler, SharedStore};
pub use config::EditorConfig;
pub use document::{export_document, import_document, DocumentFile};
pub use errors::{EditorError, EditorResult};
pub use history::{History, HistoryEntry, DEFAULT_MAX_HISTORY};
pub use mutations::{Mutation, MutationError};
pub use post_effects::{AssignUnplacedFields, PostEffect, PostEffectEngine, RepointStepAssignments};
pub use session::{EditSession, PreviewMode, Theme};
pub use state::PersistedState;
pub use store::FormStore;

// Re-export common types for convenience
pub use formsmith_common::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use formsmith_model::{
    AnswerValue, Answers, Field, FieldDraft, FieldPatch, FieldType, FieldValidation, Form, Response,
    Step, StepDraft, StepPatch, Template,
};
pub use formsmith_responses::{ClientMetadata, CsvExport};
pub use formsmith_validator::{FillSession, StepValidation, ValidationError};
