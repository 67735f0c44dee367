pub mod fields;
pub mod form;
pub mod responses;
pub mod templates;

pub use fields::{add_field, add_step, delete_field, move_field, AddFieldArgs, AddStepArgs, MoveFieldArgs};
pub use form::{export_form, import_form, new_form, redo, save, share, show, undo, ExportArgs, ImportArgs, NewArgs, ShowArgs};
pub use responses::{export_responses, list_responses, submit, ExportResponsesArgs, SubmitArgs};
pub use templates::{list_templates, save_template, use_template, SaveTemplateArgs};

use crate::config::Config;
use anyhow::{anyhow, Result};
use formsmith_editor::{FileStorage, Form, FormStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store opened from the state file for one command
pub struct Workspace {
    pub cwd: PathBuf,
    pub store: FormStore,
}

impl Workspace {
    pub fn open(cwd: &Path, state: Option<&Path>) -> Result<Self> {
        let config = Config::load(cwd)?;
        let state_path = config.state_path(cwd, state);
        debug!(path = %state_path.display(), "Opening state file");

        let store = FormStore::open(config.editor, Box::new(FileStorage::new(state_path)))?;
        Ok(Self {
            cwd: cwd.to_path_buf(),
            store,
        })
    }

    /// Current form, or an error telling the user how to get one
    pub fn current_form(&self) -> Result<&Form> {
        self.store.current_form().ok_or_else(|| {
            anyhow!("No form is open. Run `formsmith new` or `formsmith use-template` first")
        })
    }

    /// Run any auto-save still waiting for its quiet period
    pub fn finish(mut self) {
        if self.store.flush_auto_save() {
            debug!("Flushed pending auto-save");
        }
    }
}
