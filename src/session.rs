use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::EditorError;
use crate::host::NoteHost;
use crate::recipe_core::{EditOutcome, FieldEdit, RecipeForm};
use crate::recipe_doc::RecipeDocument;

/// Binds one [`RecipeForm`] to the host: loads what the host delivers and
/// writes the full document back after every edit.
pub struct RecipeSession<H> {
    form: RecipeForm,
    host: H,
}

impl<H: NoteHost> RecipeSession<H> {
    pub fn new(host: H) -> Self {
        Self {
            form: RecipeForm::default(),
            host,
        }
    }

    pub fn form(&self) -> &RecipeForm {
        &self.form
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Replaces the whole form. Loading does not write back.
    pub fn on_note_received(&mut self, raw: Option<&Value>) {
        let doc = RecipeDocument::from_note_json(raw);
        self.form = RecipeForm::load(&doc);
        info!(
            ingredients = self.form.ingredients.len(),
            scale = %self.form.scale,
            "recipe loaded"
        );
    }

    /// Applies `edit` and persists. Edits that address a row which is gone
    /// are dropped.
    pub fn dispatch(&mut self, edit: FieldEdit) -> Option<EditOutcome> {
        let label = edit.label();
        match self.form.apply_field_edit(edit) {
            Ok(outcome) => {
                debug!(
                    field = label,
                    revision = outcome.revision,
                    rescaled = outcome.rescaled,
                    "edit applied"
                );
                self.persist();
                Some(outcome)
            }
            Err(err @ EditorError::UnknownRow(_)) => {
                debug!(field = label, error = %err, "edit ignored");
                None
            }
            Err(err) => {
                warn!(field = label, error = %err, "edit failed");
                None
            }
        }
    }

    /// Failures are logged; the in-memory form is kept either way.
    pub fn persist(&mut self) {
        let doc = self.form.serialize();
        if let Err(err) = self.host.write_note(&doc) {
            warn!(error = %err, revision = self.form.revision, "could not write recipe to note");
        }
    }
}
