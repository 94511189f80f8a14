//! Per-file content edits and the add-file form for empty gists.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::GistError;
use crate::jobs::Ticket;
use crate::model::{FilePatch, Gist, GistPatch};
use crate::remote::GistGateway;

use super::{Call, FileEdit, FilePhase, ItemEditor, ItemOp, ItemTicket, saved_record};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewFileDraft {
    pub filename: String,
    pub content: String,
    pub saving: bool,
}

impl ItemEditor {
    pub fn file_phase(&self, filename: &str) -> FilePhase {
        match self.edits.get(filename) {
            None => FilePhase::Viewing,
            Some(e) if e.saving => FilePhase::Saving,
            Some(_) => FilePhase::Editing,
        }
    }

    pub fn content_buffer(&self, filename: &str) -> Option<&str> {
        self.edits.get(filename).map(|e| e.buffer.as_str())
    }

    pub fn has_open_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Opens an edit seeded with the file's content (empty when the file has
    /// none yet). An edit that is already open keeps its buffer.
    pub fn begin_content_edit(&mut self, filename: &str) -> bool {
        let Some(file) = self.full_record.files.get(filename) else {
            return false;
        };
        if !self.edits.contains_key(filename) {
            self.edits.insert(
                filename.to_string(),
                FileEdit {
                    buffer: file.content.clone().unwrap_or_default(),
                    saving: false,
                },
            );
        }
        true
    }

    pub fn set_content_buffer(&mut self, filename: &str, text: &str) {
        if let Some(e) = self.edits.get_mut(filename)
            && !e.saving
        {
            e.buffer = text.to_string();
        }
    }

    pub fn cancel_content_edit(&mut self, filename: &str) {
        if self.file_phase(filename) == FilePhase::Editing {
            self.edits.remove(filename);
        }
    }

    pub fn begin_save_content(&mut self, filename: &str) -> Option<ItemTicket> {
        let edit = self.edits.get_mut(filename)?;
        if edit.saving {
            return None;
        }
        edit.saving = true;
        let files = BTreeMap::from([(filename.to_string(), FilePatch::content(edit.buffer.clone()))]);
        Some(Ticket {
            op: ItemOp::SaveContent {
                record_id: self.full_record.id.clone(),
                filename: filename.to_string(),
            },
            call: Call::Update {
                token: self.token.clone(),
                id: self.full_record.id.clone(),
                patch: GistPatch::files(files),
            },
        })
    }

    pub fn new_file_draft(&self) -> Option<&NewFileDraft> {
        self.new_file.as_ref()
    }

    /// Only offered when the gist has no files at all.
    pub fn begin_add_file(&mut self) -> bool {
        if !self.full_record.files.is_empty() {
            return false;
        }
        if self.new_file.is_none() {
            self.new_file = Some(NewFileDraft::default());
        }
        true
    }

    pub fn set_new_file(&mut self, filename: &str, content: &str) {
        if let Some(d) = self.new_file.as_mut()
            && !d.saving
        {
            d.filename = filename.to_string();
            d.content = content.to_string();
        }
    }

    pub fn cancel_add_file(&mut self) {
        if self.new_file.as_ref().is_some_and(|d| !d.saving) {
            self.new_file = None;
        }
    }

    /// `None` when the filename is blank or a save is already running.
    pub fn begin_save_new_file(&mut self) -> Option<ItemTicket> {
        let draft = self.new_file.as_mut()?;
        let filename = draft.filename.trim().to_string();
        if filename.is_empty() || draft.saving {
            return None;
        }
        draft.saving = true;
        let files = BTreeMap::from([(filename.clone(), FilePatch::content(draft.content.clone()))]);
        Some(Ticket {
            op: ItemOp::AddFile {
                record_id: self.full_record.id.clone(),
                filename,
            },
            call: Call::Update {
                token: self.token.clone(),
                id: self.full_record.id.clone(),
                patch: GistPatch::files(files),
            },
        })
    }

    /// Opens, fills and saves one file's content inline.
    pub fn save_content(
        &mut self,
        gateway: &dyn GistGateway,
        filename: &str,
        content: &str,
    ) -> Result<Arc<Gist>, GistError> {
        if !self.begin_content_edit(filename) {
            return Err(GistError::Validation(format!(
                "file {} not found in gist {}",
                filename, self.full_record.id
            )));
        }
        self.set_content_buffer(filename, content);
        let ticket = self
            .begin_save_content(filename)
            .ok_or_else(|| GistError::Validation("a save is already running".to_string()))?;
        saved_record(self.run(gateway, ticket))
    }

    /// Adds the first file of an empty gist inline.
    pub fn add_file(
        &mut self,
        gateway: &dyn GistGateway,
        filename: &str,
        content: &str,
    ) -> Result<Arc<Gist>, GistError> {
        if !self.begin_add_file() {
            return Err(GistError::Validation(
                "files can only be added to a gist with no files".to_string(),
            ));
        }
        self.set_new_file(filename, content);
        let ticket = self
            .begin_save_new_file()
            .ok_or_else(|| GistError::Validation("a filename is required".to_string()))?;
        saved_record(self.run(gateway, ticket))
    }
}
