use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::GistError;
use crate::jobs::Ticket;
use crate::model::{FilePatch, Gist, GistPatch};
use crate::remote::GistGateway;

use super::{Call, ItemEditor, ItemOp, ItemTicket, saved_record};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameEdit {
    pub original: String,
    pub buffer: String,
}

/// Builds the files map for renaming `from` to `to`.
///
/// The renamed entry carries its new filename and its content. Every other
/// file is sent with its content as well, so the update never drops a file.
/// Files whose content was never loaded are sent as empty strings.
pub fn rename_payload(record: &Gist, from: &str, to: &str) -> BTreeMap<String, FilePatch> {
    record
        .files
        .iter()
        .map(|(name, file)| {
            let content = file.content.clone().unwrap_or_default();
            let patch = if name == from {
                FilePatch {
                    filename: Some(to.to_string()),
                    content,
                }
            } else {
                FilePatch::content(content)
            };
            (name.clone(), patch)
        })
        .collect()
}

impl ItemEditor {
    pub fn rename(&self) -> Option<&RenameEdit> {
        self.rename.as_ref()
    }

    /// Refused while any content edit is open or content is loading. Also
    /// refused when some file's content is missing or truncated, since the
    /// update resends every file.
    pub fn begin_rename(&mut self, filename: &str) -> bool {
        if !self.edits.is_empty()
            || self.loading_content
            || !self.full_record.files.contains_key(filename)
            || self.full_record.files.values().any(|f| f.content.is_none() || f.truncated)
        {
            return false;
        }
        self.rename = Some(RenameEdit {
            original: filename.to_string(),
            buffer: filename.to_string(),
        });
        true
    }

    pub fn set_rename_buffer(&mut self, text: &str) {
        if let Some(r) = self.rename.as_mut() {
            r.buffer = text.to_string();
        }
    }

    pub fn cancel_rename(&mut self) {
        if !self.loading_content {
            self.rename = None;
        }
    }

    /// A blank or unchanged name just closes the rename. A name already used
    /// by another file is rejected before anything is sent, and so is a
    /// rename whose file has since disappeared from the record.
    pub fn begin_save_rename(&mut self) -> Result<Option<ItemTicket>, GistError> {
        let Some(edit) = self.rename.as_ref() else {
            return Ok(None);
        };
        if self.loading_content {
            return Ok(None);
        }
        let to = edit.buffer.trim().to_string();
        let from = edit.original.clone();
        if to.is_empty() || to == from {
            self.rename = None;
            return Ok(None);
        }
        if !self.full_record.files.contains_key(&from) {
            self.rename = None;
            return Err(GistError::Validation(format!(
                "file {} no longer exists",
                from
            )));
        }
        if self.full_record.files.contains_key(&to) {
            return Err(GistError::Validation(format!(
                "a file named {} already exists",
                to
            )));
        }

        let files = rename_payload(&self.full_record, &from, &to);
        self.loading_content = true;
        let record_id = self.full_record.id.clone();
        Ok(Some(Ticket {
            op: ItemOp::Rename {
                record_id: record_id.clone(),
                from,
                to,
            },
            call: Call::Update {
                token: self.token.clone(),
                id: record_id,
                patch: GistPatch::files(files),
            },
        }))
    }

    /// Renames one file inline.
    pub fn rename_file(
        &mut self,
        gateway: &dyn GistGateway,
        from: &str,
        to: &str,
    ) -> Result<Arc<Gist>, GistError> {
        if !self.begin_rename(from) {
            return Err(GistError::Validation(format!(
                "file {} cannot be renamed right now",
                from
            )));
        }
        self.set_rename_buffer(to);
        match self.begin_save_rename()? {
            Some(ticket) => saved_record(self.run(gateway, ticket)),
            None => Ok(Arc::clone(self.source())),
        }
    }
}
