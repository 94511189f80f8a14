//! Working copy and edit state machines for the selected gist.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::GistError;
use crate::jobs::{Call, Reply, Ticket};
use crate::model::Gist;
use crate::remote::GistGateway;

mod description;
mod files;
mod rename;

pub use self::description::DescriptionEdit;
pub use self::files::NewFileDraft;
pub use self::rename::{RenameEdit, rename_payload};

const ALERT_SAVE_FAILED: &str = "Failed to save changes. Please try again.";
const ALERT_RENAME_FAILED: &str = "Failed to update filename on GitHub.";
const ALERT_ADD_FAILED: &str = "Failed to add file. Please try again.";

/// Per-file edit phase. A file with no open edit is `Viewing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilePhase {
    Viewing,
    Editing,
    Saving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct FileEdit {
    buffer: String,
    saving: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemOp {
    LoadDetail {
        record_id: String,
    },
    SaveContent {
        record_id: String,
        filename: String,
    },
    Rename {
        record_id: String,
        from: String,
        to: String,
    },
    AddFile {
        record_id: String,
        filename: String,
    },
}

impl ItemOp {
    pub fn record_id(&self) -> &str {
        match self {
            ItemOp::LoadDetail { record_id }
            | ItemOp::SaveContent { record_id, .. }
            | ItemOp::Rename { record_id, .. }
            | ItemOp::AddFile { record_id, .. } => record_id,
        }
    }
}

pub type ItemTicket = Ticket<ItemOp>;

/// What the owner of the record list should do after a completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemEvent {
    None,
    /// Detail content replaced the working copy.
    Loaded,
    /// Detail fetch failed; content stays unloaded.
    LoadFailed(GistError),
    /// The record changed remotely; the list should swap it in.
    Updated(Arc<Gist>),
    /// A save failed. The edit stays open with its buffer.
    Failed { alert: String, error: GistError },
    /// The result targets a record this editor no longer holds. A saved
    /// record is handed back so the list can still be updated.
    Stale { saved: Option<Gist> },
}

/// Edit state for one selected gist.
///
/// `full_record` is a working copy of the list's record. It is replaced when
/// the list swaps its record (`sync`) or when a detail load or save returns.
pub struct ItemEditor {
    source: Arc<Gist>,
    full_record: Gist,
    token: String,
    loading_content: bool,
    detail_requested: bool,
    description: Option<DescriptionEdit>,
    edits: BTreeMap<String, FileEdit>,
    rename: Option<RenameEdit>,
    new_file: Option<NewFileDraft>,
}

impl ItemEditor {
    pub fn new(source: Arc<Gist>, token: &str) -> Self {
        Self {
            full_record: Gist::clone(&source),
            source,
            token: token.to_string(),
            loading_content: false,
            detail_requested: false,
            description: None,
            edits: BTreeMap::new(),
            rename: None,
            new_file: None,
        }
    }

    pub fn record_id(&self) -> &str {
        &self.full_record.id
    }

    pub fn record(&self) -> &Gist {
        &self.full_record
    }

    pub fn source(&self) -> &Arc<Gist> {
        &self.source
    }

    pub fn is_loading_content(&self) -> bool {
        self.loading_content
    }

    /// Resets the working copy when the list swapped the record out. Open
    /// content edits are dropped, as is any state tied to the old copy: a
    /// rename whose file is gone and an add-file draft once files exist.
    pub fn sync(&mut self, latest: &Arc<Gist>) {
        if Arc::ptr_eq(&self.source, latest) {
            return;
        }
        tracing::debug!(id = latest.id.as_str(), "record swapped; resyncing editor");
        self.source = Arc::clone(latest);
        self.full_record = Gist::clone(latest);
        self.detail_requested = false;
        self.edits.clear();
        if !self.loading_content
            && self
                .rename
                .as_ref()
                .is_some_and(|r| !latest.files.contains_key(&r.original))
        {
            self.rename = None;
        }
        if !latest.files.is_empty() && self.new_file.as_ref().is_some_and(|d| !d.saving) {
            self.new_file = None;
        }
        if let Some(d) = self.description.as_mut()
            && !d.updating
        {
            d.buffer = latest.description.clone();
        }
    }

    /// Requests the detail endpoint when the primary file has no content.
    /// Issued at most once per working copy.
    pub fn begin_detail_load(&mut self) -> Option<ItemTicket> {
        if self.loading_content || self.detail_requested || !self.full_record.needs_detail()
        {
            return None;
        }
        self.loading_content = true;
        self.detail_requested = true;
        let record_id = self.full_record.id.clone();
        Some(Ticket {
            op: ItemOp::LoadDetail {
                record_id: record_id.clone(),
            },
            call: Call::Detail {
                token: self.token.clone(),
                id: record_id,
            },
        })
    }

    fn adopt(&mut self, gist: Gist) -> Arc<Gist> {
        let arc = Arc::new(gist);
        self.source = Arc::clone(&arc);
        self.full_record = Gist::clone(&arc);
        arc
    }

    pub fn complete(&mut self, op: ItemOp, result: Result<Reply, GistError>) -> ItemEvent {
        if op.record_id() != self.full_record.id {
            tracing::debug!(
                target_id = op.record_id(),
                current_id = self.full_record.id.as_str(),
                "discarding result for a deselected record"
            );
            let saved = match (&op, result) {
                (ItemOp::LoadDetail { .. }, _) => None,
                (_, Ok(Reply::Record(g))) => Some(g),
                _ => None,
            };
            return ItemEvent::Stale { saved };
        }

        match op {
            ItemOp::LoadDetail { .. } => {
                self.loading_content = false;
                match result {
                    Ok(Reply::Record(g)) => {
                        self.full_record = g;
                        ItemEvent::Loaded
                    }
                    Ok(other) => {
                        tracing::warn!("unexpected reply for detail load: {:?}", other);
                        ItemEvent::None
                    }
                    Err(err) => {
                        tracing::warn!(
                            id = self.full_record.id.as_str(),
                            "detail load failed: {}",
                            err
                        );
                        ItemEvent::LoadFailed(err)
                    }
                }
            }

            ItemOp::SaveContent { filename, .. } => match result {
                Ok(Reply::Record(g)) => {
                    self.edits.remove(&filename);
                    ItemEvent::Updated(self.adopt(g))
                }
                Ok(other) => {
                    tracing::warn!("unexpected reply for content save: {:?}", other);
                    ItemEvent::None
                }
                Err(error) => {
                    if let Some(edit) = self.edits.get_mut(&filename) {
                        edit.saving = false;
                    }
                    ItemEvent::Failed {
                        alert: ALERT_SAVE_FAILED.to_string(),
                        error,
                    }
                }
            },

            ItemOp::Rename { .. } => {
                self.loading_content = false;
                match result {
                    Ok(Reply::Record(g)) => {
                        self.rename = None;
                        // Same as a resync: unsaved buffers of other files go.
                        self.edits.clear();
                        ItemEvent::Updated(self.adopt(g))
                    }
                    Ok(other) => {
                        tracing::warn!("unexpected reply for rename: {:?}", other);
                        ItemEvent::None
                    }
                    Err(error) => ItemEvent::Failed {
                        alert: ALERT_RENAME_FAILED.to_string(),
                        error,
                    },
                }
            }

            ItemOp::AddFile { .. } => match result {
                Ok(Reply::Record(g)) => {
                    self.new_file = None;
                    ItemEvent::Updated(self.adopt(g))
                }
                Ok(other) => {
                    tracing::warn!("unexpected reply for add file: {:?}", other);
                    ItemEvent::None
                }
                Err(error) => {
                    if let Some(d) = self.new_file.as_mut() {
                        d.saving = false;
                    }
                    ItemEvent::Failed {
                        alert: ALERT_ADD_FAILED.to_string(),
                        error,
                    }
                }
            },
        }
    }

    /// Runs a ticket inline.
    pub fn run(&mut self, gateway: &dyn GistGateway, ticket: ItemTicket) -> ItemEvent {
        let result = ticket.call.execute(gateway);
        self.complete(ticket.op, result)
    }

    /// Loads detail content inline if it is missing.
    pub fn load_detail(&mut self, gateway: &dyn GistGateway) -> Result<(), GistError> {
        let Some(ticket) = self.begin_detail_load() else {
            return Ok(());
        };
        match self.run(gateway, ticket) {
            ItemEvent::LoadFailed(err) => Err(err),
            _ => Ok(()),
        }
    }
}

/// Collapses an inline save into the saved record or its error.
pub fn saved_record(event: ItemEvent) -> Result<Arc<Gist>, GistError> {
    match event {
        ItemEvent::Updated(g) => Ok(g),
        ItemEvent::Failed { error, .. } | ItemEvent::LoadFailed(error) => Err(error),
        other => Err(GistError::Validation(format!("nothing was saved ({:?})", other))),
    }
}

#[cfg(test)]
#[path = "tests/editing_tests.rs"]
mod tests;
