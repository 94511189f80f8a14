//! The authoritative gist list and the session that owns it.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::GistError;
use crate::jobs::{Call, Reply, Ticket};
use crate::model::{FileContent, Gist, GistPatch, NewGist};
use crate::remote::GistGateway;
use crate::session::{BootstrapOutcome, SessionMode};
use crate::store::CredentialStore;

mod draft;
mod search;

pub use self::draft::{CreateDraft, DraftFile};

const MSG_UPDATE_FAILED: &str = "Failed to update gist. Please check your token permissions.";
const MSG_DELETE_FAILED: &str = "Failed to delete gist.";
const MSG_CREATE_FAILED: &str = "Failed to create gist.";
const MSG_REFRESH_FAILED: &str = "Failed to refresh gists.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionOp {
    SubmitCredential { token: String },
    Refresh,
    UpdateDescription { id: String, description: String },
    Delete { id: String },
    Create,
}

pub type CollectionTicket = Ticket<CollectionOp>;

/// Session mode, credential and record list.
///
/// Records are held as `Arc<Gist>`; every change swaps the `Arc`, so holders
/// of a working copy can detect it with `Arc::ptr_eq`.
pub struct CollectionState {
    store: Arc<dyn CredentialStore>,
    mode: SessionMode,
    token: String,
    records: Vec<Arc<Gist>>,
    error: Option<String>,
    loading: bool,
    creating: bool,
    pending: BTreeSet<String>,
    search: String,
    selected: Option<String>,
}

impl CollectionState {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            mode: SessionMode::Initializing,
            token: String::new(),
            records: Vec::new(),
            error: None,
            loading: false,
            creating: false,
            pending: BTreeSet::new(),
            search: String::new(),
            selected: None,
        }
    }

    pub fn apply_bootstrap(&mut self, outcome: BootstrapOutcome) {
        self.mode = outcome.mode;
        self.token = outcome.token;
        self.records = outcome.records.into_iter().map(Arc::new).collect();
        self.error = outcome.error;
        self.loading = false;
        self.selected = None;
        self.ensure_selection();
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn records(&self) -> &[Arc<Gist>] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&Arc<Gist>> {
        self.records.iter().find(|g| g.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    fn active_token(&self) -> Option<String> {
        if self.mode == SessionMode::Authenticated && !self.token.is_empty() {
            Some(self.token.clone())
        } else {
            None
        }
    }

    pub fn begin_submit_credential(&mut self, token: &str) -> Option<CollectionTicket> {
        let token = token.trim();
        if token.is_empty() || self.loading {
            return None;
        }
        self.token = token.to_string();
        self.loading = true;
        self.error = None;
        if self.mode == SessionMode::CredentialInvalid {
            self.mode = SessionMode::AwaitingCredential;
        }
        Some(Ticket {
            op: CollectionOp::SubmitCredential {
                token: token.to_string(),
            },
            call: Call::List {
                token: token.to_string(),
            },
        })
    }

    pub fn begin_refresh(&mut self) -> Option<CollectionTicket> {
        let token = self.active_token()?;
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(Ticket {
            op: CollectionOp::Refresh,
            call: Call::List { token },
        })
    }

    pub fn begin_update_description(
        &mut self,
        id: &str,
        description: &str,
    ) -> Option<CollectionTicket> {
        let token = self.active_token()?;
        if !self.pending.insert(id.to_string()) {
            return None;
        }
        tracing::debug!(id, "updating description");
        Some(Ticket {
            op: CollectionOp::UpdateDescription {
                id: id.to_string(),
                description: description.to_string(),
            },
            call: Call::Update {
                token,
                id: id.to_string(),
                patch: GistPatch::description(description),
            },
        })
    }

    pub fn begin_delete(&mut self, id: &str) -> Option<CollectionTicket> {
        let token = self.active_token()?;
        if !self.pending.insert(id.to_string()) {
            return None;
        }
        Some(Ticket {
            op: CollectionOp::Delete { id: id.to_string() },
            call: Call::Delete {
                token,
                id: id.to_string(),
            },
        })
    }

    /// Rejects the draft without a call when no file has both a name and
    /// content.
    pub fn begin_create(
        &mut self,
        draft: &CreateDraft,
    ) -> Result<Option<CollectionTicket>, GistError> {
        let files = draft.valid_files();
        if files.is_empty() {
            let err = GistError::Validation(draft::MSG_NO_VALID_FILES.to_string());
            self.error = Some(err.to_string());
            return Err(err);
        }
        let Some(token) = self.active_token() else {
            return Ok(None);
        };
        if self.creating {
            return Ok(None);
        }
        self.creating = true;
        let gist = NewGist {
            description: draft.description.clone(),
            public: draft.public,
            files: files
                .into_iter()
                .map(|f| {
                    (
                        f.filename.clone(),
                        FileContent {
                            content: f.content.clone(),
                        },
                    )
                })
                .collect(),
        };
        Ok(Some(Ticket {
            op: CollectionOp::Create,
            call: Call::Create { token, gist },
        }))
    }

    /// Applies a finished call. Failures leave the list untouched, except a
    /// rejected credential, which is also cleared from the store.
    pub fn complete(
        &mut self,
        op: CollectionOp,
        result: Result<Reply, GistError>,
    ) -> Result<(), GistError> {
        match op {
            CollectionOp::SubmitCredential { token } => {
                if token != self.token {
                    tracing::debug!("ignoring result for a superseded token");
                    return Ok(());
                }
                self.loading = false;
                match result {
                    Ok(Reply::Records(records)) => {
                        self.store.save(&token);
                        self.mode = SessionMode::Authenticated;
                        self.error = None;
                        self.records = records.into_iter().map(Arc::new).collect();
                        self.selected = None;
                        self.ensure_selection();
                        tracing::info!(count = self.records.len(), "token accepted");
                        Ok(())
                    }
                    Ok(other) => {
                        unexpected_reply("submit credential", &other);
                        Ok(())
                    }
                    Err(err) => {
                        tracing::warn!("token rejected: {}", err);
                        self.store.clear();
                        self.token.clear();
                        self.records.clear();
                        self.selected = None;
                        self.mode = SessionMode::CredentialInvalid;
                        self.error = Some(GistError::CredentialInvalid.to_string());
                        Err(GistError::CredentialInvalid)
                    }
                }
            }

            CollectionOp::Refresh => {
                self.loading = false;
                match result {
                    Ok(Reply::Records(records)) => {
                        self.records = records.into_iter().map(Arc::new).collect();
                        self.ensure_selection();
                        Ok(())
                    }
                    Ok(other) => {
                        unexpected_reply("refresh", &other);
                        Ok(())
                    }
                    Err(err) => {
                        self.error = Some(MSG_REFRESH_FAILED.to_string());
                        Err(err)
                    }
                }
            }

            CollectionOp::UpdateDescription { id, description } => {
                self.pending.remove(&id);
                match result {
                    Ok(_) => {
                        if let Some(slot) = self.records.iter_mut().find(|g| g.id == id) {
                            let mut next = Gist::clone(slot);
                            next.description = description;
                            *slot = Arc::new(next);
                        }
                        Ok(())
                    }
                    Err(err) => {
                        tracing::warn!(id = id.as_str(), "description update failed: {}", err);
                        self.error = Some(MSG_UPDATE_FAILED.to_string());
                        Err(err)
                    }
                }
            }

            CollectionOp::Delete { id } => {
                self.pending.remove(&id);
                match result {
                    Ok(_) => {
                        self.records.retain(|g| g.id != id);
                        self.ensure_selection();
                        Ok(())
                    }
                    Err(err) => {
                        tracing::warn!(id = id.as_str(), "delete failed: {}", err);
                        self.error = Some(MSG_DELETE_FAILED.to_string());
                        Err(err)
                    }
                }
            }

            CollectionOp::Create => {
                self.creating = false;
                match result {
                    Ok(Reply::Record(gist)) => {
                        self.records.insert(0, Arc::new(gist));
                        self.ensure_selection();
                        Ok(())
                    }
                    Ok(other) => {
                        unexpected_reply("create", &other);
                        Ok(())
                    }
                    Err(err) => {
                        tracing::warn!("create failed: {}", err);
                        self.error = Some(MSG_CREATE_FAILED.to_string());
                        Err(err)
                    }
                }
            }
        }
    }

    /// Swaps in a record returned by an item-level save. Unknown ids are
    /// ignored.
    pub fn replace_record(&mut self, gist: Arc<Gist>) {
        if let Some(slot) = self.records.iter_mut().find(|g| g.id == gist.id) {
            *slot = gist;
        }
    }

    pub fn logout(&mut self) {
        self.token.clear();
        self.records.clear();
        self.error = None;
        self.loading = false;
        self.creating = false;
        self.pending.clear();
        self.search.clear();
        self.selected = None;
        self.mode = SessionMode::AwaitingCredential;
        self.store.clear();
        tracing::info!("logged out");
    }

    pub fn submit_credential(
        &mut self,
        gateway: &dyn GistGateway,
        token: &str,
    ) -> Result<(), GistError> {
        let ticket = self
            .begin_submit_credential(token)
            .ok_or_else(|| GistError::Validation("a token is required".to_string()))?;
        self.drive(gateway, ticket)
    }

    pub fn refresh(&mut self, gateway: &dyn GistGateway) -> Result<(), GistError> {
        let ticket = self.begin_refresh().ok_or_else(no_session)?;
        self.drive(gateway, ticket)
    }

    pub fn update_description(
        &mut self,
        gateway: &dyn GistGateway,
        id: &str,
        description: &str,
    ) -> Result<(), GistError> {
        let ticket = self
            .begin_update_description(id, description)
            .ok_or_else(no_session)?;
        self.drive(gateway, ticket)
    }

    pub fn delete_record(&mut self, gateway: &dyn GistGateway, id: &str) -> Result<(), GistError> {
        let ticket = self.begin_delete(id).ok_or_else(no_session)?;
        self.drive(gateway, ticket)
    }

    /// Returns the created record on success.
    pub fn create_record(
        &mut self,
        gateway: &dyn GistGateway,
        draft: &CreateDraft,
    ) -> Result<Arc<Gist>, GistError> {
        let ticket = self.begin_create(draft)?.ok_or_else(no_session)?;
        self.drive(gateway, ticket)?;
        self.records.first().cloned().ok_or_else(no_session)
    }

    fn drive(
        &mut self,
        gateway: &dyn GistGateway,
        ticket: CollectionTicket,
    ) -> Result<(), GistError> {
        let result = ticket.call.execute(gateway);
        self.complete(ticket.op, result)
    }
}

fn no_session() -> GistError {
    GistError::Validation("no active session (run `gistdeck login`)".to_string())
}

fn unexpected_reply(what: &str, reply: &Reply) {
    tracing::warn!("unexpected reply for {}: {:?}", what, reply);
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
