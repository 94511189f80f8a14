//! Scripted gateway and record builders shared by the unit tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use crate::error::GistError;
use crate::jobs::{Call, Reply};
use crate::model::{Gist, GistFile, GistPatch, NewGist};
use crate::remote::GistGateway;

/// Answers calls from a queue of scripted replies, in order, and records
/// every call it receives.
#[derive(Default)]
pub(crate) struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Result<Reply, GistError>>>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, r: Result<Reply, GistError>) -> Self {
        self.replies.lock().unwrap().push_back(r);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Call) -> Result<Reply, GistError> {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GistError::fetch("fake", "no scripted reply")))
    }
}

impl GistGateway for FakeGateway {
    fn list(&self, token: &str) -> Result<Vec<Gist>, GistError> {
        match self.next(Call::List {
            token: token.to_string(),
        })? {
            Reply::Records(r) => Ok(r),
            other => panic!("list got {:?}", other),
        }
    }

    fn get_detail(&self, token: &str, id: &str) -> Result<Gist, GistError> {
        match self.next(Call::Detail {
            token: token.to_string(),
            id: id.to_string(),
        })? {
            Reply::Record(g) => Ok(g),
            other => panic!("detail got {:?}", other),
        }
    }

    fn create(&self, token: &str, gist: &NewGist) -> Result<Gist, GistError> {
        match self.next(Call::Create {
            token: token.to_string(),
            gist: gist.clone(),
        })? {
            Reply::Record(g) => Ok(g),
            other => panic!("create got {:?}", other),
        }
    }

    fn update(&self, token: &str, id: &str, patch: &GistPatch) -> Result<Gist, GistError> {
        match self.next(Call::Update {
            token: token.to_string(),
            id: id.to_string(),
            patch: patch.clone(),
        })? {
            Reply::Record(g) => Ok(g),
            other => panic!("update got {:?}", other),
        }
    }

    fn delete(&self, token: &str, id: &str) -> Result<(), GistError> {
        match self.next(Call::Delete {
            token: token.to_string(),
            id: id.to_string(),
        })? {
            Reply::Deleted => Ok(()),
            other => panic!("delete got {:?}", other),
        }
    }
}

pub(crate) fn file(name: &str, content: Option<&str>) -> GistFile {
    GistFile {
        filename: name.to_string(),
        file_type: "text/plain".to_string(),
        language: None,
        raw_url: format!("https://gist.example/raw/{}", name),
        size: content.map(|c| c.len() as u64).unwrap_or(0),
        content: content.map(str::to_string),
        truncated: false,
    }
}

/// A gist whose files are `(name, content)` pairs; `None` content means the
/// list endpoint's shape, before detail is loaded.
pub(crate) fn gist(id: &str, description: &str, files: &[(&str, Option<&str>)]) -> Gist {
    Gist {
        id: id.to_string(),
        html_url: format!("https://gist.example/{}", id),
        description: description.to_string(),
        is_public: false,
        created_at: "2024-01-02T03:04:05Z".to_string(),
        updated_at: "2024-01-02T03:04:05Z".to_string(),
        files: files
            .iter()
            .map(|(name, content)| (name.to_string(), file(name, *content)))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(crate) fn rejected(status: u16) -> GistError {
    GistError::Fetch {
        action: "fake",
        status: Some(status),
        status_text: "Rejected".to_string(),
    }
}
