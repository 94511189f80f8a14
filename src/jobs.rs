//! Gateway calls as values, so controllers can describe a request and let the
//! caller decide whether to run it inline or on a background thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::GistError;
use crate::model::{Gist, GistPatch, NewGist};
use crate::remote::GistGateway;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    List {
        token: String,
    },
    Detail {
        token: String,
        id: String,
    },
    Create {
        token: String,
        gist: NewGist,
    },
    Update {
        token: String,
        id: String,
        patch: GistPatch,
    },
    Delete {
        token: String,
        id: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Records(Vec<Gist>),
    Record(Gist),
    Deleted,
}

impl Call {
    pub fn execute(&self, gateway: &dyn GistGateway) -> Result<Reply, GistError> {
        match self {
            Call::List { token } => gateway.list(token).map(Reply::Records),
            Call::Detail { token, id } => gateway.get_detail(token, id).map(Reply::Record),
            Call::Create { token, gist } => gateway.create(token, gist).map(Reply::Record),
            Call::Update { token, id, patch } => {
                gateway.update(token, id, patch).map(Reply::Record)
            }
            Call::Delete { token, id } => gateway.delete(token, id).map(|()| Reply::Deleted),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Call::List { .. } => "list",
            Call::Detail { .. } => "detail",
            Call::Create { .. } => "create",
            Call::Update { .. } => "update",
            Call::Delete { .. } => "delete",
        }
    }
}

/// A call a controller wants made, tagged with what to do with the reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket<Op> {
    pub op: Op,
    pub call: Call,
}

pub type Completion<P> = (P, Result<Reply, GistError>);

/// Runs each call on its own thread and hands results back in completion
/// order. Calls cannot be cancelled and have no timeout.
pub struct Worker<P> {
    gateway: Arc<dyn GistGateway>,
    tx: Sender<Completion<P>>,
    rx: Receiver<Completion<P>>,
    in_flight: usize,
}

impl<P: Send + 'static> Worker<P> {
    pub fn new(gateway: Arc<dyn GistGateway>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            gateway,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn submit(&mut self, purpose: P, call: Call) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tracing::debug!(call = call.label(), "dispatching gateway call");
        std::thread::spawn(move || {
            let result = call.execute(gateway.as_ref());
            // The receiver only goes away when the UI is shutting down.
            let _ = tx.send((purpose, result));
        });
    }

    /// Next finished call, if any, without blocking.
    pub fn poll(&mut self) -> Option<Completion<P>> {
        let done = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(done)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
