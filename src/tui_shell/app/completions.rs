use super::*;

impl App {
    /// Applies whatever finished in the background since the last tick.
    pub(in crate::tui_shell) fn poll_background(&mut self) {
        if let Some(rx) = &self.bootstrap_rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.bootstrap_rx = None;
                    self.apply_bootstrap(outcome);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.bootstrap_rx = None;
                    tracing::warn!("startup check ended without a result");
                    self.apply_bootstrap(BootstrapOutcome {
                        mode: SessionMode::AwaitingCredential,
                        token: String::new(),
                        records: Vec::new(),
                        error: None,
                        source: None,
                    });
                }
            }
        }

        while let Some((purpose, result)) = self.worker.poll() {
            match purpose {
                Pending::Collection(op) => self.apply_collection(op, result),
                Pending::Item(op) => self.apply_item(op, result),
            }
        }
    }

    fn apply_bootstrap(&mut self, outcome: BootstrapOutcome) {
        let source = outcome.source;
        self.collection.apply_bootstrap(outcome);
        if let Some(src) = source {
            tracing::info!(source = ?src, "session restored");
            self.push_output(vec![format!(
                "loaded {} gists",
                self.collection.records().len()
            )]);
        }
        if self.collection.mode().needs_credential()
            && let Some(token) = self.initial_token.take()
        {
            let ticket = self.collection.begin_submit_credential(&token);
            self.dispatch_collection(ticket);
        }
        self.sync_editor();
    }

    fn apply_collection(&mut self, op: CollectionOp, result: Result<Reply, crate::GistError>) {
        let description_for = match &op {
            CollectionOp::UpdateDescription { id, .. } => Some(id.clone()),
            _ => None,
        };
        let done = match &op {
            CollectionOp::SubmitCredential { .. } => None,
            CollectionOp::Refresh => Some("refreshed"),
            CollectionOp::UpdateDescription { .. } => Some("description updated"),
            CollectionOp::Delete { .. } => Some("gist deleted"),
            CollectionOp::Create => Some("gist created"),
        };
        let created = matches!(op, CollectionOp::Create);
        let submitted = matches!(op, CollectionOp::SubmitCredential { .. });

        match self.collection.complete(op, result) {
            Ok(()) => {
                if created {
                    self.create_wizard = None;
                    if let Some(id) = self.collection.records().first().map(|g| g.id.clone()) {
                        self.collection.select(&id);
                    }
                }
                if submitted {
                    if self.collection.mode() == SessionMode::Authenticated {
                        self.push_output(vec![format!(
                            "loaded {} gists",
                            self.collection.records().len()
                        )]);
                    }
                } else if let Some(msg) = done {
                    self.push_output(vec![msg.to_string()]);
                }
            }
            Err(err) => {
                let msg = self
                    .collection
                    .error()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                tracing::debug!("collection call failed: {}", err);
                if created {
                    self.reopen_create(msg);
                } else if !submitted {
                    // The landing screen shows credential errors itself.
                    self.push_error(msg);
                }
            }
        }

        if let Some(id) = description_for
            && let Some(ed) = self.editor.as_mut()
            && ed.record_id() == id
        {
            ed.finish_description_save();
        }
        self.sync_editor();
    }

    fn apply_item(&mut self, op: ItemOp, result: Result<Reply, crate::GistError>) {
        let event = match self.editor.as_mut() {
            Some(ed) => ed.complete(op, result),
            None => {
                let saved = match (&op, result) {
                    (ItemOp::LoadDetail { .. }, _) => None,
                    (_, Ok(Reply::Record(g))) => Some(g),
                    _ => None,
                };
                ItemEvent::Stale { saved }
            }
        };

        match event {
            ItemEvent::None | ItemEvent::Loaded => {}
            ItemEvent::LoadFailed(err) => {
                self.push_error(err.to_string());
            }
            ItemEvent::Updated(gist) => {
                self.collection.replace_record(gist);
                self.push_output(vec!["saved".to_string()]);
            }
            ItemEvent::Failed { alert, error } => {
                self.open_alert(&alert, error.to_string());
            }
            ItemEvent::Stale { saved } => {
                if let Some(g) = saved {
                    self.collection.replace_record(Arc::new(g));
                }
            }
        }
        self.sync_editor();
    }
}
