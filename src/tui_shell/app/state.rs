use super::*;

/// What a background call was for, so its reply reaches the right
/// controller.
pub(in crate::tui_shell) enum Pending {
    Collection(CollectionOp),
    Item(ItemOp),
}

pub(in crate::tui_shell) struct App {
    pub(in crate::tui_shell) ctx: AppContext,
    pub(in crate::tui_shell) collection: CollectionState,
    pub(in crate::tui_shell) editor: Option<ItemEditor>,
    /// Index into the selected record's files (name order).
    pub(in crate::tui_shell) focus_file: usize,

    pub(in crate::tui_shell) worker: Worker<Pending>,
    pub(in crate::tui_shell) bootstrap_rx: Option<Receiver<BootstrapOutcome>>,
    /// `--token`, submitted once startup settles without a session.
    pub(in crate::tui_shell) initial_token: Option<String>,

    pub(in crate::tui_shell) create_wizard: Option<CreateWizard>,
    pub(in crate::tui_shell) modal: Option<Modal>,

    pub(in crate::tui_shell) input: Input,
    pub(in crate::tui_shell) last_result: Option<ScrollEntry>,

    pub(in crate::tui_shell) quit: bool,
}

impl App {
    pub(in crate::tui_shell) fn load(opts: crate::tui::TuiRunOptions) -> Result<Self> {
        let ctx = AppContext::open(opts.state_dir, opts.api_url.as_deref(), opts.ephemeral)?;
        if let Some(path) = ctx.store.log_path() {
            crate::logging::init_file(&path)?;
        }
        tracing::info!(api = ctx.gateway.base_url(), "tui starting");

        let (tx, rx) = mpsc::channel();
        let boot = ctx.clone();
        std::thread::spawn(move || {
            // Dropped receiver means the UI already quit.
            let _ = tx.send(boot.bootstrap(true));
        });

        Ok(Self {
            collection: CollectionState::new(ctx.store.clone()),
            worker: Worker::new(ctx.gateway.clone()),
            ctx,
            editor: None,
            focus_file: 0,
            bootstrap_rx: Some(rx),
            initial_token: opts.token.filter(|t| !t.trim().is_empty()),
            create_wizard: None,
            modal: None,
            input: Input::default(),
            last_result: None,
            quit: false,
        })
    }

    pub(in crate::tui_shell) fn on_landing(&self) -> bool {
        self.collection.mode() != SessionMode::Authenticated
    }

    pub(in crate::tui_shell) fn persisted(&self) -> bool {
        self.ctx.store.root().is_some()
    }

    pub(super) fn dispatch_collection(&mut self, ticket: Option<CollectionTicket>) -> bool {
        let Some(t) = ticket else {
            return false;
        };
        self.worker.submit(Pending::Collection(t.op), t.call);
        true
    }

    pub(super) fn dispatch_item(&mut self, ticket: Option<ItemTicket>) -> bool {
        let Some(t) = ticket else {
            return false;
        };
        self.worker.submit(Pending::Item(t.op), t.call);
        true
    }

    /// Points the editor at the current selection. A different record gets a
    /// fresh editor; the same record is resynced if the list swapped it. Then
    /// missing content is requested.
    pub(in crate::tui_shell) fn sync_editor(&mut self) {
        let Some(rec) = self.collection.selected_record().cloned() else {
            self.editor = None;
            self.focus_file = 0;
            return;
        };
        let same = self
            .editor
            .as_ref()
            .is_some_and(|ed| ed.record_id() == rec.id);
        if same {
            if let Some(ed) = self.editor.as_mut() {
                ed.sync(&rec);
            }
        } else {
            self.editor = Some(ItemEditor::new(rec, self.collection.token()));
            self.focus_file = 0;
        }

        if let Some(ed) = self.editor.as_mut() {
            let count = ed.record().files.len();
            self.focus_file = self.focus_file.min(count.saturating_sub(1));
            if let Some(t) = ed.begin_detail_load() {
                self.worker.submit(Pending::Item(t.op), t.call);
            }
        }
    }

    pub(in crate::tui_shell) fn focused_filename(&self) -> Option<String> {
        let ed = self.editor.as_ref()?;
        ed.record().files.keys().nth(self.focus_file).cloned()
    }
}
