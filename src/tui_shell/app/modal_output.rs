use super::*;

impl App {
    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        self.last_result = Some(ScrollEntry {
            ts: now_clock(),
            kind,
            lines,
        });
    }

    pub(in crate::tui_shell) fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    pub(in crate::tui_shell) fn push_error(&mut self, msg: String) {
        self.push_entry(EntryKind::Error, vec![msg]);
    }

    fn new_modal(title: impl Into<String>, lines: Vec<String>, kind: ModalKind) -> Modal {
        Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind,
            input: Input::default(),
            editor: TextArea::default(),
        }
    }

    pub(super) fn open_modal(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.modal = Some(Self::new_modal(title, lines, ModalKind::Viewer));
    }

    /// A blocking notice. It does not replace a modal the user is typing in;
    /// the message goes to the status line instead.
    pub(super) fn open_alert(&mut self, alert: &str, detail: String) {
        self.push_error(alert.to_string());
        if self.modal.is_none() {
            self.open_modal("Error", vec![alert.to_string(), String::new(), detail]);
        }
    }

    pub(super) fn open_confirm_modal(
        &mut self,
        title: impl Into<String>,
        action: ConfirmAction,
        mut lines: Vec<String>,
    ) {
        lines.push(String::new());
        lines.push("Enter or y to confirm; Esc or n to cancel.".to_string());
        self.modal = Some(Self::new_modal(
            title,
            lines,
            ModalKind::ConfirmAction { action },
        ));
    }

    pub(in crate::tui_shell) fn open_text_input_modal(
        &mut self,
        title: impl Into<String>,
        prompt: impl Into<String>,
        action: TextInputAction,
        initial: Option<String>,
        mut lines: Vec<String>,
    ) {
        lines.push(String::new());
        lines.push("Enter to save; Esc to cancel.".to_string());

        let mut modal = Self::new_modal(
            title,
            lines,
            ModalKind::TextInput {
                action,
                prompt: prompt.into(),
            },
        );
        if let Some(s) = initial {
            modal.input.set(s);
        }
        self.modal = Some(modal);
    }

    pub(super) fn open_editor_modal(
        &mut self,
        title: impl Into<String>,
        target: EditorTarget,
        initial: &str,
    ) {
        let mut modal = Self::new_modal(
            title,
            vec!["Ctrl+S to save; Esc to discard.".to_string()],
            ModalKind::Editor { target },
        );
        modal.editor = TextArea::from_text(initial);
        self.modal = Some(modal);
    }

    pub(in crate::tui_shell) fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub(in crate::tui_shell) fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Esc on a modal: closes it and abandons whatever it was editing.
    pub(in crate::tui_shell) fn dismiss_modal(&mut self) {
        let Some(m) = self.modal.take() else {
            return;
        };
        match m.kind {
            ModalKind::Viewer | ModalKind::ConfirmAction { .. } => {}
            ModalKind::TextInput { action, .. } => match action {
                TextInputAction::Search => {}
                TextInputAction::Description => {
                    if let Some(ed) = self.editor.as_mut() {
                        ed.cancel_description_edit();
                    }
                }
                TextInputAction::Rename => {
                    if let Some(ed) = self.editor.as_mut() {
                        ed.cancel_rename();
                    }
                }
                TextInputAction::NewFileName => {
                    if let Some(ed) = self.editor.as_mut() {
                        ed.cancel_add_file();
                    }
                }
                TextInputAction::CreateDescription
                | TextInputAction::CreateVisibility
                | TextInputAction::CreateFilename => self.cancel_create(),
            },
            ModalKind::Editor { target } => match target {
                EditorTarget::FileContent { filename } => {
                    if let Some(ed) = self.editor.as_mut() {
                        ed.cancel_content_edit(&filename);
                    }
                }
                EditorTarget::NewFileContent => {
                    if let Some(ed) = self.editor.as_mut() {
                        ed.cancel_add_file();
                    }
                }
                EditorTarget::CreateFileContent { .. } => self.cancel_create(),
            },
        }
    }
}
