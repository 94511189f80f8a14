use super::*;

/// The create form, filled one prompt at a time. The draft survives a failed
/// submission so the user can retry without retyping.
#[derive(Clone, Debug, Default)]
pub(in crate::tui_shell) struct CreateWizard {
    pub(in crate::tui_shell) draft: CreateDraft,
    pub(in crate::tui_shell) submitted: bool,
}

impl App {
    pub(in crate::tui_shell) fn start_create(&mut self) {
        if self.collection.is_creating() {
            self.push_error("a gist is already being created".to_string());
            return;
        }
        let wizard = self.create_wizard.get_or_insert_with(CreateWizard::default);
        wizard.submitted = false;
        let initial = Some(wizard.draft.description.clone()).filter(|d| !d.is_empty());
        self.open_text_input_modal(
            "New gist",
            "description> ",
            TextInputAction::CreateDescription,
            initial,
            vec!["Description (optional).".to_string()],
        );
    }

    pub(in crate::tui_shell) fn cancel_create(&mut self) {
        if self.create_wizard.as_ref().is_some_and(|w| !w.submitted) {
            self.create_wizard = None;
        }
    }

    pub(in crate::tui_shell) fn continue_create_wizard(
        &mut self,
        action: TextInputAction,
        value: String,
    ) {
        let Some(w) = self.create_wizard.as_mut() else {
            self.push_error("create wizard not active".to_string());
            return;
        };

        match action {
            TextInputAction::CreateDescription => {
                w.draft.description = value;
                let initial = if w.draft.public { "y" } else { "n" };
                self.open_text_input_modal(
                    "New gist",
                    "public? [y/N]> ",
                    TextInputAction::CreateVisibility,
                    Some(initial.to_string()),
                    vec!["Secret gists are only visible through their URL.".to_string()],
                );
            }
            TextInputAction::CreateVisibility => {
                w.draft.public = matches!(value.to_lowercase().as_str(), "y" | "yes" | "public");
                self.open_create_filename_step(None);
            }
            TextInputAction::CreateFilename => {
                if value.is_empty() {
                    self.submit_create();
                    return;
                }
                let initial = w
                    .draft
                    .files
                    .iter()
                    .find(|f| f.filename == value)
                    .map(|f| f.content.clone())
                    .unwrap_or_default();
                self.open_editor_modal(
                    format!("New gist: {}", value),
                    EditorTarget::CreateFileContent { filename: value },
                    &initial,
                );
            }
            _ => {}
        }
    }

    fn open_create_filename_step(&mut self, note: Option<String>) {
        let Some(w) = self.create_wizard.as_ref() else {
            return;
        };
        let mut lines = Vec::new();
        if let Some(n) = note {
            lines.push(n);
        }
        if w.draft.files.is_empty() {
            lines.push("No files yet.".to_string());
        } else {
            lines.push("Files:".to_string());
            for f in &w.draft.files {
                lines.push(format!("  {} ({} chars)", f.filename, f.content.chars().count()));
            }
        }
        lines.push(String::new());
        lines.push("Filename to add, or leave empty to create the gist.".to_string());
        self.open_text_input_modal(
            "New gist",
            "filename> ",
            TextInputAction::CreateFilename,
            None,
            lines,
        );
    }

    pub(in crate::tui_shell) fn finish_create_file(&mut self, filename: String, content: String) {
        let Some(w) = self.create_wizard.as_mut() else {
            return;
        };
        // Re-entering a filename replaces its content.
        w.draft.files.retain(|f| f.filename != filename);
        w.draft.files.push(DraftFile::new(filename, content));
        self.open_create_filename_step(None);
    }

    fn submit_create(&mut self) {
        let Some(w) = self.create_wizard.as_mut() else {
            return;
        };
        w.submitted = true;
        let draft = w.draft.clone();
        match self.collection.begin_create(&draft) {
            Ok(ticket) => {
                if self.dispatch_collection(ticket) {
                    self.push_output(vec!["creating gist...".to_string()]);
                } else {
                    self.reopen_create("a gist is already being created".to_string());
                }
            }
            Err(err) => self.reopen_create(err.to_string()),
        }
    }

    /// Back to the filename prompt with the draft intact.
    pub(in crate::tui_shell) fn reopen_create(&mut self, msg: String) {
        if let Some(w) = self.create_wizard.as_mut() {
            w.submitted = false;
        }
        self.push_error(msg.clone());
        if self.modal.is_none() {
            self.open_create_filename_step(Some(format!("error: {}", msg)));
        }
    }
}
