use super::*;

impl App {
    pub(in crate::tui_shell) fn submit_token(&mut self) {
        if self.collection.mode() == SessionMode::Initializing {
            self.push_error("still checking for a saved token".to_string());
            return;
        }
        let token = self.input.buf.trim().to_string();
        if token.is_empty() {
            return;
        }
        let ticket = self.collection.begin_submit_credential(&token);
        if self.dispatch_collection(ticket) {
            self.input.clear();
        }
    }

    pub(in crate::tui_shell) fn move_selection(&mut self, delta: isize) {
        self.collection.select_offset(delta);
        self.sync_editor();
    }

    pub(in crate::tui_shell) fn cycle_focus_file(&mut self, delta: isize) {
        let count = self
            .editor
            .as_ref()
            .map(|ed| ed.record().files.len())
            .unwrap_or(0);
        if count == 0 {
            return;
        }
        let next = (self.focus_file as isize + delta).rem_euclid(count as isize);
        self.focus_file = next as usize;
    }

    pub(in crate::tui_shell) fn start_search(&mut self) {
        let current = Some(self.collection.search().to_string()).filter(|s| !s.is_empty());
        self.open_text_input_modal(
            "Search",
            "search> ",
            TextInputAction::Search,
            current,
            vec!["Matches descriptions and filenames; empty clears.".to_string()],
        );
    }

    pub(in crate::tui_shell) fn start_description_edit(&mut self) {
        let Some(ed) = self.editor.as_mut() else {
            return;
        };
        if ed.description_edit().is_some_and(|d| d.updating) {
            self.push_error("description update in progress".to_string());
            return;
        }
        ed.begin_description_edit();
        let initial = ed.description_edit().map(|d| d.buffer.clone());
        self.open_text_input_modal(
            "Description",
            "description> ",
            TextInputAction::Description,
            initial,
            vec![],
        );
    }

    pub(in crate::tui_shell) fn start_delete(&mut self) {
        let Some(rec) = self.collection.selected_record().cloned() else {
            return;
        };
        if self.collection.is_pending(&rec.id) {
            self.push_error("this gist is already being updated".to_string());
            return;
        }
        self.open_confirm_modal(
            "Delete gist",
            ConfirmAction::Delete { id: rec.id.clone() },
            vec![
                format!("Delete \"{}\"?", rec.title()),
                "This cannot be undone.".to_string(),
            ],
        );
    }

    pub(in crate::tui_shell) fn execute_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::Delete { id } => {
                let ticket = self.collection.begin_delete(&id);
                if self.dispatch_collection(ticket) {
                    self.push_output(vec!["deleting gist...".to_string()]);
                }
            }
        }
    }

    pub(in crate::tui_shell) fn start_content_edit(&mut self) {
        let Some(filename) = self.focused_filename() else {
            self.push_error("this gist has no files; press a to add one".to_string());
            return;
        };
        let Some(ed) = self.editor.as_mut() else {
            return;
        };
        if ed.is_loading_content() {
            self.push_error("content is still loading".to_string());
            return;
        }
        if ed.file_phase(&filename) == crate::editing::FilePhase::Saving {
            self.push_error(format!("{} is being saved", filename));
            return;
        }
        if !ed.begin_content_edit(&filename) {
            return;
        }
        let initial = ed.content_buffer(&filename).unwrap_or_default().to_string();
        self.open_editor_modal(
            format!("Edit {}", filename),
            EditorTarget::FileContent { filename },
            &initial,
        );
    }

    pub(in crate::tui_shell) fn start_rename(&mut self) {
        let Some(filename) = self.focused_filename() else {
            return;
        };
        let Some(ed) = self.editor.as_mut() else {
            return;
        };
        // A rename that failed stays open; resume it.
        let resumed = ed
            .rename()
            .filter(|r| r.original == filename)
            .map(|r| r.buffer.clone());
        let initial = match resumed {
            Some(buf) => buf,
            None => {
                if !ed.begin_rename(&filename) {
                    self.push_error(
                        "finish or cancel open edits before renaming".to_string(),
                    );
                    return;
                }
                filename.clone()
            }
        };
        self.open_text_input_modal(
            "Rename file",
            "filename> ",
            TextInputAction::Rename,
            Some(initial),
            vec![format!("Renaming {}", filename)],
        );
    }

    pub(in crate::tui_shell) fn start_add_file(&mut self) {
        let Some(ed) = self.editor.as_mut() else {
            return;
        };
        if !ed.begin_add_file() {
            self.push_error("files can only be added to an empty gist".to_string());
            return;
        }
        let initial = ed
            .new_file_draft()
            .map(|d| d.filename.clone())
            .filter(|f| !f.is_empty());
        self.open_text_input_modal(
            "Add file",
            "filename> ",
            TextInputAction::NewFileName,
            initial,
            vec![],
        );
    }

    pub(in crate::tui_shell) fn show_details(&mut self) {
        let Some(ed) = self.editor.as_ref() else {
            return;
        };
        let g = ed.record();
        let mut lines = vec![
            format!("id: {}", g.id),
            format!("url: {}", g.html_url),
            format!("visibility: {}", if g.is_public { "public" } else { "secret" }),
            format!("created: {}", fmt_date(&g.created_at)),
            format!("updated: {}", fmt_date(&g.updated_at)),
            format!("description: {}", g.description),
            String::new(),
        ];
        for f in g.files.values() {
            lines.push(format!(
                "{}  {}  {} bytes{}",
                f.filename,
                f.language.as_deref().unwrap_or(&f.file_type),
                f.size,
                if f.truncated { "  (truncated)" } else { "" }
            ));
        }
        self.open_modal("Gist", lines);
    }

    pub(in crate::tui_shell) fn copy_content(&mut self) {
        let Some(ed) = self.editor.as_ref() else {
            return;
        };
        if ed.is_loading_content() || ed.record().needs_detail() {
            self.push_error("content is still loading".to_string());
            return;
        }
        let text = ed.record().combined_content();
        self.copy_to_clipboard("content", &text);
    }

    pub(in crate::tui_shell) fn copy_url(&mut self) {
        let Some(ed) = self.editor.as_ref() else {
            return;
        };
        let url = ed.record().html_url.clone();
        self.copy_to_clipboard("url", &url);
    }

    fn copy_to_clipboard(&mut self, what: &str, text: &str) {
        match crate::tui_shell::clipboard::copy(text) {
            Ok(program) => {
                tracing::debug!(program, what, "copied to clipboard");
                self.push_output(vec![format!("Copied! ({})", what)]);
            }
            Err(err) => {
                tracing::warn!("clipboard copy failed: {:#}", err);
                self.push_error(format!("Failed to copy: {:#}", err));
            }
        }
    }

    pub(in crate::tui_shell) fn refresh(&mut self) {
        let ticket = self.collection.begin_refresh();
        if self.dispatch_collection(ticket) {
            self.push_output(vec!["refreshing...".to_string()]);
        }
    }

    pub(in crate::tui_shell) fn logout(&mut self) {
        self.collection.logout();
        self.editor = None;
        self.create_wizard = None;
        self.focus_file = 0;
        self.input.clear();
        self.push_output(vec!["logged out".to_string()]);
    }
}
