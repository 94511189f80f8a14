use super::*;

impl App {
    pub(in crate::tui_shell) fn submit_text_input(&mut self, action: TextInputAction, value: String) {
        match action {
            TextInputAction::Search => {
                self.collection.set_search(&value);
                self.sync_editor();
                let shown = self.collection.visible().len();
                if value.is_empty() {
                    self.push_output(vec!["search cleared".to_string()]);
                } else {
                    self.push_output(vec![format!("{} matching \"{}\"", shown, value)]);
                }
            }

            TextInputAction::Description => self.save_description(value),

            TextInputAction::Rename => self.save_rename(value),

            TextInputAction::NewFileName => {
                let Some(ed) = self.editor.as_mut() else {
                    return;
                };
                let content = ed
                    .new_file_draft()
                    .map(|d| d.content.clone())
                    .unwrap_or_default();
                ed.set_new_file(&value, &content);
                self.open_editor_modal(
                    format!("Add {}", value),
                    EditorTarget::NewFileContent,
                    &content,
                );
            }

            TextInputAction::CreateDescription
            | TextInputAction::CreateVisibility
            | TextInputAction::CreateFilename => self.continue_create_wizard(action, value),
        }
    }

    pub(in crate::tui_shell) fn submit_editor(&mut self, target: EditorTarget, text: String) {
        match target {
            EditorTarget::FileContent { filename } => {
                let Some(ed) = self.editor.as_mut() else {
                    return;
                };
                ed.set_content_buffer(&filename, &text);
                let ticket = ed.begin_save_content(&filename);
                if self.dispatch_item(ticket) {
                    self.push_output(vec![format!("saving {}...", filename)]);
                }
            }

            EditorTarget::NewFileContent => {
                let Some(ed) = self.editor.as_mut() else {
                    return;
                };
                let filename = ed
                    .new_file_draft()
                    .map(|d| d.filename.clone())
                    .unwrap_or_default();
                ed.set_new_file(&filename, &text);
                let ticket = ed.begin_save_new_file();
                if self.dispatch_item(ticket) {
                    self.push_output(vec![format!("adding {}...", filename.trim())]);
                } else {
                    self.push_error("a filename is required".to_string());
                }
            }

            EditorTarget::CreateFileContent { filename } => self.finish_create_file(filename, text),
        }
    }

    fn save_description(&mut self, value: String) {
        let Some(ed) = self.editor.as_mut() else {
            return;
        };
        ed.set_description_buffer(&value);
        let Some((id, text)) = ed.begin_save_description() else {
            return;
        };
        match self.collection.begin_update_description(&id, &text) {
            Some(t) => {
                self.worker.submit(Pending::Collection(t.op), t.call);
            }
            None => {
                if let Some(ed) = self.editor.as_mut() {
                    ed.finish_description_save();
                }
                self.push_error("an update for this gist is already running".to_string());
            }
        }
    }

    fn save_rename(&mut self, value: String) {
        let Some(ed) = self.editor.as_mut() else {
            return;
        };
        ed.set_rename_buffer(&value);
        match ed.begin_save_rename() {
            Ok(Some(t)) => {
                self.worker.submit(Pending::Item(t.op), t.call);
                self.push_output(vec![format!("renaming to {}...", value)]);
            }
            Ok(None) => {}
            Err(err) if ed.rename().is_none() => {
                self.push_error(err.to_string());
            }
            Err(err) => {
                // Keep the rename open so the name can be corrected.
                self.open_text_input_modal(
                    "Rename file",
                    "filename> ",
                    TextInputAction::Rename,
                    Some(value),
                    vec![],
                );
                if let Some(m) = self.modal_mut() {
                    modal::append_modal_error(m, err.to_string());
                }
            }
        }
    }
}
