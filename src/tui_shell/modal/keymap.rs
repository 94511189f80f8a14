use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::{ConfirmAction, EditorTarget, Modal, ModalKind, TextInputAction};
use super::text_input_validate::{allow_empty_text_input, validate_text_input};

pub(super) enum ModalAction {
    None,
    Close,
    Confirm(ConfirmAction),
    SubmitTextInput {
        action: TextInputAction,
        value: String,
    },
    SubmitEditor {
        target: EditorTarget,
        text: String,
    },
}

pub(super) fn map_modal_key(modal: &mut Modal, key: KeyEvent) -> ModalAction {
    match &modal.kind {
        ModalKind::Viewer => handle_viewer_like_key(modal, key),

        ModalKind::TextInput { action, .. } => {
            let action = *action;
            match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => {
                    let raw = modal.input.buf.trim().to_string();
                    if raw.is_empty() && !allow_empty_text_input(&action) {
                        append_modal_error(modal, "value required".to_string());
                        return ModalAction::None;
                    }

                    match validate_text_input(&action, &raw) {
                        Ok(()) => ModalAction::SubmitTextInput { action, value: raw },
                        Err(msg) => {
                            append_modal_error(modal, msg);
                            ModalAction::None
                        }
                    }
                }
                _ => {
                    apply_input_edit_key(modal, key);
                    ModalAction::None
                }
            }
        }

        ModalKind::ConfirmAction { action } => match key.code {
            KeyCode::Esc | KeyCode::Char('n') => ModalAction::Close,
            KeyCode::Enter | KeyCode::Char('y') => ModalAction::Confirm(action.clone()),
            _ => handle_viewer_like_key(modal, key),
        },

        ModalKind::Editor { target } => {
            if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return ModalAction::SubmitEditor {
                    target: target.clone(),
                    text: modal.editor.text(),
                };
            }
            if key.code == KeyCode::Esc {
                return ModalAction::Close;
            }
            apply_editor_key(modal, key);
            ModalAction::None
        }
    }
}

fn handle_viewer_like_key(modal: &mut Modal, key: KeyEvent) -> ModalAction {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => ModalAction::Close,
        KeyCode::Up => {
            modal.scroll = modal.scroll.saturating_sub(1);
            ModalAction::None
        }
        KeyCode::Down => {
            if modal.scroll < modal.lines.len().saturating_sub(1) {
                modal.scroll += 1;
            }
            ModalAction::None
        }
        KeyCode::PageUp => {
            modal.scroll = modal.scroll.saturating_sub(10);
            ModalAction::None
        }
        KeyCode::PageDown => {
            modal.scroll = (modal.scroll + 10).min(modal.lines.len().saturating_sub(1));
            ModalAction::None
        }
        _ => ModalAction::None,
    }
}

fn apply_input_edit_key(modal: &mut Modal, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => modal.input.backspace(),
        KeyCode::Delete => modal.input.delete(),
        KeyCode::Left => modal.input.move_left(),
        KeyCode::Right => modal.input.move_right(),
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT)
            {
                modal.input.insert_char(c);
            }
        }
        _ => {}
    }
}

fn apply_editor_key(modal: &mut Modal, key: KeyEvent) {
    let ed = &mut modal.editor;
    match key.code {
        KeyCode::Enter => ed.newline(),
        KeyCode::Backspace => ed.backspace(),
        KeyCode::Delete => ed.delete(),
        KeyCode::Left => ed.move_left(),
        KeyCode::Right => ed.move_right(),
        KeyCode::Up => ed.move_up(),
        KeyCode::Down => ed.move_down(),
        KeyCode::Home => ed.home(),
        KeyCode::End => ed.end(),
        KeyCode::Tab => {
            for _ in 0..4 {
                ed.insert_char(' ');
            }
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT)
            {
                ed.insert_char(c);
            }
        }
        _ => {}
    }
}

pub(in crate::tui_shell) fn append_modal_error(modal: &mut Modal, msg: String) {
    modal.lines.retain(|l| !l.starts_with("error:"));
    modal.lines.push(format!("error: {}", msg));
}
