use crossterm::event::KeyEvent;

use self::keymap::{ModalAction, map_modal_key};

mod draw;
mod keymap;
mod text_input_validate;

pub(super) use self::draw::draw_modal;
pub(super) use self::keymap::append_modal_error;

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    let action = {
        let Some(m) = app.modal_mut() else {
            return;
        };
        map_modal_key(m, key)
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => {
            app.dismiss_modal();
        }

        ModalAction::Confirm(action) => {
            app.close_modal();
            app.execute_confirmed(action);
        }

        ModalAction::SubmitTextInput { action, value } => {
            app.close_modal();
            app.submit_text_input(action, value);
        }

        ModalAction::SubmitEditor { target, text } => {
            app.close_modal();
            app.submit_editor(target, text);
        }
    }
}
