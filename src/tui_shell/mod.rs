use anyhow::Result;

mod app;

mod clipboard;
mod input;
mod modal;
mod view;
mod views;

// Make core TUI types/helpers available to submodules via `super::...`.
use app::{
    App, ConfirmAction, EditorTarget, Modal, ModalKind, TextInputAction, fmt_date,
    fmt_since,
};
use view::{RenderCtx, View, render_view_chrome};

pub fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
