use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::collection::{CollectionOp, CollectionState, CollectionTicket, CreateDraft, DraftFile};
use crate::context::AppContext;
use crate::editing::{ItemEditor, ItemEvent, ItemOp, ItemTicket};
use crate::jobs::{Reply, Worker};
use crate::session::{BootstrapOutcome, SessionMode};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use super::input::{Input, TextArea};
use super::modal;
use super::view::{RenderCtx, View};
use super::views::{DashboardView, LandingView};

mod actions;
mod completions;
mod create_wizard;
mod event_loop;
mod log_types;
mod modal_output;
mod modal_types;
mod render;
mod runtime;
mod state;
mod text_input;
mod time_utils;

use self::create_wizard::CreateWizard;
use self::log_types::{EntryKind, ScrollEntry};
pub(in crate::tui_shell) use self::modal_types::{
    ConfirmAction, EditorTarget, Modal, ModalKind, TextInputAction,
};
pub(in crate::tui_shell) use self::state::App;
use self::state::Pending;
pub(in crate::tui_shell) use self::time_utils::{fmt_date, fmt_since};
use self::time_utils::now_clock;

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    runtime::run(opts)
}
