use anyhow::{Context, Result};

use gistdeck::collection::CollectionState;
use gistdeck::remote::GistGateway;

use crate::{Commands, GlobalOpts, require_session};

mod config;
mod dispatch;
mod gists;
mod identity;

pub(super) fn handle_command(opts: &GlobalOpts, command: Commands) -> Result<()> {
    dispatch::handle_command(opts, command)
}
