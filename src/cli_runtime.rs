use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use gistdeck::collection::CollectionState;
use gistdeck::context::AppContext;
use gistdeck::session::{SessionMode, TOKEN_ENV};
use gistdeck::store::MemoryCredentials;

use crate::Commands;

#[derive(Parser)]
#[command(name = "gistdeck")]
#[command(about = "Browse and edit GitHub gists from the terminal", long_about = None)]
pub(crate) struct Cli {
    /// State directory (defaults to $GISTDECK_HOME, then the platform config dir)
    #[arg(long = "state-dir", value_name = "PATH", global = true)]
    state_dir: Option<PathBuf>,

    /// Gist API base URL (overrides config.json)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Use this token for the session instead of the stored one
    #[arg(long, value_name = "TOKEN", global = true)]
    token: Option<String>,

    /// Keep nothing on disk: no config, no stored token
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) struct GlobalOpts {
    pub(crate) ctx: AppContext,
    pub(crate) token: Option<String>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            gistdeck::tui::run_with_options(gistdeck::tui::TuiRunOptions {
                state_dir: cli.state_dir,
                api_url: cli.api_url,
                ephemeral: cli.ephemeral,
                token: cli.token,
            })?;
        }
        Some(command) => {
            gistdeck::logging::init_stderr();
            let ctx = AppContext::open(cli.state_dir, cli.api_url.as_deref(), cli.ephemeral)?;
            let opts = GlobalOpts {
                ctx,
                token: cli.token,
            };
            crate::cli_exec::handle_command(&opts, command)?
        }
    }

    Ok(())
}

/// An authenticated collection for one command.
///
/// `--token` is validated on its own and never written to disk. Otherwise the
/// usual startup sequence runs: stored token first, then `$GISTDECK_TOKEN`.
pub(crate) fn require_session(opts: &GlobalOpts) -> Result<CollectionState> {
    let gateway = opts.ctx.gateway.as_ref();
    if let Some(token) = opts.token.as_deref() {
        let mut state = CollectionState::new(Arc::new(MemoryCredentials::new()));
        state
            .submit_credential(gateway, token)
            .context("validate --token")?;
        return Ok(state);
    }

    let outcome = opts.ctx.bootstrap(false);
    let mode = outcome.mode;
    let error = outcome.error.clone();
    let mut state = CollectionState::new(opts.ctx.store.clone());
    state.apply_bootstrap(outcome);

    match mode {
        SessionMode::Authenticated => Ok(state),
        SessionMode::CredentialInvalid => anyhow::bail!(
            "{} (run `gistdeck login --token ...`)",
            error.unwrap_or_else(|| "token rejected".to_string())
        ),
        _ => anyhow::bail!(
            "not logged in (run `gistdeck login --token ...` or set {})",
            TOKEN_ENV
        ),
    }
}
