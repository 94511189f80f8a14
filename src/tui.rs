use std::path::PathBuf;

use anyhow::Result;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    pub state_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    /// Nothing is read from or written to disk.
    pub ephemeral: bool,
    /// Submitted as if typed on the landing screen once startup settles.
    pub token: Option<String>,
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
