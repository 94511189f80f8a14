use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Personal access token with the gist scope (falls back to --token)
    #[arg(value_name = "TOKEN")]
    pub(crate) token: Option<String>,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
