use clap::Args;

#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Store a new API base URL in config.json
    #[arg(long = "api-base-url", value_name = "URL")]
    pub(crate) api_base_url: Option<String>,
    /// Store a new X-GitHub-Api-Version value
    #[arg(long = "api-version", value_name = "VERSION")]
    pub(crate) api_version: Option<String>,
    /// Pause before the TUI checks for a saved token
    #[arg(long = "settle-delay-ms", value_name = "MS")]
    pub(crate) settle_delay_ms: Option<u64>,
    #[arg(long = "user-agent", value_name = "UA")]
    pub(crate) user_agent: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
