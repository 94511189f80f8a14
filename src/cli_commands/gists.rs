use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Only gists whose description or filenames contain this text
    #[arg(long, short = 's')]
    pub(crate) search: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ShowArgs {
    pub(crate) id: String,
    /// Print only the combined file content
    #[arg(long, conflicts_with = "json")]
    pub(crate) raw: bool,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Files to upload; each is stored under its file name
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub(crate) files: Vec<PathBuf>,
    #[arg(long, short = 'd', default_value = "")]
    pub(crate) description: String,
    /// Create a public gist (default: secret)
    #[arg(long)]
    pub(crate) public: bool,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct DescribeArgs {
    pub(crate) id: String,
    pub(crate) description: String,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    pub(crate) id: String,
    /// Required: deletion cannot be undone
    #[arg(long)]
    pub(crate) yes: bool,
}

#[derive(Args)]
pub(crate) struct PutArgs {
    pub(crate) id: String,
    pub(crate) filename: String,
    /// Read content from this file (default: stdin)
    #[arg(long = "from", value_name = "PATH")]
    pub(crate) from: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct RenameArgs {
    pub(crate) id: String,
    pub(crate) from: String,
    pub(crate) to: String,
}
