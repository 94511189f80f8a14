use clap::Subcommand;

pub(crate) mod config;
pub(crate) mod gists;
pub(crate) mod identity;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Validate a token and store it for later runs
    Login(identity::LoginArgs),

    /// Forget the stored token
    Logout,

    /// Show which token would be used and whether it is accepted
    Status(identity::StatusArgs),

    /// Show or update config.json
    Config(config::ConfigArgs),

    /// List your gists
    List(gists::ListArgs),

    /// Show one gist, including file content
    Show(gists::ShowArgs),

    /// Create a gist from local files
    Create(gists::CreateArgs),

    /// Set a gist's description
    Describe(gists::DescribeArgs),

    /// Delete a gist
    Delete(gists::DeleteArgs),

    /// Replace one file's content (or add the first file of an empty gist)
    Put(gists::PutArgs),

    /// Rename a file within a gist
    #[command(name = "rename", alias = "mv")]
    Rename(gists::RenameArgs),
}
