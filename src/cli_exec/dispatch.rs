use super::config::handle_config_command;
use super::gists::{
    handle_create_command, handle_delete_command, handle_describe_command, handle_list_command,
    handle_put_command, handle_rename_command, handle_show_command,
};
use super::identity::{handle_login_command, handle_logout_command, handle_status_command};
use super::*;

pub(super) fn handle_command(opts: &GlobalOpts, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(opts, args.token)?,
        Commands::Logout => handle_logout_command(opts)?,
        Commands::Status(args) => handle_status_command(opts, args.json)?,
        Commands::Config(args) => handle_config_command(opts, args)?,
        Commands::List(args) => handle_list_command(opts, args.search, args.json)?,
        Commands::Show(args) => handle_show_command(opts, &args.id, args.raw, args.json)?,
        Commands::Create(args) => {
            handle_create_command(opts, args.files, args.description, args.public, args.json)?
        }
        Commands::Describe(args) => handle_describe_command(opts, &args.id, &args.description)?,
        Commands::Delete(args) => handle_delete_command(opts, &args.id, args.yes)?,
        Commands::Put(args) => handle_put_command(opts, &args.id, &args.filename, args.from)?,
        Commands::Rename(args) => handle_rename_command(opts, &args.id, &args.from, &args.to)?,
    }

    Ok(())
}
