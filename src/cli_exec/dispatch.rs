use super::chat::handle_chat_command;
use super::config::handle_config_command;
use super::records::{handle_add_command, handle_delete_command, handle_list_command};
use super::setup::{handle_init_command, handle_sync_command, handle_usage_command};
use super::workspace::{discover_store, with_pipeline};
use super::*;

pub(super) fn handle_command(command: Commands, token: Option<String>) -> Result<()> {
    match command {
        Commands::Init(args) => handle_init_command(args.force, args.path)?,
        Commands::List(args) => {
            with_pipeline(token, |p| handle_list_command(p, args.filter, args.json))?
        }
        Commands::Add(args) => with_pipeline(token, |p| handle_add_command(p, args))?,
        Commands::Delete(args) => with_pipeline(token, |p| handle_delete_command(p, &args.id))?,
        Commands::Chat(args) => {
            with_pipeline(token, |p| handle_chat_command(p, args.message, args.accept))?
        }
        Commands::Sync(args) => {
            let token = token.context(
                "no bearer token (pass --token or set SUBTRACK_TOKEN to sync with the document store)",
            )?;
            handle_sync_command(token, args.json)?
        }
        Commands::Usage(args) => with_pipeline(None, |p| handle_usage_command(p, args.json))?,
        Commands::Config { command } => handle_config_command(&discover_store()?, command)?,
    }
    Ok(())
}
