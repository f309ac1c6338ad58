use clap::Subcommand;

use crate::ConfigCommands;

pub(crate) mod chat;
pub(crate) mod local;
pub(crate) mod records;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a tracker (.subtrack)
    Init(local::InitArgs),

    /// List subscriptions and the monthly total
    List(records::ListArgs),

    /// Add a subscription
    Add(records::AddArgs),

    /// Delete a subscription by id
    Delete(records::DeleteArgs),

    /// Talk to the assistant (interactive when no message is given)
    Chat(chat::ChatArgs),

    /// Replace local subscriptions with the remote copy (requires --token)
    Sync(local::SyncArgs),

    /// Show assistant usage for this month
    Usage(local::UsageArgs),

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
