use anyhow::{Context, Result};

use subtrack::pipeline::MutationPipeline;
use subtrack::remote::DriveClient;
use subtrack::store::LocalStore;

use crate::{Commands, ConfigCommands};

mod chat;
mod config;
mod dispatch;
mod records;
mod setup;
mod workspace;

pub(super) fn handle_command(command: Commands, token: Option<String>) -> Result<()> {
    dispatch::handle_command(command, token)
}
