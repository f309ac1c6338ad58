use anyhow::Result;
use clap::Parser;

use crate::Commands;

#[derive(Parser)]
#[command(name = "subtrack")]
#[command(about = "Subscription tracker with an AI assistant", long_about = None)]
pub(crate) struct Cli {
    /// Bearer token for the document store; enables remote sync for this run
    #[arg(long, global = true, env = "SUBTRACK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    subtrack::logging::init("subtrack=info");
    let cli = Cli::parse();
    crate::cli_exec::handle_command(cli.command, cli.token)
}
