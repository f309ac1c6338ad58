use clap::Args;

#[derive(Args)]
pub(crate) struct ChatArgs {
    /// Message to send; omit for an interactive session
    pub(crate) message: Option<String>,
    /// Add the suggested subscription without asking
    #[arg(long)]
    pub(crate) accept: bool,
}
