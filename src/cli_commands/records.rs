use clap::Args;

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Case-insensitive match on name or category
    #[arg(long)]
    pub(crate) filter: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct AddArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) url: Option<String>,
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Monthly fee; non-numeric values count as 0
    #[arg(long)]
    pub(crate) fee: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    pub(crate) id: String,
}
