use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the configuration
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change configuration values
    Set {
        /// Quota tier (free or paid)
        #[arg(long)]
        tier: Option<String>,
        /// Chat proxy endpoint (switches the assistant to the proxy)
        #[arg(long, conflicts_with = "gemini_model")]
        assistant_url: Option<String>,
        /// Call Gemini directly with this model (uses the stored API key)
        #[arg(long)]
        gemini_model: Option<String>,
        /// Document store base URL
        #[arg(long)]
        remote_url: Option<String>,
        /// Document store upload URL (defaults to the base URL)
        #[arg(long)]
        upload_url: Option<String>,
        /// Name of the mirrored document
        #[arg(long)]
        document_name: Option<String>,
    },
    /// Store the Gemini API key locally
    ApiKey { key: String },
}
