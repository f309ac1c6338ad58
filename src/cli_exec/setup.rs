use subtrack::sync::BearerToken;

use super::workspace::{discover_store, open_pipeline};
use super::*;

pub(super) fn handle_init_command(force: bool, path: Option<std::path::PathBuf>) -> Result<()> {
    let root = path.unwrap_or(std::env::current_dir().context("get current dir")?);
    LocalStore::init(&root, force)?;
    println!("Initialized subtrack at {}", root.display());
    Ok(())
}

pub(super) fn handle_sync_command(token: String, json: bool) -> Result<()> {
    let store = discover_store()?;
    let mut pipeline = open_pipeline(&store)?;
    let count = pipeline.connect(BearerToken::new(token))?;
    let document_id = pipeline
        .sync()
        .session()
        .and_then(|s| s.document_id())
        .unwrap_or_default()
        .to_string();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "records": count,
                "document_id": document_id,
                "document_name": pipeline.sync().document_name(),
            }))
            .context("serialize sync json")?
        );
    } else {
        println!(
            "Synced {} subscription(s) from {} ({})",
            count,
            pipeline.sync().document_name(),
            document_id
        );
    }
    Ok(())
}

pub(super) fn handle_usage_command(
    pipeline: &mut MutationPipeline<DriveClient>,
    json: bool,
) -> Result<()> {
    let usage = pipeline.usage_this_month()?;
    let tier = pipeline.tier();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "count": usage.count,
                "period": usage.period,
                "tier": tier,
                "cap": tier.monthly_cap(),
            }))
            .context("serialize usage json")?
        );
    } else {
        println!("period: {}", usage.period);
        println!("tier: {}", tier);
        println!("used: {}/{}", usage.count, tier.monthly_cap());
    }
    Ok(())
}
