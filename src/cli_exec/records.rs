use subtrack::model::{FeeInput, Record, RecordInput};

use super::*;
use crate::cli_commands::records::AddArgs;

pub(super) fn handle_list_command(
    pipeline: &mut MutationPipeline<DriveClient>,
    filter: Option<String>,
    json: bool,
) -> Result<()> {
    let filter = filter.unwrap_or_default();
    let shown = pipeline.search(&filter);
    let total = pipeline.total_monthly();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "records": shown,
                "total_monthly": total,
            }))
            .context("serialize records json")?
        );
        return Ok(());
    }

    if shown.is_empty() {
        println!("No subscriptions");
    }
    for record in &shown {
        print_record(record);
    }
    println!("total: {}/month", total);
    Ok(())
}

pub(super) fn handle_add_command(
    pipeline: &mut MutationPipeline<DriveClient>,
    args: AddArgs,
) -> Result<()> {
    let input = RecordInput {
        name: args.name,
        url: args.url,
        category: args.category,
        monthly_fee: args.fee.map(FeeInput::Text),
    };
    let record = pipeline.add_record(input)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("serialize record json")?
        );
    } else {
        println!("Added {} ({})", record.name, record.id);
    }
    Ok(())
}

pub(super) fn handle_delete_command(
    pipeline: &mut MutationPipeline<DriveClient>,
    id: &str,
) -> Result<()> {
    match pipeline.delete_record(id)? {
        Some(record) => println!("Deleted {} ({})", record.name, record.id),
        None => println!("No subscription with id {}", id),
    }
    Ok(())
}

pub(super) fn print_record(record: &Record) {
    let category = record
        .category
        .as_deref()
        .map(|c| format!(" [{}]", c))
        .unwrap_or_default();
    println!(
        "{}  {}{}  {}/month  added {}",
        record.id,
        record.name,
        category,
        record.monthly_fee,
        subtrack::model::format_date(record.added_at)
    );
    if let Some(url) = &record.url {
        println!("    {}", url);
    }
}
