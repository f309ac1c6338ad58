use subtrack::model::{AssistantConfig, DEFAULT_GEMINI_URL, QuotaTier};
use subtrack::store::API_KEY_KEY;

use super::*;

pub(super) fn handle_config_command(store: &LocalStore, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let cfg = store.read_config()?;
            let has_key = store
                .get::<String>(API_KEY_KEY)?
                .is_some_and(|k| !k.trim().is_empty());
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg).context("serialize config json")?
                );
                return Ok(());
            }
            println!("tier: {}", cfg.tier);
            let remote = cfg.remote.unwrap_or_default();
            println!("remote: {}", remote.base_url);
            println!("document: {}", remote.document_name);
            match cfg.assistant {
                None => println!("assistant: not configured"),
                Some(AssistantConfig::Proxy { endpoint }) => println!("assistant: proxy {}", endpoint),
                Some(AssistantConfig::Gemini { model, .. }) => println!(
                    "assistant: gemini {} (api key {})",
                    model,
                    if has_key { "set" } else { "missing" }
                ),
            }
        }
        ConfigCommands::Set {
            tier,
            assistant_url,
            gemini_model,
            remote_url,
            upload_url,
            document_name,
        } => {
            let mut cfg = store.read_config()?;
            if let Some(tier) = tier {
                cfg.tier = tier.parse::<QuotaTier>()?;
            }
            if let Some(endpoint) = assistant_url {
                cfg.assistant = Some(AssistantConfig::Proxy { endpoint });
            }
            if let Some(model) = gemini_model {
                cfg.assistant = Some(AssistantConfig::Gemini {
                    model,
                    base_url: DEFAULT_GEMINI_URL.to_string(),
                });
            }
            if remote_url.is_some() || upload_url.is_some() || document_name.is_some() {
                let mut remote = cfg.remote.unwrap_or_default();
                if let Some(url) = remote_url {
                    remote.base_url = url;
                }
                if let Some(url) = upload_url {
                    remote.upload_url = Some(url);
                }
                if let Some(name) = document_name {
                    remote.document_name = name;
                }
                cfg.remote = Some(remote);
            }
            store.write_config(&cfg)?;
            println!("Configuration updated");
        }
        ConfigCommands::ApiKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                store.remove(API_KEY_KEY)?;
                println!("API key cleared");
            } else {
                store.put(API_KEY_KEY, key)?;
                println!("API key saved");
            }
        }
    }
    Ok(())
}
