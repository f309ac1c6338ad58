use subtrack::clock::SystemClock;
use subtrack::sync::{BearerToken, RemoteSync};

use super::*;

pub(super) fn discover_store() -> Result<LocalStore> {
    LocalStore::discover(&std::env::current_dir().context("get current dir")?)
}

pub(super) fn open_pipeline(store: &LocalStore) -> Result<MutationPipeline<DriveClient>> {
    let cfg = store.read_config()?;
    let remote = cfg.remote.clone().unwrap_or_default();
    let document_name = remote.document_name.clone();
    let client = DriveClient::new(remote)?;
    let pipeline = MutationPipeline::open(
        store,
        RemoteSync::new(client, document_name),
        SystemClock,
    )?;

    let pipeline = match cfg.assistant.as_ref() {
        None => pipeline,
        Some(assistant_cfg) => match subtrack::assistant::from_config(assistant_cfg, store) {
            Ok(assistant) => pipeline.with_assistant(assistant),
            Err(err) => pipeline.without_assistant(err.to_string()),
        },
    };
    Ok(pipeline)
}

/// Open the tracker and, when a token is given, start a remote session
/// first. A failed session start is reported and the command runs locally.
pub(super) fn with_pipeline<F>(token: Option<String>, f: F) -> Result<()>
where
    F: FnOnce(&mut MutationPipeline<DriveClient>) -> Result<()>,
{
    let store = discover_store()?;
    let mut pipeline = open_pipeline(&store)?;
    if let Some(token) = token {
        if let Err(err) = pipeline.connect(BearerToken::new(token)) {
            tracing::warn!(error = %err, "remote sync unavailable, working locally");
        }
    }
    f(&mut pipeline)
}
