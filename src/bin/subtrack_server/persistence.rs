use super::*;

pub(super) fn documents_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("documents.json")
}

pub(super) fn load_documents(data_dir: &std::path::Path) -> Result<DocumentTable> {
    let path = documents_path(data_dir);
    if !path.exists() {
        return Ok(DocumentTable::default());
    }
    let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

pub(super) fn persist_documents(state: &AppState, table: &DocumentTable) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(table).context("serialize documents")?;
    write_atomic_overwrite(&documents_path(&state.data_dir), &bytes).context("write documents.json")
}

pub(super) fn write_atomic_overwrite(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

pub(super) fn new_file_id() -> Result<String> {
    let mut bytes = [0u8; 12];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    Ok(bytes.iter().map(|b| format!("{:02x}", b)).collect())
}

pub(super) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
