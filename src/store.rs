use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::TrackerConfig;

const STORE_DIR: &str = ".subtrack";
const CONFIG_FILE: &str = "config.json";

/// Storage key holding the ordered record array.
pub const CONTRACTS_KEY: &str = "contracts";
/// Storage key holding `{count, period}`.
pub const USAGE_KEY: &str = "usageData";
/// Storage key holding the direct-model API key.
pub const API_KEY_KEY: &str = "geminiApiKey";

/// Durable key → JSON value storage rooted in a `.subtrack` directory.
///
/// Every value lives in its own `<key>.json` file and is replaced atomically.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn store_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn open(root: &Path) -> Result<Self> {
        let dir = Self::store_dir(root);
        if !dir.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `subtrack init`)",
                STORE_DIR,
                dir.display()
            ));
        }
        Ok(Self { root: dir })
    }

    pub fn init(root: &Path, force: bool) -> Result<Self> {
        let dir = Self::store_dir(root);
        if dir.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                dir.display()
            ));
        }
        fs::create_dir_all(&dir).context("create store dir")?;

        let store = Self { root: dir };
        store.write_config(&TrackerConfig::default())?;
        Ok(store)
    }

    /// Walk up from `start` to the nearest directory holding a store.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if Self::store_dir(dir).is_dir() {
                return Self::open(dir);
            }
        }
        Err(anyhow!("No {} directory found (run `subtrack init`)", STORE_DIR))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<TrackerConfig> {
        let path = self.root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(TrackerConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: TrackerConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &TrackerConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join(CONFIG_FILE), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", key))?;
        let value = serde_json::from_slice(&bytes).with_context(|| format!("parse {}", key))?;
        Ok(Some(value))
    }

    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key)?;
        let bytes = serde_json::to_vec_pretty(value).with_context(|| format!("serialize {}", key))?;
        write_atomic(&path, &bytes).with_context(|| format!("write {}", key))?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove {}", key)),
        }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key == "config"
            || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!("invalid storage key {:?}", key);
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
