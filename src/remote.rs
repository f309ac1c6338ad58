//! Client side of the single-document remote store.
//!
//! The protocol is four calls: list documents by exact name, read a
//! document's content, create a document, and replace a document's content.
//! Writes are multipart requests carrying `{name, mimeType}` metadata and the
//! JSON body. Every call needs a bearer token; no refresh happens here.

use anyhow::{Context, Result};

use crate::model::RemoteConfig;
use crate::sync::BearerToken;

mod http_client;
use self::http_client::with_retries;

mod documents;
mod memory;
mod multipart;
mod types;

pub use self::memory::{MemoryDocuments, StoredDocument};
pub use self::multipart::{MultipartRelated, decode_related, encode_related};
pub use self::types::*;

pub const DOCUMENT_MIME_TYPE: &str = "application/json";

/// A store of named documents addressed by opaque ids.
pub trait DocumentStore {
    /// Documents whose name equals `name` exactly, oldest first.
    fn list_by_name(&self, token: &BearerToken, name: &str) -> Result<Vec<DocumentRef>>;

    fn read_content(&self, token: &BearerToken, id: &str) -> Result<Vec<u8>>;

    fn create(
        &self,
        token: &BearerToken,
        metadata: &DocumentMetadata,
        content: &[u8],
    ) -> Result<DocumentRef>;

    /// Overwrite the whole content of `id`.
    fn replace(
        &self,
        token: &BearerToken,
        id: &str,
        metadata: &DocumentMetadata,
        content: &[u8],
    ) -> Result<DocumentRef>;
}

/// HTTP client for a Drive v3 shaped document store.
pub struct DriveClient {
    remote: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl DriveClient {
    pub fn new(remote: RemoteConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("subtrack")
            .build()
            .context("build reqwest client")?;
        Ok(Self { remote, client })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}
