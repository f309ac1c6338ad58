use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};

use super::{DocumentMetadata, DocumentRef, DocumentStore};
use crate::sync::BearerToken;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredDocument {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    documents: Vec<StoredDocument>,
    fail_writes: bool,
    writes: usize,
}

/// In-process document store, oldest document first.
#[derive(Default)]
pub struct MemoryDocuments {
    inner: Mutex<Inner>,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document directly, bypassing the write counters.
    pub fn insert(&self, name: &str, content: &[u8]) -> Result<String> {
        let mut inner = self.lock()?;
        Ok(inner.add(name, "application/json", content))
    }

    pub fn documents(&self) -> Result<Vec<StoredDocument>> {
        Ok(self.lock()?.documents.clone())
    }

    /// Number of create/replace calls that succeeded.
    pub fn write_count(&self) -> Result<usize> {
        Ok(self.lock()?.writes)
    }

    /// Make subsequent create/replace calls fail.
    pub fn set_fail_writes(&self, fail: bool) -> Result<()> {
        self.lock()?.fail_writes = fail;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("memory document store poisoned"))
    }
}

impl Inner {
    fn add(&mut self, name: &str, mime_type: &str, content: &[u8]) -> String {
        self.next_id += 1;
        let id = format!("doc-{}", self.next_id);
        self.documents.push(StoredDocument {
            id: id.clone(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            content: content.to_vec(),
        });
        id
    }
}

fn require_token(token: &BearerToken) -> Result<()> {
    if token.secret().is_empty() {
        bail!("unauthorized (empty bearer token)");
    }
    Ok(())
}

impl DocumentStore for MemoryDocuments {
    fn list_by_name(&self, token: &BearerToken, name: &str) -> Result<Vec<DocumentRef>> {
        require_token(token)?;
        let inner = self.lock()?;
        Ok(inner
            .documents
            .iter()
            .filter(|d| d.name == name)
            .map(|d| DocumentRef {
                id: d.id.clone(),
                name: d.name.clone(),
            })
            .collect())
    }

    fn read_content(&self, token: &BearerToken, id: &str) -> Result<Vec<u8>> {
        require_token(token)?;
        let inner = self.lock()?;
        inner
            .documents
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.content.clone())
            .ok_or_else(|| anyhow!("read document: document not found"))
    }

    fn create(
        &self,
        token: &BearerToken,
        metadata: &DocumentMetadata,
        content: &[u8],
    ) -> Result<DocumentRef> {
        require_token(token)?;
        let mut inner = self.lock()?;
        if inner.fail_writes {
            bail!("create document: simulated failure");
        }
        let id = inner.add(&metadata.name, &metadata.mime_type, content);
        inner.writes += 1;
        Ok(DocumentRef {
            id,
            name: metadata.name.clone(),
        })
    }

    fn replace(
        &self,
        token: &BearerToken,
        id: &str,
        metadata: &DocumentMetadata,
        content: &[u8],
    ) -> Result<DocumentRef> {
        require_token(token)?;
        let mut inner = self.lock()?;
        if inner.fail_writes {
            bail!("replace document: simulated failure");
        }
        let doc = inner
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| anyhow!("replace document: document not found"))?;
        doc.name = metadata.name.clone();
        doc.mime_type = metadata.mime_type.clone();
        doc.content = content.to_vec();
        inner.writes += 1;
        Ok(DocumentRef {
            id: id.to_string(),
            name: metadata.name.clone(),
        })
    }
}
