//! Mirror of the record list in a single remote document.
//!
//! The local record store stays the source of truth. The remote document is
//! read once when a session starts and overwritten wholesale on every push.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::Record;
use crate::remote::{DocumentMetadata, DocumentStore};

/// OAuth bearer token obtained out of band. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// One signed-in connection: the token plus the document id once known.
///
/// Created when a token is supplied and dropped on sign-out; a new process
/// starts without one.
#[derive(Debug)]
pub struct Session {
    token: BearerToken,
    document_id: Option<String>,
}

impl Session {
    pub fn new(token: BearerToken) -> Self {
        Self {
            token,
            document_id: None,
        }
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }
}

pub struct RemoteSync<S> {
    store: S,
    document_name: String,
    session: Option<Session>,
}

impl<S: DocumentStore> RemoteSync<S> {
    pub fn new(store: S, document_name: impl Into<String>) -> Self {
        Self {
            store,
            document_name: document_name.into(),
            session: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session for `token`. Re-supplying the current token keeps the
    /// known document id; a different token starts over.
    pub fn ensure_session(&mut self, token: BearerToken) -> &Session {
        let session = match self.session.take() {
            Some(current) if current.token == token => current,
            _ => Session::new(token),
        };
        self.session.insert(session)
    }

    pub fn end_session(&mut self) -> Option<Session> {
        self.session.take()
    }

    /// Read the remote record list, creating an empty document if none
    /// carries the reserved name. Content that is not a JSON array reads
    /// as empty.
    pub fn pull(&mut self) -> Result<Vec<Record>> {
        let session = self.session.as_mut().ok_or_else(no_session)?;
        let matches = self
            .store
            .list_by_name(&session.token, &self.document_name)
            .map_err(Error::Network)?;

        let Some(first) = matches.first() else {
            let created = self
                .store
                .create(
                    &session.token,
                    &DocumentMetadata::json(&self.document_name),
                    b"[]",
                )
                .map_err(Error::Network)?;
            tracing::info!(document = %created.id, "created remote document");
            session.document_id = Some(created.id);
            return Ok(Vec::new());
        };

        if matches.len() > 1 {
            tracing::warn!(
                name = %self.document_name,
                count = matches.len(),
                chosen = %first.id,
                "several remote documents share the reserved name; using the oldest"
            );
        }
        session.document_id = Some(first.id.clone());
        let bytes = self
            .store
            .read_content(&session.token, &first.id)
            .map_err(Error::Network)?;
        Ok(decode_records(&bytes))
    }

    /// Overwrite the remote document with `records`.
    ///
    /// This is a full replace with no merge and no version check: whatever
    /// the remote held is discarded, and of two racing pushes the one that
    /// lands last wins. Creates the document if its id is not yet known.
    pub fn push(&mut self, records: &[Record]) -> Result<()> {
        let session = self.session.as_mut().ok_or_else(no_session)?;
        let body = serde_json::to_vec(records)
            .map_err(|e| Error::Storage(anyhow::Error::new(e).context("serialize records")))?;
        let metadata = DocumentMetadata::json(&self.document_name);

        match session.document_id.clone() {
            Some(id) => {
                self.store
                    .replace(&session.token, &id, &metadata, &body)
                    .map_err(Error::Network)?;
            }
            None => {
                let created = self
                    .store
                    .create(&session.token, &metadata, &body)
                    .map_err(Error::Network)?;
                tracing::info!(document = %created.id, "created remote document");
                session.document_id = Some(created.id);
            }
        }
        Ok(())
    }
}

fn no_session() -> Error {
    Error::Config("not signed in to the document store (supply a bearer token)".to_string())
}

/// Decode remote content leniently: a non-array is empty, entries that are
/// not records are dropped, and only the first record per id is kept.
pub fn decode_records(bytes: &[u8]) -> Vec<Record> {
    let items = match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!("remote document is not a JSON array; treating as empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(error = %err, "remote document is not valid JSON; treating as empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Record>(item) {
            Ok(record) => {
                if seen.insert(record.id.clone()) {
                    out.push(record);
                } else {
                    tracing::warn!(id = %record.id, "dropping duplicate remote record");
                }
            }
            Err(err) => tracing::warn!(error = %err, "dropping unreadable remote record"),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
