//! In-memory record list mirrored to durable local storage.
//!
//! Every mutation writes the full snapshot first and only then updates the
//! in-memory list, so a failed flush leaves both sides at the old state.

use anyhow::{Result, bail};

use crate::model::Record;
use crate::store::{CONTRACTS_KEY, LocalStore};

pub struct RecordStore {
    store: LocalStore,
    records: Vec<Record>,
}

impl RecordStore {
    /// Load the persisted snapshot; empty when nothing was stored yet.
    pub fn load(store: LocalStore) -> Result<Self> {
        let records: Vec<Record> = store.get(CONTRACTS_KEY)?.unwrap_or_default();
        Ok(Self { store, records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn append(&mut self, record: Record) -> Result<()> {
        if self.contains(&record.id) {
            bail!("record id {} already exists", record.id);
        }
        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)
    }

    /// Remove by id. Unknown ids are a no-op and do not touch storage.
    pub fn remove(&mut self, id: &str) -> Result<Option<Record>> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        let mut next = self.records.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        Ok(Some(removed))
    }

    /// Wholesale replacement, used when a remote session starts.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        self.commit(records)
    }

    /// Case-insensitive substring match on name or category.
    pub fn search(&self, filter: &str) -> Vec<&Record> {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn total_monthly(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.monthly_fee))
    }

    fn commit(&mut self, next: Vec<Record>) -> Result<()> {
        self.store.put(CONTRACTS_KEY, &next)?;
        self.records = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/records_tests.rs"]
mod tests;
