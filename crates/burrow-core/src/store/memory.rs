use crate::error::{Result, StoreError};
use crate::shortcode::ShortCode;
use crate::store::{ReadStore, Store};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use smol_str::SmolStr;

/// In-memory implementation of the Store trait using DashMap.
///
/// `put` claims a code through the entry API, so of several writers racing
/// for the same code exactly one succeeds.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: DashMap<SmolStr, String>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadStore for InMemoryStore {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn put(&self, code: &ShortCode, long_url: &str) -> Result<()> {
        // The entry guard holds the shard lock, so check-and-insert is atomic.
        match self.storage.entry(SmolStr::new(code.as_str())) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(long_url.to_owned());
                Ok(())
            }
        }
    }
}
