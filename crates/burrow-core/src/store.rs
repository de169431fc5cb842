pub mod memory;

use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

pub use memory::InMemoryStore;

/// A read-only view of a store.
///
/// This trait provides only the read operations from [`Store`],
/// allowing resolvers to work with read-only access.
#[async_trait]
pub trait ReadStore: Send + Sync + 'static {
    /// Retrieves the long URL for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Checks whether a short code already exists in the store.
    ///
    /// Unlike the existence filter this answer is authoritative.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Store: ReadStore {
    /// Inserts a new mapping. Returns `Err(AlreadyExists)` if the code is taken.
    ///
    /// A `get` for the same code issued after a successful `put` must observe
    /// the written URL.
    async fn put(&self, code: &ShortCode, long_url: &str) -> Result<()>;
}
