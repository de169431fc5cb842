use crate::error::Result;
use burrow_bloom::BloomFilter;
use burrow_core::{ShortCode, Store};
use burrow_flake::{Snowflake, SnowflakeSettings};
use std::sync::Arc;
use tracing::debug;

/// Monotonic-ID code producer.
///
/// Codes are `base62(next_id)`. The generator is shared through an `Arc`, so
/// clones of this coder (and strategies rebuilt around the same generator)
/// draw from one strictly increasing sequence.
#[derive(Clone)]
pub struct IdCoder {
    generator: Arc<Snowflake>,
}

impl IdCoder {
    pub fn new(generator: Arc<Snowflake>) -> Self {
        Self { generator }
    }

    /// Creates a coder around a fresh system-clock generator.
    pub fn with_settings(settings: SnowflakeSettings) -> Result<Self> {
        Ok(Self::new(Arc::new(Snowflake::new(settings)?)))
    }

    pub fn generator(&self) -> &Arc<Snowflake> {
        &self.generator
    }

    /// Issues a new code for `long_url`, storing the mapping.
    ///
    /// The URL is never consulted: calling this twice with the same URL
    /// yields two different codes.
    pub async fn generate<S: Store + ?Sized>(
        &self,
        long_url: &str,
        store: &S,
        filter: &BloomFilter,
    ) -> Result<ShortCode> {
        let id = self.generator.next_u64()?;
        let code = ShortCode::from_id(id);

        store.put(&code, long_url).await?;
        filter.add(code.as_str());

        debug!(code = %code, id, "issued id code");
        Ok(code)
    }
}

impl std::fmt::Debug for IdCoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdCoder").finish_non_exhaustive()
    }
}
