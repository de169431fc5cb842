use crate::coder::hash::DEFAULT_MAX_RETRIES;
use crate::coder::{HashCoder, HashMethod, IdCoder};
use crate::error::Result;
use burrow_bloom::BloomFilter;
use burrow_core::{ShortCode, Store};
use burrow_flake::Snowflake;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// Which coder a [`Strategy`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Hash,
    Id,
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Hash => write!(f, "hash"),
            StrategyKind::Id => write!(f, "id"),
        }
    }
}

/// Options used when building a strategy from a [`StrategyKind`].
///
/// Hash options are ignored by the ID strategy.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct StrategyOptions {
    #[builder(default)]
    pub hash_method: HashMethod,
    #[builder(default = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The active short-code algorithm.
#[derive(Debug, Clone)]
pub enum Strategy {
    Hash(HashCoder),
    Id(IdCoder),
}

impl Strategy {
    /// Builds a strategy of `kind`; the ID strategy draws from `generator`.
    pub fn build(kind: StrategyKind, options: StrategyOptions, generator: Arc<Snowflake>) -> Self {
        match kind {
            StrategyKind::Hash => Strategy::Hash(
                HashCoder::builder()
                    .method(options.hash_method)
                    .max_retries(options.max_retries)
                    .build(),
            ),
            StrategyKind::Id => Strategy::Id(IdCoder::new(generator)),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Hash(_) => StrategyKind::Hash,
            Strategy::Id(_) => StrategyKind::Id,
        }
    }

    /// Produces a code for `long_url` and stores the mapping.
    pub async fn generate<S: Store + ?Sized>(
        &self,
        long_url: &str,
        store: &S,
        filter: &BloomFilter,
    ) -> Result<ShortCode> {
        match self {
            Strategy::Hash(coder) => coder.generate(long_url, store, filter).await,
            Strategy::Id(coder) => coder.generate(long_url, store, filter).await,
        }
    }
}

impl From<HashCoder> for Strategy {
    fn from(coder: HashCoder) -> Self {
        Strategy::Hash(coder)
    }
}

impl From<IdCoder> for Strategy {
    fn from(coder: IdCoder) -> Self {
        Strategy::Id(coder)
    }
}
