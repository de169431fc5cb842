use crate::error::{Result, ShortenerError};
use crate::shortener::Shortener;
use crate::strategy::{Strategy, StrategyKind, StrategyOptions};
use async_trait::async_trait;
use burrow_bloom::BloomFilter;
use burrow_core::{ShortCode, Store};
use burrow_flake::{Snowflake, SnowflakeSettings};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// The shortener context.
///
/// This service wraps a `Store`, the existence filter, and the active
/// [`Strategy`] to handle:
/// - URL validation
/// - short code generation through the active strategy
/// - resolving codes regardless of which strategy issued them
///
/// The strategy can be swapped at any time with [`set_strategy`]. Calls that
/// already started keep the strategy they picked up.
///
/// [`set_strategy`]: ShortenerService::set_strategy
pub struct ShortenerService<S> {
    store: Arc<S>,
    filter: Arc<BloomFilter>,
    generator: Arc<Snowflake>,
    strategy: RwLock<Arc<Strategy>>,
}

impl<S: Store> ShortenerService<S> {
    /// Creates a service with an explicit strategy.
    ///
    /// `generator` is used whenever an ID strategy is later built through
    /// [`set_strategy_kind`](Self::set_strategy_kind).
    pub fn new(
        store: S,
        filter: BloomFilter,
        generator: Arc<Snowflake>,
        strategy: impl Into<Strategy>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            filter: Arc::new(filter),
            generator,
            strategy: RwLock::new(Arc::new(strategy.into())),
        }
    }

    /// Creates a service running `kind`, with a generator on the default epoch.
    pub fn with_kind(
        store: S,
        filter: BloomFilter,
        kind: StrategyKind,
        options: StrategyOptions,
    ) -> Result<Self> {
        let generator = Arc::new(Snowflake::new(SnowflakeSettings::default())?);
        let strategy = Strategy::build(kind, options, Arc::clone(&generator));
        Ok(Self::new(store, filter, generator, strategy))
    }

    /// Validates that the URL has a valid format (has a scheme and host).
    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        };
        if scheme.is_empty() || rest.is_empty() || rest.starts_with('/') {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }

    /// Shortens `long_url` with the active strategy.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortCode> {
        Self::validate_url(long_url)?;

        // Clone the Arc so the lock is released before awaiting.
        let strategy = Arc::clone(&self.strategy.read());
        trace!(url = %long_url, strategy = %strategy.kind(), "shortening url");

        let code = strategy
            .generate(long_url, self.store.as_ref(), &self.filter)
            .await?;

        debug!(code = %code, url = %long_url, strategy = %strategy.kind(), "shortened url");
        Ok(code)
    }

    /// Resolves a code to its URL.
    ///
    /// Codes that are not valid base62 can never have been issued and are
    /// reported as [`ShortenerError::NotFound`].
    pub async fn resolve(&self, code: &str) -> Result<String> {
        let Ok(short_code) = ShortCode::new(code) else {
            trace!(code = %code, "malformed short code");
            return Err(ShortenerError::NotFound(code.to_owned()));
        };

        match self.store.get(&short_code).await? {
            Some(url) => {
                debug!(code = %short_code, url = %url, "resolved short code");
                Ok(url)
            }
            None => {
                trace!(code = %short_code, "short code not found");
                Err(ShortenerError::NotFound(code.to_owned()))
            }
        }
    }

    /// Replaces the active strategy for subsequent calls.
    pub fn set_strategy(&self, strategy: impl Into<Strategy>) {
        let strategy = Arc::new(strategy.into());
        let kind = strategy.kind();
        *self.strategy.write() = strategy;
        info!(strategy = %kind, "switched shortening strategy");
    }

    /// Builds a strategy of `kind` and makes it active.
    ///
    /// An ID strategy always shares this service's generator, so switching
    /// back and forth never restarts the ID sequence.
    pub fn set_strategy_kind(&self, kind: StrategyKind, options: StrategyOptions) {
        self.set_strategy(Strategy::build(kind, options, Arc::clone(&self.generator)));
    }

    /// Kind of the active strategy.
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.read().kind()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }
}

#[async_trait]
impl<S: Store> Shortener for ShortenerService<S> {
    async fn shorten(&self, long_url: &str) -> Result<ShortCode> {
        ShortenerService::shorten(self, long_url).await
    }

    async fn resolve(&self, code: &str) -> Result<String> {
        ShortenerService::resolve(self, code).await
    }
}
