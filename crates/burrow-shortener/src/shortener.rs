use crate::error::Result;
use async_trait::async_trait;
use burrow_core::ShortCode;

/// The shorten/resolve capability consumed by a serving layer.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `long_url` with the active strategy and returns its code.
    async fn shorten(&self, long_url: &str) -> Result<ShortCode>;

    /// Returns the URL stored under `code`, or `Err(NotFound)`.
    async fn resolve(&self, code: &str) -> Result<String>;
}
