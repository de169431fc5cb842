//! Short-code generation engine.
//!
//! This crate provides the two coders (content hash and Snowflake ID), the
//! [`Strategy`] that selects between them, and the [`ShortenerService`]
//! context that ties a strategy to a store and the existence filter.
//!
//! # Example
//!
//! ```rust
//! use burrow_bloom::{BloomFilter, BloomFilterConfig};
//! use burrow_core::InMemoryStore;
//! use burrow_shortener::{ShortenerService, StrategyKind, StrategyOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = BloomFilter::new(
//!     BloomFilterConfig::builder()
//!         .expected_items(1_000_000)
//!         .false_positive_rate(0.01)
//!         .build(),
//! )?;
//! let service = ShortenerService::with_kind(
//!     InMemoryStore::new(),
//!     filter,
//!     StrategyKind::Hash,
//!     StrategyOptions::default(),
//! )?;
//!
//! let code = service.shorten("https://example.com/some/very/long/url").await?;
//! assert_eq!(service.resolve(code.as_str()).await?, "https://example.com/some/very/long/url");
//!
//! service.set_strategy_kind(StrategyKind::Id, StrategyOptions::default());
//! let other = service.shorten("https://example.com/some/very/long/url").await?;
//! assert_ne!(code, other);
//! # Ok(())
//! # }
//! ```

pub mod coder;
pub mod error;
pub mod service;
pub mod shortener;
pub mod strategy;

pub use coder::{HashCoder, HashMethod, IdCoder};
pub use error::ShortenerError;
pub use service::ShortenerService;
pub use shortener::Shortener;
pub use strategy::{Strategy, StrategyKind, StrategyOptions};
