//! Bloom filter over issued short codes.
//!
//! The filter answers "definitely not issued" or "possibly issued". The
//! shortener uses it to skip the authoritative store lookup for almost every
//! fresh hash code, and only asks the store when the filter reports a hit.
//!
//! # Concurrency
//!
//! The bit array is a slice of `AtomicU64`. Setting a bit is an idempotent
//! `fetch_or`, so `add` and `might_contain` can run from any number of threads
//! without a lock.
//!
//! # Example
//!
//! ```rust
//! use burrow_bloom::{BloomFilter, BloomFilterConfig};
//!
//! let config = BloomFilterConfig::builder()
//!     .expected_items(100_000)
//!     .false_positive_rate(0.01)
//!     .build();
//!
//! let filter = BloomFilter::new(config).unwrap();
//! filter.add("abc1234");
//! assert!(filter.might_contain("abc1234"));
//! ```

pub mod hash;

use std::f64::consts::LN_2;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use thiserror::Error;
use typed_builder::TypedBuilder;

pub use hash::HASH_SCHEME_VERSION;

pub type Result<T> = std::result::Result<T, BloomError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BloomError {
    #[error("invalid bloom filter configuration: {0}")]
    InvalidConfig(String),
}

/// Configuration for the Bloom filter.
///
/// The bit count and number of hash positions are derived from these two
/// values with the standard sizing formulas.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct BloomFilterConfig {
    /// Expected number of codes to be inserted into the filter.
    ///
    /// Setting this too low will increase the false positive rate.
    #[builder]
    pub expected_items: usize,

    /// Desired false positive rate as a probability between 0.0 and 1.0.
    ///
    /// For example, a value of 0.01 means approximately 1% false positive rate.
    #[builder]
    pub false_positive_rate: f64,
}

impl BloomFilterConfig {
    /// Returns `(bits, hashes)` for this configuration.
    ///
    /// `bits = ceil(-n ln p / (ln 2)^2)` and `hashes = round(bits / n * ln 2)`.
    pub fn dimensions(&self) -> Result<(u64, u32)> {
        let n = self.expected_items;
        let p = self.false_positive_rate;
        if n == 0 {
            return Err(BloomError::InvalidConfig(
                "expected_items must be greater than zero".to_string(),
            ));
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(BloomError::InvalidConfig(format!(
                "false_positive_rate must be in (0, 1), got {p}"
            )));
        }

        let n = n as f64;
        let bits = (-n * p.ln() / (LN_2 * LN_2)).ceil();
        if !bits.is_finite() || bits > (usize::MAX as f64) {
            return Err(BloomError::InvalidConfig(format!(
                "filter of {bits} bits is too large"
            )));
        }
        let hashes = ((bits / n) * LN_2).round().max(1.0);

        Ok((bits as u64, hashes as u32))
    }
}

/// A lock-free Bloom filter.
pub struct BloomFilter {
    words: Box<[AtomicU64]>,
    bit_count: u64,
    hash_count: u32,
    items: AtomicUsize,
}

impl BloomFilter {
    /// Creates a filter sized for `config`.
    ///
    /// # Errors
    ///
    /// Returns `BloomError::InvalidConfig` if the configuration cannot produce
    /// a filter.
    pub fn new(config: BloomFilterConfig) -> Result<Self> {
        let (bits, hashes) = config.dimensions()?;
        Self::with_dimensions(bits, hashes)
    }

    /// Creates a filter with at least `bits` bits and exactly `hashes` positions per key.
    ///
    /// The bit count is rounded up to a multiple of 64.
    pub fn with_dimensions(bits: u64, hashes: u32) -> Result<Self> {
        if bits == 0 || hashes == 0 {
            return Err(BloomError::InvalidConfig(format!(
                "bits and hashes must be non-zero, got bits={bits}, hashes={hashes}"
            )));
        }

        let word_count = usize::try_from(bits.div_ceil(64)).map_err(|_| {
            BloomError::InvalidConfig(format!("filter of {bits} bits is too large"))
        })?;
        let words = (0..word_count).map(|_| AtomicU64::new(0)).collect();

        Ok(Self {
            words,
            bit_count: word_count as u64 * 64,
            hash_count: hashes,
            items: AtomicUsize::new(0),
        })
    }

    /// Marks `key` as present.
    pub fn add(&self, key: impl AsRef<[u8]>) {
        for position in hash::positions(key.as_ref(), self.hash_count, self.bit_count) {
            let (word, mask) = Self::locate(position);
            self.words[word].fetch_or(mask, Ordering::Release);
        }
        self.items.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns `false` if `key` was definitely never added.
    ///
    /// A `true` answer may be a false positive and must be confirmed against
    /// the authoritative store.
    pub fn might_contain(&self, key: impl AsRef<[u8]>) -> bool {
        hash::positions(key.as_ref(), self.hash_count, self.bit_count).all(|position| {
            let (word, mask) = Self::locate(position);
            self.words[word].load(Ordering::Acquire) & mask != 0
        })
    }

    /// Number of bits in the array.
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Number of bit positions set per key.
    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    /// Number of `add` calls so far, including repeated keys.
    pub fn approx_items(&self) -> usize {
        self.items.load(Ordering::Relaxed)
    }

    /// False positive rate expected at the current fill, `(1 - e^(-k n / m))^k`.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let k = f64::from(self.hash_count);
        let n = self.approx_items() as f64;
        let m = self.bit_count as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    fn locate(position: u64) -> (usize, u64) {
        ((position / 64) as usize, 1_u64 << (position % 64))
    }
}

impl std::fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("bit_count", &self.bit_count)
            .field("hash_count", &self.hash_count)
            .field("items", &self.approx_items())
            .finish()
    }
}
