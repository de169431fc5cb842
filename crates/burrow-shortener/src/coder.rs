//! Short-code producers.
//!
//! Each coder persists the mapping it issues and registers the code in the
//! existence filter, so every code in the filter is owned by the store.
//!
//! - [`HashCoder`] derives a fixed 7-character code from a digest of the URL.
//!   The same URL maps to the same code, collisions are resolved by rehashing.
//! - [`IdCoder`] encodes the next Snowflake ID. Every call yields a new code,
//!   even for a URL that was shortened before.

pub mod hash;
pub mod id;

pub use hash::{HashCoder, HashMethod};
pub use id::IdCoder;
