//! Core types and traits for the Burrow short-code engine.
//!
//! This crate provides the base62 codec, the [`ShortCode`] type and the
//! [`Store`] capability consumed by the shortener.

pub mod base62;
pub mod error;
pub mod shortcode;
pub mod store;

pub use error::{CoreError, StoreError};
pub use shortcode::ShortCode;
pub use store::{InMemoryStore, ReadStore, Store};
