//! Quote Source Adapters
//!
//! Implementations of [`QuoteSourcePort`](crate::application::ports::QuoteSourcePort):
//!
//! - [`SnapshotQuoteSource`]: serves a fixed market snapshot (files, tests)
//! - [`CachedQuoteSource`]: wraps any source with a TTL cache

pub mod cached;
pub mod snapshot;

pub use cached::CachedQuoteSource;
pub use snapshot::{MarketSnapshot, SnapshotQuoteSource};
