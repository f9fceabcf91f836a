//! Quote Cache Adapters
//!
//! Implementations of [`QuoteCachePort`](crate::application::ports::QuoteCachePort).

pub mod in_memory;

pub use in_memory::InMemoryQuoteCache;
