//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - `persistence/`: watchlist repositories
//! - `cache/`: quote caches with per-entry TTL
//! - `quotes/`: quote sources (file snapshot, caching decorator)

pub mod cache;
pub mod persistence;
pub mod quotes;
