//! Quote Cache Port (Driven Port)
//!
//! Short-lived cache owned by the quote collaborator. Pricing and domain code
//! never see it.

use std::time::Duration;

/// Key-value cache with per-entry time to live.
pub trait QuoteCachePort<T>: Send + Sync {
    /// Fresh value for `key`, if any.
    fn get(&self, key: &str) -> Option<T>;

    /// Store `value` under `key` for `ttl`.
    fn put(&self, key: &str, value: T, ttl: Duration);
}
