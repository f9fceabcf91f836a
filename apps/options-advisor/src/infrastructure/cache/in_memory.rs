//! Process-local TTL cache.
//!
//! Entries expire lazily: a stale entry is dropped on the read that finds it.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::application::ports::QuoteCachePort;

#[derive(Debug)]
struct Entry<T> {
    value: T,
    expires_at: Instant,
}

/// In-memory implementation of [`QuoteCachePort`].
#[derive(Debug)]
pub struct InMemoryQuoteCache<T> {
    entries: RwLock<HashMap<String, Entry<T>>>,
}

impl<T> Default for InMemoryQuoteCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> InMemoryQuoteCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> QuoteCachePort<T> for InMemoryQuoteCache<T>
where
    T: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                Some(e) if e.expires_at > now => return Some(e.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.remove(key);
        }
        None
    }

    fn put(&self, key: &str, value: T, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), Entry { value, expires_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_are_returned() {
        let cache = InMemoryQuoteCache::new();
        cache.put("NIFTY", 26_000.0_f64, Duration::from_secs(60));
        assert_eq!(cache.get("NIFTY"), Some(26_000.0));
        assert_eq!(cache.get("BANKNIFTY"), None);
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let cache = InMemoryQuoteCache::new();
        cache.put("NIFTY", 1_u32, Duration::ZERO);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("NIFTY"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn put_replaces_existing_key() {
        let cache = InMemoryQuoteCache::new();
        cache.put("a", 1_u32, Duration::from_secs(60));
        cache.put("a", 2, Duration::from_secs(60));
        cache.put("b", 3, Duration::ZERO);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.len(), 1);
    }
}
