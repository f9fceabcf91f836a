//! Quote cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Quote cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time to live of cached spots and chains, in seconds.
    #[serde(default = "default_quote_ttl_secs")]
    pub quote_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            quote_ttl_secs: default_quote_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// TTL as a duration.
    #[must_use]
    pub const fn quote_ttl(&self) -> Duration {
        Duration::from_secs(self.quote_ttl_secs)
    }
}

const fn default_quote_ttl_secs() -> u64 {
    60
}
