//! Caching layer for parsed opening hours.
//!
//! Place records are looked at over and over, and most of them share a
//! handful of schedules ("Mo-Fr 09:00-18:00" and friends), so parsed results
//! are memoized by their raw string.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::hours::{OpeningHours, ParsedHours};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 10_000,
        }
    }
}

/// Parsed schedules keyed by the raw hours string.
#[derive(Clone)]
pub struct HoursCache {
    entries: MokaCache<String, Arc<ParsedHours>>,
}

impl HoursCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Parse `raw`, reusing an earlier result for the same string.
    pub async fn parse(&self, raw: &str) -> Arc<ParsedHours> {
        self.entries
            .get_with_by_ref(raw, async {
                trace!(raw, "parsing opening hours");
                Arc::new(OpeningHours::parse_with_diagnostics(raw))
            })
            .await
    }

    /// Get a cached entry without parsing.
    pub async fn get(&self, raw: &str) -> Option<Arc<ParsedHours>> {
        self.entries.get(raw).await
    }

    /// Get cache statistics (for monitoring).
    ///
    /// Moka applies writes lazily, so the count may trail recent inserts.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
