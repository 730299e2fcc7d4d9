//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, HoursCache};
use crate::config::MatchConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Parsed opening hours, keyed by raw string
    pub hours: HoursCache,

    /// Matching thresholds
    pub matching: Arc<MatchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(cache_config: &CacheConfig, matching: MatchConfig) -> Self {
        Self {
            hours: HoursCache::new(cache_config),
            matching: Arc::new(matching),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&CacheConfig::default(), MatchConfig::default())
    }
}
