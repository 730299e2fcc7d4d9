//! Matching and server configuration.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "PLACE_CORE_ADDR";
/// Environment variable holding the hours cache TTL in seconds.
pub const CACHE_TTL_VAR: &str = "PLACE_CORE_CACHE_TTL_SECS";
/// Environment variable holding the hours cache capacity.
pub const CACHE_CAPACITY_VAR: &str = "PLACE_CORE_CACHE_CAPACITY";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Thresholds used when reconciling place records.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Largest name edit distance a fuzzy match may have.
    pub max_distance: usize,

    /// Minimum attribute score for a scored match.
    pub osm_min_score: f64,
}

impl MatchConfig {
    pub fn new(max_distance: usize, osm_min_score: f64) -> Self {
        Self {
            max_distance,
            osm_min_score,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_distance: 3,
            osm_min_score: 6.0,
        }
    }
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub cache: CacheConfig,
    pub matching: MatchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            cache: CacheConfig::default(),
            matching: MatchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`. Unset variables keep their default;
    /// unparseable ones keep it too, with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = parse_var::<SocketAddr>(&lookup, ADDR_VAR) {
            config.addr = addr;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, CACHE_TTL_VAR) {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = parse_var::<u64>(&lookup, CACHE_CAPACITY_VAR) {
            config.cache.max_capacity = capacity;
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn match_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.max_distance, 3);
        assert_eq!(config.osm_min_score, 6.0);
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.cache.ttl, CacheConfig::default().ttl);
        assert_eq!(config.cache.max_capacity, CacheConfig::default().max_capacity);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ADDR_VAR, "0.0.0.0:8080"),
            (CACHE_TTL_VAR, " 120 "),
            (CACHE_CAPACITY_VAR, "50"),
        ]));
        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.cache.ttl, Duration::from_secs(120));
        assert_eq!(config.cache.max_capacity, 50);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ADDR_VAR, "localhost"),
            (CACHE_TTL_VAR, "soon"),
        ]));
        assert_eq!(config.addr, ServerConfig::default().addr);
        assert_eq!(config.cache.ttl, CacheConfig::default().ttl);
    }
}
