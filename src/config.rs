//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::DEFAULT_LRU_CAPACITY;
use crate::error::{Result, ServerError};

// == Cache Strategy ==
/// Which cache variant backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStrategy {
    /// Single mutex around the map
    Exclusive,
    /// Shared lookups, upgradable inserts
    ReadersWriter,
    /// Readers/writer with bounded LRU eviction
    Lru,
}

impl FromStr for CacheStrategy {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" | "mutex" => Ok(Self::Exclusive),
            "rw" | "readers_writer" => Ok(Self::ReadersWriter),
            "lru" | "rw_lru" => Ok(Self::Lru),
            other => Err(ServerError::InvalidConfig(format!(
                "unknown cache strategy '{}' (expected exclusive, rw or lru)",
                other
            ))),
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exclusive => "exclusive",
            Self::ReadersWriter => "readers_writer",
            Self::Lru => "lru",
        };
        f.write_str(name)
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Directory searched (recursively) for requested files
    pub root_dir: PathBuf,
    /// Cache variant
    pub cache_strategy: CacheStrategy,
    /// Maximum resident entries for the LRU strategy
    pub cache_capacity: usize,
    /// Tokio worker threads, `None` for the runtime default
    pub worker_threads: Option<usize>,
    /// Seconds between stats log lines, 0 disables the reporter
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset variables take their defaults. A variable that is set but does
    /// not parse is a configuration error.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` - Bind address (default: 127.0.0.1)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `ROOT_DIR` - Directory holding served files (default: ./root)
    /// - `CACHE_STRATEGY` - exclusive, rw or lru (default: rw)
    /// - `CACHE_CAPACITY` - LRU capacity (default: 10)
    /// - `WORKER_THREADS` - Tokio worker threads, 0 for the runtime default
    /// - `STATS_INTERVAL` - Stats log frequency in seconds (default: 60)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.server_port),
            root_dir: lookup("ROOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            cache_strategy: parse_var(&lookup, "CACHE_STRATEGY")?
                .unwrap_or(defaults.cache_strategy),
            cache_capacity: parse_var(&lookup, "CACHE_CAPACITY")?
                .unwrap_or(defaults.cache_capacity),
            worker_threads: parse_var(&lookup, "WORKER_THREADS")?.filter(|&n: &usize| n > 0),
            stats_interval: parse_var(&lookup, "STATS_INTERVAL")?
                .unwrap_or(defaults.stats_interval),
        })
    }

    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_strategy == CacheStrategy::Lru && self.cache_capacity == 0 {
            return Err(ServerError::InvalidCapacity(self.cache_capacity));
        }
        if self.server_host.trim().is_empty() {
            return Err(ServerError::InvalidConfig(
                "SERVER_HOST cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            root_dir: PathBuf::from("./root"),
            cache_strategy: CacheStrategy::ReadersWriter,
            cache_capacity: DEFAULT_LRU_CAPACITY,
            worker_threads: None,
            stats_interval: 60,
        }
    }
}

/// Parses a variable if it is set; `Ok(None)` when unset.
fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            ServerError::InvalidConfig(format!("{} has an invalid value '{}'", name, raw))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.root_dir, PathBuf::from("./root"));
        assert_eq!(config.cache_strategy, CacheStrategy::ReadersWriter);
        assert_eq!(config.cache_capacity, 10);
        assert_eq!(config.worker_threads, None);
        assert_eq!(config.stats_interval, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for var in [
            "SERVER_HOST",
            "SERVER_PORT",
            "ROOT_DIR",
            "CACHE_STRATEGY",
            "CACHE_CAPACITY",
            "WORKER_THREADS",
            "STATS_INTERVAL",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_strategy, CacheStrategy::ReadersWriter);
        assert_eq!(config.cache_capacity, 10);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("exclusive".parse::<CacheStrategy>().unwrap(), CacheStrategy::Exclusive);
        assert_eq!("RW".parse::<CacheStrategy>().unwrap(), CacheStrategy::ReadersWriter);
        assert_eq!(" lru ".parse::<CacheStrategy>().unwrap(), CacheStrategy::Lru);
        assert!(matches!(
            "fifo".parse::<CacheStrategy>(),
            Err(ServerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [
            CacheStrategy::Exclusive,
            CacheStrategy::ReadersWriter,
            CacheStrategy::Lru,
        ] {
            assert_eq!(strategy.to_string().parse::<CacheStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_validate_rejects_zero_lru_capacity() {
        let config = Config {
            cache_strategy: CacheStrategy::Lru,
            cache_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ServerError::InvalidCapacity(0))
        ));

        // Capacity is irrelevant for unbounded strategies
        let config = Config {
            cache_strategy: CacheStrategy::Exclusive,
            cache_capacity: 0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = from_vars(&[
            ("SERVER_PORT", "9090"),
            ("CACHE_STRATEGY", "lru"),
            ("CACHE_CAPACITY", " 32 "),
            ("WORKER_THREADS", "0"),
        ])
        .unwrap();
        assert_eq!(config.server_port, 9090);
        assert_eq!(config.cache_strategy, CacheStrategy::Lru);
        assert_eq!(config.cache_capacity, 32);
        assert_eq!(config.worker_threads, None);
        assert_eq!(config.stats_interval, 60);
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        let result = from_vars(&[("CACHE_STRATEGY", "lru"), ("CACHE_CAPACITY", "-5")]);
        match result {
            Err(ServerError::InvalidConfig(msg)) => assert!(msg.contains("CACHE_CAPACITY")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = from_vars(&[("CACHE_STRATEGY", "lur"), ("CACHE_CAPACITY", "0")]);
        assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
    }

    #[test]
    fn test_unparseable_port_is_rejected() {
        assert!(matches!(
            from_vars(&[("SERVER_PORT", "http")]),
            Err(ServerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_lru_capacity_from_vars_fails_validation() {
        let config = from_vars(&[("CACHE_STRATEGY", "lru"), ("CACHE_CAPACITY", "0")]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ServerError::InvalidCapacity(0))
        ));
    }
}
