//! OTP lifecycle and store backend configuration

use serde::{Deserialize, Serialize};

use super::{parse_or, CacheConfig, DatabaseConfig};

/// Default OTP lifetime in seconds (5 minutes)
pub const DEFAULT_OTP_TTL_SECONDS: i64 = 300;

/// Which backend persists OTP records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; lost on restart
    Memory,
    /// Redis with native key expiry
    Redis,
    /// MySQL table swept periodically
    #[serde(rename = "mysql")]
    MySql,
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Memory
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            "mysql" => Ok(StoreBackend::MySql),
            _ => Err(format!("Invalid OTP store backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::MySql => write!(f, "mysql"),
        }
    }
}

/// Store backend selection plus the connection settings for each backend
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// MySQL settings (used when `backend` is `mysql`)
    pub database: DatabaseConfig,

    /// Redis settings (used when `backend` is `redis`)
    pub cache: CacheConfig,
}

impl StoreConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Create from a key/value source
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend: parse_or(lookup, "OTP_STORE", StoreBackend::default()),
            database: DatabaseConfig::from_lookup(lookup),
            cache: CacheConfig::from_lookup(lookup),
        }
    }
}

/// OTP lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// How long an issued code stays matchable
    pub ttl_seconds: i64,

    /// Remove a record once it has been verified
    #[serde(default)]
    pub consume_on_verify: bool,

    /// How often expired records are physically deleted (0 disables the sweeper)
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
            consume_on_verify: false,
            sweep_interval_seconds: 60,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Create from a key/value source
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ttl_seconds = parse_or(lookup, "OTP_TTL_SECONDS", defaults.ttl_seconds);
        Self {
            ttl_seconds: if ttl_seconds > 0 { ttl_seconds } else { defaults.ttl_seconds },
            consume_on_verify: parse_or(lookup, "OTP_CONSUME_ON_VERIFY", defaults.consume_on_verify),
            sweep_interval_seconds: parse_or(
                lookup,
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
        }
    }
}
