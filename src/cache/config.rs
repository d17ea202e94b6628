use std::str::FromStr;
use std::time::Duration;

use crate::config::{ConfigError, env};
use crate::constants::{
    DEFAULT_AUGMENTED_TTL_SECS, DEFAULT_CACHE_KEY_VERSION, DEFAULT_CACHE_TIMEOUT_MS,
    DEFAULT_DIRECT_TTL_SECS, DEFAULT_FALLBACK_TTL_SECS, DEFAULT_MEMORY_CACHE_CAPACITY,
};
use crate::routing::RouteMode;

/// Which store backs the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Redis,
    Memory,
    Disabled,
}

impl FromStr for CacheBackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            "none" | "disabled" | "off" => Ok(Self::Disabled),
            _ => Err(ConfigError::InvalidCacheBackend {
                value: s.to_string(),
            }),
        }
    }
}

/// Time-to-live per routing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub direct: Duration,
    pub augmented: Duration,
    pub fallback: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            direct: Duration::from_secs(DEFAULT_DIRECT_TTL_SECS),
            augmented: Duration::from_secs(DEFAULT_AUGMENTED_TTL_SECS),
            fallback: Duration::from_secs(DEFAULT_FALLBACK_TTL_SECS),
        }
    }
}

impl TtlPolicy {
    pub fn ttl_for(&self, mode: RouteMode) -> Duration {
        match mode {
            RouteMode::Direct => self.direct,
            RouteMode::Augmented => self.augmented,
            RouteMode::Fallback => self.fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    pub redis_url: Option<String>,
    /// Routing policy version baked into every key; bump it to orphan old entries.
    pub key_version: String,
    /// Connect and per-operation timeout for the redis backend.
    pub timeout: Duration,
    pub ttl: TtlPolicy,
    pub memory_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Disabled,
            redis_url: None,
            key_version: DEFAULT_CACHE_KEY_VERSION.to_string(),
            timeout: Duration::from_millis(DEFAULT_CACHE_TIMEOUT_MS),
            ttl: TtlPolicy::default(),
            memory_capacity: DEFAULT_MEMORY_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub const ENV_BACKEND: &'static str = "FAQ_CACHE_BACKEND";
    pub const ENV_REDIS_URL: &'static str = "FAQ_REDIS_URL";
    const ENV_KEY_VERSION: &'static str = "FAQ_CACHE_KEY_VERSION";
    const ENV_TIMEOUT_MS: &'static str = "FAQ_CACHE_CONNECT_TIMEOUT_MS";
    const ENV_TTL_DIRECT: &'static str = "FAQ_CACHE_TTL_DIRECT_SECS";
    const ENV_TTL_AUGMENTED: &'static str = "FAQ_CACHE_TTL_AUGMENTED_SECS";
    const ENV_TTL_FALLBACK: &'static str = "FAQ_CACHE_TTL_FALLBACK_SECS";
    const ENV_MEMORY_CAPACITY: &'static str = "FAQ_CACHE_MEMORY_CAPACITY";

    /// Backend defaults to redis when `FAQ_REDIS_URL` is set, disabled otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let redis_url = env::non_empty(Self::ENV_REDIS_URL);

        let backend = match env::non_empty(Self::ENV_BACKEND) {
            Some(value) => value.parse()?,
            None if redis_url.is_some() => CacheBackendKind::Redis,
            None => CacheBackendKind::Disabled,
        };

        let secs = |name: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            env::parse_or(name, default.as_secs()).map(Duration::from_secs)
        };

        Ok(Self {
            backend,
            redis_url,
            key_version: env::string_or(Self::ENV_KEY_VERSION, defaults.key_version),
            timeout: Duration::from_millis(env::parse_or(
                Self::ENV_TIMEOUT_MS,
                DEFAULT_CACHE_TIMEOUT_MS,
            )?),
            ttl: TtlPolicy {
                direct: secs(Self::ENV_TTL_DIRECT, defaults.ttl.direct)?,
                augmented: secs(Self::ENV_TTL_AUGMENTED, defaults.ttl.augmented)?,
                fallback: secs(Self::ENV_TTL_FALLBACK, defaults.ttl.fallback)?,
            },
            memory_capacity: env::parse_or(Self::ENV_MEMORY_CAPACITY, defaults.memory_capacity)?,
        })
    }

    pub fn memory() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            ..Default::default()
        }
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackendKind::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == CacheBackendKind::Redis && self.redis_url.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_REDIS_URL,
            });
        }
        Ok(())
    }
}
