//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `FAQ_*` environment variables; values are read
//! once at startup.

pub mod error;
pub(crate) mod env;


pub use error::ConfigError;

use std::net::IpAddr;

use crate::cache::CacheConfig;
use crate::constants::{DEFAULT_COLLECTION_NAME, DEFAULT_QDRANT_URL, DEFAULT_TOP_K};
use crate::embedding::EmbeddingConfig;
use crate::generation::GeneratorConfig;
use crate::routing::RoutingThresholds;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FAQ_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Candidates requested per query. Default: `5`.
    pub top_k: usize,

    /// Direct/min/gap routing thresholds.
    pub thresholds: RoutingThresholds,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Knowledge-base collection name. Default: `hr_faq`.
    pub collection: String,

    pub embedding: EmbeddingConfig,

    pub cache: CacheConfig,

    pub generator: GeneratorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            top_k: DEFAULT_TOP_K,
            thresholds: RoutingThresholds::default(),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            embedding: EmbeddingConfig::default(),
            cache: CacheConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "FAQ_PORT";
    const ENV_BIND_ADDR: &'static str = "FAQ_BIND_ADDR";
    const ENV_TOP_K: &'static str = "FAQ_TOP_K";
    const ENV_QDRANT_URL: &'static str = "FAQ_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "FAQ_COLLECTION";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let top_k = env::parse_or(Self::ENV_TOP_K, defaults.top_k)?;
        let thresholds = RoutingThresholds::from_env()?;
        let qdrant_url = env::string_or(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = env::string_or(Self::ENV_COLLECTION, defaults.collection);

        Ok(Self {
            port,
            bind_addr,
            top_k,
            thresholds,
            qdrant_url,
            collection,
            embedding: EmbeddingConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            generator: GeneratorConfig::from_env()?,
        })
    }

    /// Validates ranges and paths (does not touch the network).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK { value: self.top_k });
        }

        self.thresholds.validate()?;
        self.embedding.validate()?;
        self.cache.validate()?;

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match std::env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match std::env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }
}
