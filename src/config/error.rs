//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric variable was set but could not be parsed.
    #[error("failed to parse {name}='{value}' as a number")]
    InvalidNumber { name: &'static str, value: String },

    /// A routing threshold is NaN/infinite or negative where that makes no sense.
    #[error("invalid threshold {name}={value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// `min` must not exceed `direct`, otherwise augmented mode is unreachable.
    #[error("min threshold ({min}) must not exceed direct threshold ({direct})")]
    ThresholdOrder { min: f64, direct: f64 },

    /// Retrieval needs at least one candidate.
    #[error("top_k must be at least 1, got {value}")]
    InvalidTopK { value: usize },

    /// Unknown cache backend name.
    #[error("unknown cache backend '{value}' (expected redis, memory or none)")]
    InvalidCacheBackend { value: String },

    /// The redis backend was selected without an endpoint.
    #[error("cache backend 'redis' requires {name}")]
    MissingEnvVar { name: &'static str },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
