//! Small parsing helpers shared by the per-module `from_env` constructors.

use std::path::PathBuf;
use std::str::FromStr;

use super::ConfigError;

/// Reads `name` and trims it; unset and blank values are `None`.
pub(crate) fn non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn string_or(name: &str, default: String) -> String {
    non_empty(name).unwrap_or(default)
}

pub(crate) fn optional_path(name: &str) -> Option<PathBuf> {
    non_empty(name).map(PathBuf::from)
}

/// Parses `name` when set. A malformed value is an error, never the default.
pub(crate) fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}
