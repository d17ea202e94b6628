use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{CacheStore, TtlPolicy};
use crate::routing::RouteMode;

/// Builds `ask:{version}:{normalized}:{force_augment}`.
pub fn cache_key(version: &str, normalized: &str, force_augment: bool) -> String {
    format!("ask:{version}:{normalized}:{force_augment}")
}

/// Fail-open JSON response cache over a [`CacheStore`].
///
/// Store failures and undecodable entries read as a miss; write failures are dropped.
#[derive(Debug)]
pub struct ResponseCache<S> {
    store: S,
    key_version: String,
    ttl: TtlPolicy,
}

impl<S: CacheStore> ResponseCache<S> {
    pub fn new(store: S, key_version: impl Into<String>, ttl: TtlPolicy) -> Self {
        Self {
            store,
            key_version: key_version.into(),
            ttl,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self, normalized: &str, force_augment: bool) -> String {
        cache_key(&self.key_version, normalized, force_augment)
    }

    pub fn ttl_for(&self, mode: RouteMode) -> Duration {
        self.ttl.ttl_for(mode)
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Cached entry failed to decode, treating as miss");
                None
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if ttl.is_zero() || !self.store.is_enabled() {
            return;
        }

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to encode response for cache");
                return;
            }
        };

        if let Err(e) = self.store.set(key, raw, ttl).await {
            debug!(error = %e, "Cache write failed, skipping");
        }
    }
}
