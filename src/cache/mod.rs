//! Response cache.
//!
//! [`ResponseCache`] stores serialized `/ask` responses keyed by normalized question and
//! rewrite flag. Backends sit behind [`CacheStore`]: redis, an in-process moka store, or
//! disabled. The cache fails open: it can turn a hit into a miss, never into an error.

pub mod config;
pub mod error;
pub mod memory;
pub mod redis_store;
pub mod response;
pub mod store;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use config::{CacheBackendKind, CacheConfig, TtlPolicy};
pub use error::CacheError;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use response::{ResponseCache, cache_key};
pub use store::{CacheBackend, CacheStore};
pub use types::{CACHE_STATUS_HEADER, CacheStatus};

#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingStore, RecordingStore};
