use std::time::Duration;

use serde::{Deserialize, Serialize};
use serial_test::serial;

use super::*;
use crate::config::ConfigError;
use crate::routing::RouteMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Payload {
    answer: String,
    score: f64,
}

fn payload() -> Payload {
    Payload {
        answer: "Fifteen days.".to_string(),
        score: 0.8734512,
    }
}

#[test]
fn test_cache_key_format() {
    assert_eq!(cache_key("v3", "annual leave", false), "ask:v3:annual leave:false");
    assert_eq!(cache_key("v4", "x", true), "ask:v4:x:true");
}

#[test]
fn test_cache_status_header_values() {
    assert_eq!(CacheStatus::Hit.as_header_value(), "HIT");
    assert_eq!(CacheStatus::Miss.to_string(), "MISS");
    assert!(CacheStatus::Hit.is_hit());
    assert!(!CacheStatus::Miss.is_hit());
}

#[test]
fn test_ttl_policy_defaults() {
    let ttl = TtlPolicy::default();
    assert_eq!(ttl.ttl_for(RouteMode::Direct), Duration::from_secs(3600));
    assert_eq!(ttl.ttl_for(RouteMode::Augmented), Duration::from_secs(7200));
    assert_eq!(ttl.ttl_for(RouteMode::Fallback), Duration::from_secs(600));
}

#[test]
fn test_backend_kind_parse() {
    assert_eq!("redis".parse::<CacheBackendKind>().unwrap(), CacheBackendKind::Redis);
    assert_eq!(" Memory ".parse::<CacheBackendKind>().unwrap(), CacheBackendKind::Memory);
    assert_eq!("none".parse::<CacheBackendKind>().unwrap(), CacheBackendKind::Disabled);
    assert!(matches!(
        "memcached".parse::<CacheBackendKind>(),
        Err(ConfigError::InvalidCacheBackend { .. })
    ));
}

#[test]
fn test_config_validate_requires_redis_url() {
    let mut config = CacheConfig::redis("redis://localhost:6379");
    assert!(config.validate().is_ok());

    config.redis_url = None;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingEnvVar { .. })
    ));
}

#[test]
#[serial]
fn test_config_from_env_infers_redis_from_url() {
    unsafe {
        std::env::remove_var(CacheConfig::ENV_BACKEND);
        std::env::set_var(CacheConfig::ENV_REDIS_URL, "redis://cache:6379/0");
        std::env::set_var("FAQ_CACHE_TTL_FALLBACK_SECS", "30");
    }
    let config = CacheConfig::from_env();
    unsafe {
        std::env::remove_var(CacheConfig::ENV_REDIS_URL);
        std::env::remove_var("FAQ_CACHE_TTL_FALLBACK_SECS");
    }

    let config = config.unwrap();
    assert_eq!(config.backend, CacheBackendKind::Redis);
    assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379/0"));
    assert_eq!(config.ttl.fallback, Duration::from_secs(30));
    assert_eq!(config.ttl.direct, Duration::from_secs(3600));
}

#[test]
#[serial]
fn test_config_from_env_defaults_to_disabled() {
    unsafe {
        std::env::remove_var(CacheConfig::ENV_BACKEND);
        std::env::remove_var(CacheConfig::ENV_REDIS_URL);
    }
    let config = CacheConfig::from_env().unwrap();
    assert_eq!(config.backend, CacheBackendKind::Disabled);
    assert_eq!(config.key_version, "v3");
}

#[tokio::test]
async fn test_memory_store_roundtrip() {
    let store = MemoryStore::new(100);
    assert_eq!(store.get("k").await.unwrap(), None);

    store
        .set("k", "v".to_string(), Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_memory_store_expires_entries() {
    let store = MemoryStore::new(100);
    store
        .set("short", "v".to_string(), Duration::from_millis(50))
        .await
        .unwrap();
    store
        .set("long", "v".to_string(), Duration::from_secs(60))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(store.get("short").await.unwrap(), None);
    assert!(store.get("long").await.unwrap().is_some());
}

#[tokio::test]
async fn test_response_cache_roundtrip() {
    let cache = ResponseCache::new(MemoryStore::default(), "v3", TtlPolicy::default());
    let key = cache.key("annual leave", false);

    assert_eq!(cache.get::<Payload>(&key).await, None);
    cache.set(&key, &payload(), Duration::from_secs(60)).await;
    assert_eq!(cache.get::<Payload>(&key).await, Some(payload()));
}

#[tokio::test]
async fn test_response_cache_fails_open() {
    let store = std::sync::Arc::new(FailingStore::new());
    let cache = ResponseCache::new(store.clone(), "v3", TtlPolicy::default());

    cache.set("k", &payload(), Duration::from_secs(60)).await;
    assert_eq!(cache.get::<Payload>("k").await, None);
    assert_eq!(store.gets(), 1);
    assert_eq!(store.sets(), 1);
}

#[tokio::test]
async fn test_response_cache_undecodable_entry_is_miss() {
    let store = RecordingStore::new();
    store.seed("k", "{not json").await;
    let cache = ResponseCache::new(store, "v3", TtlPolicy::default());

    assert_eq!(cache.get::<Payload>("k").await, None);
}

#[tokio::test]
async fn test_response_cache_skips_disabled_store_and_zero_ttl() {
    let disabled = ResponseCache::new(CacheBackend::Disabled, "v3", TtlPolicy::default());
    disabled.set("k", &payload(), Duration::from_secs(60)).await;
    assert_eq!(disabled.get::<Payload>("k").await, None);

    let recording = std::sync::Arc::new(RecordingStore::new());
    let cache = ResponseCache::new(recording.clone(), "v3", TtlPolicy::default());
    cache.set("k", &payload(), Duration::ZERO).await;
    assert!(recording.writes().is_empty());
}

#[tokio::test]
async fn test_backend_open_memory_and_disabled() {
    let memory = CacheBackend::open(&CacheConfig::memory()).await;
    assert_eq!(memory.kind(), CacheBackendKind::Memory);
    assert!(memory.is_enabled());

    let disabled = CacheBackend::open(&CacheConfig::default()).await;
    assert_eq!(disabled.kind(), CacheBackendKind::Disabled);
    assert!(!disabled.is_enabled());
}

#[tokio::test]
async fn test_backend_open_unreachable_redis_disables_cache() {
    let mut config = CacheConfig::redis("redis://127.0.0.1:1/0");
    config.timeout = Duration::from_millis(100);

    let backend = CacheBackend::open(&config).await;
    assert_eq!(backend.kind(), CacheBackendKind::Disabled);
}

#[tokio::test]
async fn test_redis_store_rejects_invalid_url() {
    let result = RedisStore::connect("not-a-url", Duration::from_millis(100)).await;
    assert!(matches!(result, Err(CacheError::Connect(_))));
}
