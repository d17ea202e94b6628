use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tokio::time::timeout;

use super::{CacheError, CacheStore};

/// Redis-backed store. Every operation is bounded by the configured timeout.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    timeout: Duration,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connects and pings within `limit`.
    pub async fn connect(url: &str, limit: Duration) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::Connect(e.to_string()))?;

        let mut connection = timeout(limit, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| CacheError::Timeout {
                operation: "connect",
            })?
            .map_err(|e| CacheError::Connect(e.to_string()))?;

        timeout(limit, redis::cmd("PING").query_async::<String>(&mut connection))
            .await
            .map_err(|_| CacheError::Timeout { operation: "ping" })?
            .map_err(|e| CacheError::Connect(e.to_string()))?;

        Ok(Self {
            connection,
            timeout: limit,
        })
    }
}

impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        timeout(self.timeout, conn.get::<_, Option<String>>(key))
            .await
            .map_err(|_| CacheError::Timeout { operation: "get" })?
            .map_err(|e| CacheError::Operation {
                operation: "get",
                message: e.to_string(),
            })
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        timeout(
            self.timeout,
            conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)),
        )
        .await
        .map_err(|_| CacheError::Timeout { operation: "set" })?
        .map_err(|e| CacheError::Operation {
            operation: "set",
            message: e.to_string(),
        })
    }
}
