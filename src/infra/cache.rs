//! Redis cache implementation.
//!
//! Backs the per-client rate limiter and the health check. Application data
//! is never cached here: each request re-reads authoritative state from the
//! database.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use crate::config::{Config, CACHE_PREFIX_RATE_LIMIT};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }

    /// Check whether a key exists (used by the health check).
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        conn.exists(key)
            .await
            .map_err(|e| AppError::internal(format!("Redis error: {}", e)))
    }

    /// Fixed-window rate limit check.
    ///
    /// Increments the counter for `key` and returns `(count, allowed)`.
    /// The window expires `window_seconds` after its first request.
    pub async fn check_rate_limit(
        &self,
        key: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let mut conn = self.connection.clone();
        let full_key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, key);

        let count: u64 = conn
            .incr(&full_key, 1u64)
            .await
            .map_err(|e| AppError::internal(format!("Redis error: {}", e)))?;

        // First request in this window starts the expiry clock
        if count == 1 {
            let _: () = conn
                .expire(&full_key, window_seconds as i64)
                .await
                .map_err(|e| AppError::internal(format!("Redis error: {}", e)))?;
        }

        Ok((count, count <= max_requests))
    }
}
