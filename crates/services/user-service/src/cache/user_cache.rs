//! Redis cache for user snapshots.
//!
//! Entries are keyed by user id and never expire; they leave the cache only
//! when an update invalidates them.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use tracing::{debug, warn};

use common::{AppError, AppResult, CacheConfig};
use domain::{User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache key prefix for user data
pub const CACHE_PREFIX_USER: &str = "user:";

/// Build the cache key for a user id.
pub fn cache_key(id: UserId) -> String {
    format!("{}{}", CACHE_PREFIX_USER, id)
}

/// Cache trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Store a snapshot with no expiration
    async fn put(&self, user: &User) -> AppResult<()>;

    /// Look up a snapshot. A missing key is `Ok(None)`.
    async fn get(&self, id: UserId) -> AppResult<Option<User>>;

    /// Drop a snapshot. Deleting an absent key succeeds.
    async fn delete(&self, id: UserId) -> AppResult<()>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> AppResult<()>;
}

/// Redis-backed implementation of [`UserCache`].
#[derive(Clone)]
pub struct RedisUserCache {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisUserCache {
    /// Connect to Redis.
    pub async fn connect(config: &CacheConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str()).map_err(cache_error)?;
        let conn = tokio::time::timeout(config.timeout(), ConnectionManager::new(client))
            .await
            .map_err(|_| AppError::cache_unavailable("Timed out connecting to Redis"))?
            .map_err(cache_error)?;

        tracing::info!("Redis cache connected");

        Ok(Self {
            conn,
            timeout: config.timeout(),
        })
    }
}

/// Run a cache call under a deadline.
async fn bounded<T, F>(timeout: Duration, op: &'static str, fut: F) -> AppResult<T>
where
    F: Future<Output = Result<T, RedisError>> + Send,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(cache_error),
        Err(_) => Err(AppError::cache_unavailable(format!(
            "{} timed out after {:?}",
            op, timeout
        ))),
    }
}

/// Decode a cached snapshot; an undecodable entry counts as a miss.
fn decode_snapshot(key: &str, json: &str) -> Option<User> {
    match serde_json::from_str(json) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Failed to deserialize cached value for key {}: {}", key, e);
            None
        }
    }
}

fn cache_error(err: RedisError) -> AppError {
    AppError::from(err)
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn put(&self, user: &User) -> AppResult<()> {
        let key = cache_key(user.id);
        let json = serde_json::to_string(user)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        let mut conn = self.conn.clone();
        let _: () = bounded(self.timeout, "put", conn.set(&key, json)).await?;

        debug!("Cached {}", key);
        Ok(())
    }

    async fn get(&self, id: UserId) -> AppResult<Option<User>> {
        let key = cache_key(id);
        let mut conn = self.conn.clone();
        let value: Option<String> = bounded(self.timeout, "get", conn.get(&key)).await?;

        let Some(json) = value else {
            debug!("Cache miss for {}", key);
            return Ok(None);
        };

        let user = decode_snapshot(&key, &json);
        if user.is_some() {
            debug!("Cache hit for {}", key);
        }
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        let key = cache_key(id);
        let mut conn = self.conn.clone();
        let _: () = bounded(self.timeout, "delete", conn.del(&key)).await?;

        debug!("Invalidated {}", key);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = bounded(
            self.timeout,
            "ping",
            redis::cmd("PING").query_async(&mut conn),
        )
        .await?;
        Ok(())
    }
}
