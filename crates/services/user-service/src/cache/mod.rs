//! Cache layer for user snapshots.

mod user_cache;

pub use user_cache::{cache_key, RedisUserCache, UserCache, CACHE_PREFIX_USER};

#[cfg(any(test, feature = "test-utils"))]
pub use user_cache::MockUserCache;
