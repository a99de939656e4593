//! Key-value backends used by the item store.
//!
//! The store only needs five primitives (get, set, delete, atomic increment
//! and pattern scan) plus a ping for health checks. [`RedisKv`] talks to a
//! real Redis server; [`MemoryKv`] keeps everything in-process for local
//! development and tests.

mod memory;
mod redis;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Config, StoreBackend};

pub use self::memory::MemoryKv;
pub use self::redis::RedisKv;

/// Outcome of a successful key lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Vec<u8>),
    Missing,
}

impl From<Option<Vec<u8>>> for Lookup {
    fn from(value: Option<Vec<u8>>) -> Self {
        match value {
            Some(bytes) => Lookup::Found(bytes),
            None => Lookup::Missing,
        }
    }
}

#[derive(Debug, Error)]
pub enum KvError {
    /// The backend could not be reached
    #[error("connection error: {0}")]
    Connection(String),
    /// The backend rejected or failed a command
    #[error("command failed: {0}")]
    Command(String),
}

impl From<::redis::RedisError> for KvError {
    fn from(err: ::redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
            KvError::Connection(err.to_string())
        } else {
            KvError::Command(err.to_string())
        }
    }
}

impl From<deadpool_redis::PoolError> for KvError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        KvError::Connection(format!("failed to get pooled connection: {}", err))
    }
}

/// Minimal key-value client surface the item store is written against
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Lookup, KvError>;

    /// Write without expiration, replacing any previous value
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), KvError>;

    /// Returns the number of keys removed (0 or 1)
    async fn delete(&self, key: &str) -> Result<u64, KvError>;

    /// Atomically increment an integer counter, returning the new value
    async fn incr(&self, key: &str) -> Result<i64, KvError>;

    /// All keys matching a glob pattern, in backend order
    async fn scan(&self, pattern: &str) -> Result<Vec<String>, KvError>;

    async fn ping(&self) -> Result<(), KvError>;
}

/// Connect to the backend selected in configuration
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn KvStore>> {
    match config.store_backend {
        StoreBackend::Redis => {
            let kv = RedisKv::connect(
                &config.redis_url,
                config.redis_pool_size,
                config.redis_timeout,
            )
            .await?;
            Ok(Arc::new(kv))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; items will not survive a restart");
            Ok(Arc::new(MemoryKv::new()))
        }
    }
}
