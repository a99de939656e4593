use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Connection, Pool, Runtime, Timeouts};
use redis::AsyncCommands;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use super::{KvError, KvStore, Lookup};

/// Keys requested per SCAN round trip
const SCAN_BATCH: usize = 100;

/// Redis-backed key-value client with a deadpool connection pool
#[derive(Clone)]
pub struct RedisKv {
    pool: Pool,
    timeout: Duration,
}

impl RedisKv {
    /// Build the pool and verify the server answers a PING.
    ///
    /// `timeout` bounds pool checkout, connection setup and every command, so
    /// an unresponsive server fails requests instead of hanging them.
    pub async fn connect(url: &str, pool_size: usize, timeout: Duration) -> anyhow::Result<Self> {
        tracing::info!("Connecting to Redis at: {}", url);

        let pool = PoolConfig::from_url(url)
            .builder()
            .map_err(|e| anyhow::anyhow!("Failed to create Redis pool builder: {}", e))?
            .max_size(pool_size)
            .timeouts(Timeouts {
                wait: Some(timeout),
                create: Some(timeout),
                recycle: Some(timeout),
            })
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create Redis pool: {}", e))?;

        let kv = Self { pool, timeout };
        kv.ping()
            .await
            .map_err(|e| anyhow::anyhow!("Redis at {} is not reachable: {}", url, e))?;

        tracing::info!("Successfully connected to Redis");
        Ok(kv)
    }

    async fn conn(&self) -> Result<Connection, KvError> {
        Ok(self.pool.get().await?)
    }

    /// Run one store operation under the configured deadline
    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T, KvError>
    where
        F: Future<Output = Result<T, KvError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Redis {} timed out after {:?}", op, self.timeout);
                Err(KvError::Connection(format!(
                    "{} timed out after {:?}",
                    op, self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl KvStore for RedisKv {
    async fn get(&self, key: &str) -> Result<Lookup, KvError> {
        self.bounded("GET", async {
            let mut conn = self.conn().await?;
            let value: Option<Vec<u8>> = conn.get(key).await?;
            Ok(value.into())
        })
        .await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), KvError> {
        self.bounded("SET", async {
            let mut conn = self.conn().await?;
            conn.set::<_, _, ()>(key, value).await?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<u64, KvError> {
        self.bounded("DEL", async {
            let mut conn = self.conn().await?;
            let removed: u64 = conn.del(key).await?;
            Ok(removed)
        })
        .await
    }

    async fn incr(&self, key: &str) -> Result<i64, KvError> {
        self.bounded("INCR", async {
            let mut conn = self.conn().await?;
            let value: i64 = conn.incr(key, 1i64).await?;
            Ok(value)
        })
        .await
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>, KvError> {
        self.bounded("SCAN", async {
            let mut conn = self.conn().await?;
            let mut seen = HashSet::new();
            let mut keys = Vec::new();
            let mut cursor: u64 = 0;

            // SCAN may return a key more than once across iterations
            loop {
                let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(pattern)
                    .arg("COUNT")
                    .arg(SCAN_BATCH)
                    .query_async(&mut conn)
                    .await?;

                for key in batch {
                    if seen.insert(key.clone()) {
                        keys.push(key);
                    }
                }

                if next == 0 {
                    break;
                }
                cursor = next;
            }

            tracing::debug!("SCAN {} matched {} keys", pattern, keys.len());
            Ok(keys)
        })
        .await
    }

    async fn ping(&self) -> Result<(), KvError> {
        self.bounded("PING", async {
            let mut conn = self.conn().await?;
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }
}
