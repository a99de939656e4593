use std::env;
use std::time::Duration;
use anyhow::{bail, Context, Result};

/// Which key-value backend the item store talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub redis_pool_size: usize,
    /// Deadline for pool checkout, connection setup and each command
    pub redis_timeout: Duration,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("redis") => StoreBackend::Redis,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("STORE_BACKEND must be 'redis' or 'memory', got '{}'", other),
        };

        let redis_url = lookup("REDIS_URL")
            .unwrap_or_else(|| "redis://localhost:6379".to_string());

        let redis_pool_size = lookup("REDIS_POOL_SIZE")
            .unwrap_or_else(|| "10".to_string())
            .parse::<usize>()
            .context("REDIS_POOL_SIZE must be a positive integer")?;
        if redis_pool_size == 0 {
            bail!("REDIS_POOL_SIZE must be a positive integer, got 0");
        }

        let redis_timeout_ms = lookup("REDIS_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u64>()
            .context("REDIS_TIMEOUT_MS must be a positive number of milliseconds")?;
        if redis_timeout_ms == 0 {
            bail!("REDIS_TIMEOUT_MS must be a positive number of milliseconds, got 0");
        }
        let redis_timeout = Duration::from_millis(redis_timeout_ms);

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            store_backend,
            redis_url,
            redis_pool_size,
            redis_timeout,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match self.store_backend {
            StoreBackend::Redis => {
                tracing::info!("  Store backend: redis");
                tracing::info!("  Redis URL: {}", self.redis_url);
                tracing::info!("  Redis pool size: {}", self.redis_pool_size);
                tracing::info!("  Redis timeout: {:?}", self.redis_timeout);
            }
            StoreBackend::Memory => {
                tracing::info!("  Store backend: in-memory (data is lost on exit)");
            }
        }
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}
