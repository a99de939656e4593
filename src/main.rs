mod api_doc;
mod config;
mod error;
mod handlers;
mod item_store;
mod kv;
mod models;
mod routes;
mod state;

use anyhow::Context;
use config::Config;
use item_store::ItemStore;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rust_redis_catalog=info,tower_http=info")),
        )
        .init();

    tracing::info!("rust-redis-catalog starting");

    let config = Config::from_env()?;
    config.log_startup();

    let kv = kv::connect(&config).await?;
    let state = AppState {
        item_store: ItemStore::new(kv),
        config: Arc::new(config),
    };

    let addr = format!("{}:{}", state.config.service_host, state.config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}{}", addr, routes::SWAGGER_UI);

    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("rust-redis-catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
