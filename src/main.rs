//! order-api entry point.
//!
//! Loads configuration, sets up tracing, connects and migrates the database,
//! then serves the HTTP API until SIGINT/SIGTERM.

use anyhow::Context;
use order_api::config::ServerConfig;
use order_api::server::ServerBuilder;
use order_api::storage::{MIGRATOR, PostgresOrderRepository};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent if the file does not exist; deployments inject env vars directly.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    info!(
        addr = %config.listen_addr(),
        max_connections = config.max_connections,
        "starting order-api"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("database ready");

    let result = ServerBuilder::new()
        .with_repository(PostgresOrderRepository::new(pool.clone()))
        .with_cors_origins(config.cors_allowed_origins.clone())
        .serve(&config.listen_addr())
        .await;

    pool.close().await;
    result
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,order_api=debug,tower_http=info".into()),
        )
        .init();
}
