pub mod connection;
pub mod job_repository;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod store;

use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StorageBackend};

pub use job_repository::PgJobRepository;
pub use memory::MemoryJobStore;
pub use store::{JobStore, StoreError};

/// Open the configured backend, migrating the schema first for postgres
pub async fn open_store(config: &Config) -> Result<Arc<dyn JobStore>, StoreError> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory job store; data will not survive a restart");
            Ok(Arc::new(MemoryJobStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = connect_and_migrate(config).await?;
            Ok(Arc::new(PgJobRepository::new(pool)))
        }
    }
}

pub async fn connect_and_migrate(
    config: &Config,
) -> Result<sqlx::Pool<sqlx::Postgres>, StoreError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| StoreError::Configuration("DATABASE_URL is not configured".to_string()))?;

    let pool = connection::get_connection(url, config.max_db_connections).await?;
    info!(
        "Database connection pool established (max {} connections)",
        config.max_db_connections
    );

    migrations::run_migrations(&pool).await?;
    Ok(pool)
}
