use std::sync::Arc;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::adapters::{MemoryStore, SeaStore};
use crate::config::store::{StoreBackend, StoreConfig};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::realtime::ChangeFeed;
use crate::state::app_state::AppState;

/// Open the configured store and build the shared state around it.
///
/// SQL stores are migrated to the latest schema before use.
pub async fn connect_store(config: &StoreConfig) -> Result<AppState, DomainError> {
    let feed = ChangeFeed::new(config.feed_capacity);
    match &config.backend {
        StoreBackend::Memory => {
            info!("using in-memory store");
            Ok(AppState::from_store(Arc::new(MemoryStore::new(feed))))
        }
        StoreBackend::Sql { database_url } => {
            let db = connect_db(database_url).await?;
            migrate(&db, MigrationCommand::Up)
                .await
                .map_err(map_db_err)?;
            info!(backend = ?db.get_database_backend(), "using sql store");
            Ok(AppState::from_store(Arc::new(SeaStore::new(db, feed))))
        }
    }
}

/// Connect without running migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, DomainError> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    // each in-memory sqlite connection is its own database
    if database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory") {
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options).await.map_err(|e| {
        DomainError::infra(
            InfraErrorKind::StoreUnavailable,
            format!("Failed to connect to store: {e}"),
        )
    })
}
