//! Repository factory
//!
//! Builds the [`Repositories`] bundle for the configured database target.

use crate::adapters::database::traits::Repositories;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{ClinidataConfig, DatabaseTarget};
use crate::domain::{ClinidataError, Result};
use std::sync::Arc;

/// Create the repositories for `config.database_target`
///
/// For PostgreSQL the pool is created, the connection is tested and, when
/// `postgresql.run_migrations` is set, the bundled schema is applied.
///
/// # Errors
///
/// Returns an error if the PostgreSQL section is missing or the database
/// cannot be reached.
pub async fn create_repositories(config: &ClinidataConfig) -> Result<Repositories> {
    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                ClinidataError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL repositories");
            let client = PostgreSQLClient::new(pg_config.clone()).await?;
            client.test_connection().await?;
            if pg_config.run_migrations {
                client.run_migrations().await?;
            }

            Ok(Repositories::from_backend(Arc::new(PostgreSQLAdapter::new(
                client,
            ))))
        }
        DatabaseTarget::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            Ok(Repositories::from_backend(Arc::new(MemoryStore::new())))
        }
    }
}
