//! Migrate command implementation

use super::{EXIT_CONFIG, EXIT_OK};
use crate::adapters::postgresql::PostgreSQLClient;
use crate::config::load_config;
use crate::config::schema::DatabaseTarget;
use anyhow::Context;
use clap::Args;

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {}

impl MigrateArgs {
    /// Apply `migrations/001_initial_schema.sql` to the configured database
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let pg_config = match (config.database_target, &config.postgresql) {
            (DatabaseTarget::PostgreSQL, Some(pg_config)) => pg_config.clone(),
            _ => {
                eprintln!("❌ migrate requires database_target = \"postgresql\"");
                return Ok(EXIT_CONFIG);
            }
        };

        let client = PostgreSQLClient::new(pg_config)
            .await
            .context("failed to create the connection pool")?;
        client
            .test_connection()
            .await
            .context("database is unreachable")?;
        client
            .run_migrations()
            .await
            .context("failed to apply the schema")?;

        let pool = client.pool_status();
        tracing::info!(
            pool_size = pool.size,
            pool_max = pool.max_size,
            "Migration finished"
        );
        println!("✅ Schema applied to {}", client.connection_string_safe());
        Ok(EXIT_OK)
    }
}
