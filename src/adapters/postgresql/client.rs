//! PostgreSQL client implementation
//!
//! Connection pooling, TLS selection, schema migration and the statement
//! helpers the adapter builds on.

use crate::config::schema::PostgreSQLConfig;
use crate::domain::{ClinidataError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod, Transaction};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

/// Bundled schema, applied by `clinidata migrate`
pub const INITIAL_SCHEMA: &str = include_str!("../../../migrations/001_initial_schema.sql");

/// PostgreSQL client for CliniData
///
/// Owns the connection pool. Every statement runs with the configured
/// `statement_timeout`.
pub struct PostgreSQLClient {
    pool: Pool,
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// The pool is created lazily; no connection is opened here.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string does not parse or the TLS
    /// connector cannot be built.
    pub async fn new(config: PostgreSQLConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_str()
            .parse()
            .map_err(|e| {
                ClinidataError::Configuration(format!(
                    "Invalid PostgreSQL connection string: {e}"
                ))
            })?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = match config.ssl_mode.as_str() {
            "disable" => {
                pg_config.ssl_mode(SslMode::Disable);
                Manager::from_config(pg_config, NoTls, manager_config)
            }
            mode => {
                pg_config.ssl_mode(if mode == "prefer" {
                    SslMode::Prefer
                } else {
                    SslMode::Require
                });
                Manager::from_config(pg_config, tls_connector(mode)?, manager_config)
            }
        };

        let timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(timeout)
            .create_timeout(timeout)
            .recycle_timeout(timeout)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                ClinidataError::Database(format!("Failed to create connection pool: {e}"))
            })?;

        tracing::debug!(
            database = %safe_connection_string(config.connection_string.expose_secret().as_str()),
            ssl_mode = %config.ssl_mode,
            max_connections = config.max_connections,
            "PostgreSQL pool created"
        );

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| ClinidataError::Database(format!("Connection test failed: {e}")))?;

        tracing::info!(
            database = %self.connection_string_safe(),
            "PostgreSQL connection test successful"
        );
        Ok(())
    }

    /// Apply the bundled schema
    ///
    /// The migration is idempotent, so running it against an up-to-date
    /// database is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn run_migrations(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .batch_execute(INITIAL_SCHEMA)
            .await
            .map_err(|e| ClinidataError::Database(format!("Failed to execute migration: {e}")))?;

        tracing::info!("PostgreSQL schema initialized successfully");
        Ok(())
    }

    /// Get a connection from the pool with the statement timeout applied
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<Object> {
        let client = self.pool.get().await.map_err(|e| {
            ClinidataError::Database(format!("Failed to get connection from pool: {e}"))
        })?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .batch_execute(&timeout_query)
            .await
            .map_err(|e| map_db_error("set statement timeout", e))?;

        Ok(client)
    }

    /// Execute a query and return rows
    pub async fn query(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        let client = self.get_connection().await?;
        client
            .query(query, params)
            .await
            .map_err(|e| map_db_error("query", e))
    }

    /// Execute a query expected to return at most one row
    pub async fn query_opt(
        &self,
        query: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>> {
        let client = self.get_connection().await?;
        client
            .query_opt(query, params)
            .await
            .map_err(|e| map_db_error("query", e))
    }

    /// Execute a statement and return the number of affected rows
    pub async fn execute(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64> {
        let client = self.get_connection().await?;
        client
            .execute(statement, params)
            .await
            .map_err(|e| map_db_error("statement", e))
    }

    /// Get the connection string (without password)
    pub fn connection_string_safe(&self) -> String {
        safe_connection_string(self.config.connection_string.expose_secret().as_str())
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

/// Starts a transaction on a pooled connection
pub async fn begin(client: &mut Object) -> Result<Transaction<'_>> {
    client
        .transaction()
        .await
        .map_err(|e| map_db_error("begin transaction", e))
}

/// Builds the TLS connector for a non-`disable` ssl mode
fn tls_connector(ssl_mode: &str) -> Result<MakeTlsConnector> {
    let mut builder = TlsConnector::builder();
    match ssl_mode {
        // Encryption without certificate verification
        "prefer" | "require" => {
            builder.danger_accept_invalid_certs(true);
        }
        "verify-ca" => {
            builder.danger_accept_invalid_hostnames(true);
        }
        _ => {}
    }
    let connector = builder
        .build()
        .map_err(|e| ClinidataError::Configuration(format!("Failed to build TLS connector: {e}")))?;
    Ok(MakeTlsConnector::new(connector))
}

/// Maps a driver error onto the error taxonomy
///
/// Unique violations become [`ClinidataError::Conflict`], and so do foreign
/// key violations (a row is still referenced, or a referenced row vanished).
pub fn map_db_error(context: &str, err: tokio_postgres::Error) -> ClinidataError {
    if let Some(db_err) = err.as_db_error() {
        let code = db_err.code();
        if *code == SqlState::UNIQUE_VIOLATION {
            let constraint = db_err.constraint().unwrap_or("unique");
            return ClinidataError::Conflict(conflict_message(constraint));
        }
        if *code == SqlState::FOREIGN_KEY_VIOLATION {
            return ClinidataError::Conflict(
                "registro referenciado por outros dados ou referência inexistente".to_string(),
            );
        }
    }
    tracing::error!(context, error = %err, "PostgreSQL operation failed");
    ClinidataError::Database(format!("{context} failed: {err}"))
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "ux_paciente_cpf" => "CPF já cadastrado".to_string(),
        "ux_medico_crm" => "CRM já cadastrado".to_string(),
        "ux_medico_email" => "e-mail de médico já cadastrado".to_string(),
        "ux_instituicao_cnpj" => "CNPJ já cadastrado".to_string(),
        "ux_usuario_email" => "e-mail já cadastrado".to_string(),
        "ux_especialidade_nome" => "especialidade já cadastrada".to_string(),
        other => format!("violação de unicidade ({other})"),
    }
}

fn safe_connection_string(conn: &str) -> String {
    conn.rsplit_once('@')
        .map(|(_, host)| format!("postgresql://***@{host}"))
        .unwrap_or_else(|| "postgresql://***".to_string())
}
