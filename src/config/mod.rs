//! Configuration management for CliniData.
//!
//! CliniData reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CLINIDATA_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation of every section
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//! database_target = "postgresql"
//!
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [postgresql]
//! connection_string = "${CLINIDATA_DATABASE_URL}"
//! ssl_mode = "require"
//!
//! [auth]
//! jwt_secret = "${CLINIDATA_JWT_SECRET}"
//! token_ttl_minutes = 60
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clinidata::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("clinidata.toml")?;
//! println!("Database: {:?}", config.database_target);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, AuthConfig, ClinidataConfig, DatabaseTarget, Environment, LoggingConfig,
    PostgreSQLConfig, ServerConfig, ValidationConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "CLINIDATA_CONFIG";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "clinidata.toml";
