//! Validate config command implementation

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::config::schema::DatabaseTarget;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen: {}", config.server.bind_address());

        match config.database_target {
            DatabaseTarget::PostgreSQL => {
                if let Some(ref pg_config) = config.postgresql {
                    println!("  Database Target: PostgreSQL");
                    println!("  Max Connections: {}", pg_config.max_connections);
                    println!("  SSL Mode: {}", pg_config.ssl_mode);
                    println!("  Run Migrations: {}", pg_config.run_migrations);
                }
            }
            DatabaseTarget::Memory => println!("  Database Target: in-memory"),
        }

        println!("  Token Issuer: {}", config.auth.issuer);
        println!("  Token TTL: {} min", config.auth.token_ttl_minutes);
        println!(
            "  Admin Bootstrap: {}",
            config.auth.admin_email.as_deref().unwrap_or("disabled")
        );
        println!(
            "  Check Digits Enforced: {}",
            config.validation.enforce_check_digits
        );
        println!();
        Ok(EXIT_OK)
    }
}
