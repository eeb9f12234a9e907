//! Init command implementation
//!
//! Writes a starter configuration with a freshly generated token signing
//! secret.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use clap::Args;
use rand::RngCore;
use std::fs;
use std::path::Path;

/// Random bytes behind a generated `auth.jwt_secret`
const SECRET_BYTES: usize = 48;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "clinidata.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, render_template(&generate_secret())) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Review {} (it contains the token signing secret)", self.output);
                println!("  2. For PostgreSQL: set database_target and CLINIDATA_DATABASE_URL");
                println!("  3. Apply the schema: clinidata migrate");
                println!("  4. Validate configuration: clinidata validate-config");
                println!("  5. Start the API: clinidata serve");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Random URL-safe secret for `auth.jwt_secret`
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn render_template(secret: &str) -> String {
    format!(
        r#"# CliniData configuration

environment = "development"

# postgresql | memory (memory is refused in production)
database_target = "memory"

[application]
log_level = "info"

[server]
host = "127.0.0.1"
port = 8080
request_timeout_seconds = 30
shutdown_timeout_seconds = 10

# Used when database_target = "postgresql"
# [postgresql]
# connection_string = "${{CLINIDATA_DATABASE_URL}}"
# max_connections = 10
# ssl_mode = "prefer"
# run_migrations = false

[auth]
jwt_secret = "{secret}"
issuer = "clinidata"
token_ttl_minutes = 60
# admin_email = "admin@example.com"
# admin_password = "${{CLINIDATA_ADMIN_PASSWORD}}"

[validation]
enforce_check_digits = false

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
local_max_files = 14
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::MIN_JWT_SECRET_LEN;
    use crate::config::{parse_config, DatabaseTarget};
    use tempfile::TempDir;

    #[test]
    fn test_generated_secret_is_long_enough() {
        let secret = generate_secret();
        assert!(secret.len() >= MIN_JWT_SECRET_LEN);
        assert_ne!(secret, generate_secret());
    }

    #[test]
    fn test_template_is_valid_config() {
        let config = parse_config(&render_template(&generate_secret())).unwrap();
        assert_eq!(config.database_target, DatabaseTarget::Memory);
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("clinidata.toml");
        fs::write(&output, "keep me").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

        let forced = InitArgs {
            force: true,
            ..args
        };
        assert_eq!(forced.execute().await.unwrap(), EXIT_OK);
        assert!(fs::read_to_string(&output).unwrap().contains("jwt_secret"));
    }
}
