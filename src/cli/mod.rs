//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for CliniData using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// CliniData - healthcare records service
#[derive(Parser, Debug)]
#[command(name = "clinidata")]
#[command(version, about, long_about = None)]
#[command(author = "CliniData Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "clinidata.toml", env = "CLINIDATA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLINIDATA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),

    /// Apply the bundled PostgreSQL schema
    Migrate(commands::migrate::MigrateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["clinidata", "serve"]);
        assert_eq!(cli.config, "clinidata.toml");
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_cli_parse_serve_overrides() {
        let cli = Cli::parse_from(["clinidata", "serve", "--host", "127.0.0.1", "--port", "9090"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.port, Some(9090));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["clinidata", "--config", "custom.toml", "migrate"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Migrate(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["clinidata", "--log-level", "debug", "serve"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["clinidata", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["clinidata", "init", "--output", "x.toml", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.output, "x.toml");
                assert!(args.force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
