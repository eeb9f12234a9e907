//! Serve command implementation

use super::{EXIT_CONFIG, EXIT_OK};
use crate::adapters::database::create_repositories;
use crate::api::{self, AppState};
use crate::config::load_config;
use anyhow::Context;
use clap::Args;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address, overriding `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overriding `server.port`
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, config_path = %config_path, "Invalid configuration");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        tracing::info!(
            environment = ?config.environment,
            database_target = ?config.database_target,
            "Starting CliniData API"
        );

        let repos = create_repositories(&config)
            .await
            .context("failed to initialize storage")?;
        let state = Arc::new(AppState::new(&repos, &config));

        if let (Some(email), Some(password)) =
            (&config.auth.admin_email, &config.auth.admin_password)
        {
            let created = state
                .services
                .auth
                .ensure_admin(email, password.expose_secret().as_str())
                .await
                .context("failed to bootstrap the admin account")?;
            if !created {
                tracing::debug!("Admin account already present");
            }
        }

        api::serve(state, &config.server, shutdown).await?;
        Ok(EXIT_OK)
    }
}
