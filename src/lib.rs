// CliniData - Healthcare records service
// Copyright (c) 2025 CliniData Contributors
// Licensed under the MIT License

//! # CliniData - multi-tenant healthcare records
//!
//! CliniData stores the registration and clinical data of healthcare
//! institutions, their doctors and their patients, and exposes it through a
//! role-protected REST API.
//!
//! ## Overview
//!
//! This library provides:
//! - **Validated documents**: CPF, CNPJ, CRM, CEP and e-mail value objects
//! - **Entities** with their invariants (under-age patients need a guardian)
//! - **Storage** on PostgreSQL or in memory behind repository traits
//! - **Authentication** with Argon2id password hashes and HS256 tokens
//!
//! ## Architecture
//!
//! CliniData follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - axum router, extractors and HTTP error mapping
//! - [`core`] - Services, authentication and request/response bodies
//! - [`adapters`] - Storage backends (PostgreSQL, in-memory)
//! - [`domain`] - Value objects, entities and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinidata::adapters::database::create_repositories;
//! use clinidata::api::{serve, AppState};
//! use clinidata::config::load_config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("clinidata.toml")?;
//!     let repos = create_repositories(&config).await?;
//!     let state = Arc::new(AppState::new(&repos, &config));
//!
//!     let (_stop, shutdown) = tokio::sync::watch::channel(false);
//!     serve(state, &config.server, shutdown).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error is
//! [`domain::ClinidataError`]. Validation failures are
//! [`domain::DomainError`]s and convert with `?`:
//!
//! ```rust
//! use clinidata::domain::{ClinidataError, Cpf, Result};
//!
//! fn parse(raw: &str) -> Result<Cpf> {
//!     Ok(Cpf::parse(raw)?)
//! }
//!
//! assert!(matches!(parse("123"), Err(ClinidataError::Domain(_))));
//! ```
//!
//! ## Logging
//!
//! CliniData uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(paciente_id = %"…", "Paciente created");
//! ```

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
