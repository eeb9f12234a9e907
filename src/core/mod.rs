//! Core business logic for CliniData.
//!
//! # Modules
//!
//! - [`services`] - One application service per aggregate
//! - [`auth`] - Registration, login, tokens and access policies
//! - [`dto`] - Request and response bodies shared by services and the API
//!
//! # Example
//!
//! ```rust,no_run
//! use clinidata::adapters::database::create_repositories;
//! use clinidata::config::load_config;
//! use clinidata::core::services::Services;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("clinidata.toml")?;
//! let repos = create_repositories(&config).await?;
//! let services = Services::new(&repos, &config);
//!
//! for paciente in services.pacientes.list().await? {
//!     println!("{} ({})", paciente.nome, paciente.cpf);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod dto;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod services;
