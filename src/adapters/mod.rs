//! Storage adapters for CliniData.
//!
//! - [`database`] - repository traits and the backend factory
//! - [`postgresql`] - PostgreSQL implementation over a deadpool pool
//! - [`memory`] - in-memory implementation for tests and local runs
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate storage details from
//! the services. Every backend implements every repository trait, so the
//! factory hands the same backend value out as each trait object.
//!
//! ```rust
//! use clinidata::adapters::database::Repositories;
//! use clinidata::adapters::memory::MemoryStore;
//! use std::sync::Arc;
//!
//! let repos = Repositories::from_backend(Arc::new(MemoryStore::new()));
//! assert_eq!(repos.health.backend(), "memory");
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
