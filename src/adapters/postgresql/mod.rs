//! PostgreSQL database integration
//!
//! This module provides the PostgreSQL backend for every CliniData
//! repository, plus the bundled schema applied by `clinidata migrate`.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::{PostgreSQLClient, INITIAL_SCHEMA};
