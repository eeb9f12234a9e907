//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - JSON log files with daily or hourly rotation
//! - Helper macros for request and error events
//!
//! # Example
//!
//! ```no_run
//! use clinidata::logging::init_logging;
//! use clinidata::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a finished HTTP request
///
/// # Example
///
/// ```no_run
/// use clinidata::log_request_completed;
/// use std::time::Duration;
///
/// log_request_completed!("GET", "/api/Pacientes", 200, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_request_completed {
    ($method:expr, $path:expr, $status:expr, $elapsed:expr) => {
        tracing::info!(
            method = %$method,
            path = %$path,
            status = $status,
            latency_ms = $elapsed.as_millis() as u64,
            "Request completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use clinidata::log_error_with_context;
/// use clinidata::domain::ClinidataError;
///
/// let error = ClinidataError::Database("connection reset".to_string());
/// log_error_with_context!(&error, "Failed to list patients");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
