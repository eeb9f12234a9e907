//! CLI command implementations
//!
//! Every command returns its process exit code.

pub mod init;
pub mod migrate;
pub mod serve;
pub mod validate;

/// Command finished successfully
pub const EXIT_OK: i32 = 0;

/// Configuration could not be loaded or is invalid
pub const EXIT_CONFIG: i32 = 2;

/// Unrecoverable runtime failure
pub const EXIT_FATAL: i32 = 5;
