//! Logging setup.
//!
//! Everything in the workspace logs through the `log` facade; this module
//! installs `env_logger` behind it once per process.

mod init;

pub use init::{init_logging, LoggingConfig};
