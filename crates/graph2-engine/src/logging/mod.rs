//! Logger initialization.
//!
//! The crate logs through the `log` facade; `env_logger` is installed here.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
