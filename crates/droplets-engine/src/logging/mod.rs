//! Logging utilities.
//!
//! This module centralizes logger initialization. Library code only uses the
//! `log` facade; the binary decides when to install the `env_logger` backend.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
