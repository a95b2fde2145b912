//! Logging utilities.
//!
//! This module centralizes logger initialization. Engine code only talks to the
//! `log` facade; `env_logger` is wired up here for hosts that want it.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
