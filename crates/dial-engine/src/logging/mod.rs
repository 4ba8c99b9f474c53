//! Logging utilities.
//!
//! Logger setup lives here so binaries only call [`init_logging`] once at the
//! top of `main`. Everything else logs through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
