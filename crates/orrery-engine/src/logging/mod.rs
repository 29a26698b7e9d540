//! Process-wide logging through the `log` facade and `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER, FILTER_ENV};
