//! Logging System
//!
//! Structured logging via the `tracing` crate. The level defaults to off;
//! the CLI's verbosity flag raises it to debug, which is where store
//! operations and per-file decisions are logged. The `FILEDEX_LOG`
//! environment variable overrides everything with a full filter directive.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,
    /// Enable colored output
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
            color: true,
        }
    }
}

impl LoggingConfig {
    /// Config for the given verbosity flag: debug when verbose, off otherwise.
    pub fn from_verbosity(verbose: bool) -> Self {
        Self {
            level: if verbose { "debug" } else { "off" }.to_string(),
            ..Self::default()
        }
    }
}

/// Initialize the logging system.
///
/// `FILEDEX_LOG` takes priority over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env("FILEDEX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(config.color)
                .with_writer(std::io::stderr),
        )
        .init();
}
