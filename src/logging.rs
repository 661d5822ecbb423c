//! Tracing setup for the command line tool.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "guessfs=info";
const VERBOSE_LOG_FILTER: &str = "guessfs=debug";
const QUIET_LOG_FILTER: &str = "guessfs=error";

/// Logging configuration derived from the command line flags
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    pub verbose: bool,
    pub quiet: bool,
}

impl LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else if self.quiet {
            QUIET_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }
}

/// Initialize tracing with stderr output; `RUST_LOG` overrides the flags.
pub fn init_logging(config: LogConfig) -> Result<()> {
    if config.verbose && config.quiet {
        anyhow::bail!("Options \"--verbose\" and \"--quiet\" found. This does not make any sense.");
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.verbose);

    let result = if config.verbose {
        tracing_subscriber::registry()
            .with(layer.with_filter(filter))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(layer.without_time().with_filter(filter))
            .try_init()
    };
    result.context("Failed to initialize logging")
}
