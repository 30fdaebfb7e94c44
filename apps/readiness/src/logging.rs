//! # Logging Setup
//!
//! Installs the global tracing subscriber. Output goes to stderr so that
//! reports on stdout stay machine-readable.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter: `RUST_LOG` wins, then the configured directive.
pub fn build_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("readiness=debug")
        } else {
            EnvFilter::new(&config.filter)
        }
    })
}

/// Initialize tracing. Safe to call once per process.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let filter = build_filter(config, verbose);

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
