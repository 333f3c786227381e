//! Tracing subscriber setup for the binary
//!
//! Logs go to stderr so that stdout only carries rendered pages.

use std::io;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Logging already initialized: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "apishowcase=warn",
        1 => "apishowcase=debug",
        _ => "apishowcase=trace,reqwest=debug",
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init(verbosity: u8) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbosity)))?;

    let console_layer = fmt::layer()
        .compact()
        .with_target(verbosity > 1)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()?;

    Ok(())
}
