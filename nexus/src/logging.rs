//! Tracing setup for the CLI.
//!
//! `RUST_LOG` takes precedence. Without it the filter follows the `-v` count.
//! Log lines go to stderr so they never mix with command output.

use crate::context::VerbosityLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the filter for the given verbosity, unless `RUST_LOG` is set.
pub fn env_filter(verbosity: VerbosityLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Installs the global subscriber.
pub fn init(verbosity: VerbosityLevel) -> Result<(), String> {
    tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(
            fmt::layer()
                .compact()
                .with_target(verbosity >= VerbosityLevel::VeryVerbose)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
