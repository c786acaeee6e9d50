//! Application context that holds resolved settings
//!
//! Precedence for the credentials file location:
//! 1. Default (`.credentials` in the working directory)
//! 2. `NEXUS_CREDENTIALS` environment variable
//! 3. `--credentials` CLI flag
//!
//! Once built, the context is passed as read-only throughout the application.

use crate::config;
use crate::format::ColorChoice;
use std::path::PathBuf;

/// How much diagnostic output the user asked for with `-v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    Normal,
    Verbose,
    VeryVerbose,
    Trace,
}

impl VerbosityLevel {
    /// Maps the number of `-v` flags to a level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Default tracing filter for this level when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        match self {
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "info",
            VerbosityLevel::VeryVerbose => "debug",
            VerbosityLevel::Trace => "trace",
        }
    }
}

/// Application context with resolved settings and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    pub color: ColorChoice,
    pub verbosity: VerbosityLevel,
    /// Credentials file used by every registry command
    pub credentials_path: PathBuf,
}

impl AppContext {
    /// Build context with precedence: defaults > env vars > CLI flags
    pub fn build(
        color: ColorChoice,
        verbosity: VerbosityLevel,
        credentials: Option<PathBuf>,
    ) -> Self {
        let credentials_path = credentials.unwrap_or_else(config::get_credentials_path);

        Self {
            color,
            verbosity,
            credentials_path,
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
