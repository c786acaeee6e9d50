//! libnexus - Docker image management for Nexus repositories
//!
//! libnexus talks to the Docker Registry v2 API that Sonatype Nexus exposes
//! under `{host}/repository/{repository}/v2`. It lists images and tags,
//! reads manifests, deletes tags and computes image sizes.
//!
//! # Quick Start
//!
//! ```no_run
//! use libnexus::{Registry, RegistryConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegistryConfig::load(Path::new(".credentials"))?;
//!     let registry = Registry::new(&config)?;
//!
//!     for tag in registry.tags_by_date("nginx")? {
//!         println!("{} created at {}", tag.tag, tag.date);
//!     }
//!
//!     // Keep the three newest tags, delete the rest
//!     registry.delete_keeping("nginx", 3, false)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Registry`] - All registry operations
//! - [`RegistryConfig`] - Host, credentials and repository name
//! - [`Manifest`] - Decoded image manifest
//! - [`TagDate`] - A tag with its creation date
//! - [`NexusError`] - Error type for every operation

#![warn(clippy::all)]

/// Returns the libnexus crate version.
///
/// # Examples
///
/// ```
/// let version = libnexus::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use auth::Credentials;
pub use client::{HttpClient, Transport};
pub use config::{DEFAULT_CREDENTIALS_FILE, RegistryConfig};
pub use digest::Digest;
pub use error::{NexusError, Result};
pub use images::{DeleteProgress, RetentionOutcome, RetentionPlan, TagDate};
pub use manifest::{LayerInfo, Manifest};
pub use registry::Registry;

#[doc(hidden)]
pub mod auth;
#[doc(hidden)]
pub mod client;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod digest;
#[doc(hidden)]
pub mod error;
pub mod format;
pub mod images;
#[doc(hidden)]
pub mod manifest;
#[doc(hidden)]
pub mod registry;

#[cfg(test)]
mod testing;
