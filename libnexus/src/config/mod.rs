//! Registry connection settings.
//!
//! A [`RegistryConfig`] is read once from the credentials file written by
//! `nexus-cli configure` and stays immutable for the rest of the command.
//! Environment variables (`NEXUS_HOST`, `NEXUS_USERNAME`, `NEXUS_PASSWORD`,
//! `NEXUS_REPOSITORY`) override values from the file.

use crate::auth::Credentials;
use crate::error::{NexusError, Result};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;


/// Default credentials file name, relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = ".credentials";

const CREDENTIALS_HEADER: &str = "# Nexus Credentials\n";

/// Connection settings for one Nexus Docker repository.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Nexus base URL (e.g., "https://nexus.example.com")
    #[serde(rename = "nexus_host")]
    pub host: String,
    #[serde(rename = "nexus_username")]
    pub username: String,
    #[serde(rename = "nexus_password")]
    pub password: String,
    /// Name of the hosted Docker repository inside Nexus
    #[serde(rename = "nexus_repository")]
    pub repository: String,
}

impl RegistryConfig {
    /// Creates a configuration from its four fields.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            repository: repository.into(),
        }
    }

    /// Parses a `RegistryConfig` from a TOML string.
    ///
    /// Environment overrides are not applied; this is primarily used for testing.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder().add_source(File::from_str(s, FileFormat::Toml));
        Self::from_builder(builder, None)
    }

    /// Loads a `RegistryConfig` from the credentials file at `path`.
    ///
    /// Fails with a `Config` error mentioning "file not found" when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();

        if !path.exists() {
            return Err(NexusError::config(
                format!("{} file not found", display),
                Some(display),
            ));
        }

        let builder = ConfigRs::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .add_source(Environment::with_prefix("NEXUS").keep_prefix(true));

        warn_if_readable_by_others(path);

        let config = Self::from_builder(builder, Some(display))?;
        tracing::debug!(
            host = %config.host,
            repository = %config.repository,
            "loaded registry configuration"
        );
        Ok(config)
    }

    /// Creates a `RegistryConfig` from a `config::ConfigBuilder`.
    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<String>,
    ) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| NexusError::config_with_source("Failed to read credentials", path, e))
    }

    /// Writes the configuration as TOML, readable by the owner only.
    ///
    /// The file is restricted to 0600 before the password is written to it.
    pub fn save(&self, path: &Path) -> Result<()> {
        let display = path.display().to_string();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                NexusError::config_with_source(
                    "Failed to create credentials directory",
                    Some(display.clone()),
                    e,
                )
            })?;
        }

        let body = toml::to_string(self).map_err(|e| {
            NexusError::config_with_source(
                "Failed to serialize credentials",
                Some(display.clone()),
                e,
            )
        })?;

        let write_error = |e: std::io::Error| {
            NexusError::config_with_source(
                "Failed to write credentials file",
                Some(display.clone()),
                e,
            )
        };
        let mut file = open_private(path).map_err(write_error)?;
        file.write_all(format!("{}{}", CREDENTIALS_HEADER, body).as_bytes())
            .map_err(write_error)?;

        Ok(())
    }

    /// Checks that the fields needed to build request URLs are present.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(NexusError::validation("Nexus host cannot be empty"));
        }
        if self.repository.trim().is_empty() {
            return Err(NexusError::validation(
                "Nexus repository name cannot be empty",
            ));
        }
        Ok(())
    }

    /// Returns the Basic auth credentials for this registry.
    pub fn credentials(&self) -> Credentials {
        Credentials::basic(&self.username, &self.password)
    }
}

/// Opens `path` for writing with owner-only permissions, truncating it.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies to newly created files
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(unix)]
fn warn_if_readable_by_others(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(metadata) = fs::metadata(path)
        && metadata.permissions().mode() & 0o077 != 0
    {
        tracing::warn!(path = %path.display(), "credentials file is accessible by other users");
    }
}

#[cfg(not(unix))]
fn warn_if_readable_by_others(_path: &Path) {}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("repository", &self.repository)
            .finish()
    }
}
