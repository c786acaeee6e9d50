//! Credentials file handling for the CLI.

use libnexus::{DEFAULT_CREDENTIALS_FILE, Registry, RegistryConfig};
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

/// Get credentials path
///
/// `NEXUS_CREDENTIALS` overrides the default `.credentials` file in the
/// working directory.
pub fn get_credentials_path() -> PathBuf {
    match env::var("NEXUS_CREDENTIALS") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CREDENTIALS_FILE),
    }
}

/// Validates a Nexus host URL and returns it without a trailing slash.
///
/// A missing scheme defaults to `http://`.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_host_url("https://nexus.example.com").is_ok());
/// assert!(validate_host_url("localhost:8081").is_ok());
/// assert!(validate_host_url("ftp://nexus").is_err());
/// ```
pub fn validate_host_url(url_str: &str) -> Result<String, String> {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return Err("Nexus host cannot be empty".to_string());
    }

    let url_to_parse = if url_str.contains("://") {
        url_str.to_string()
    } else {
        format!("http://{}", url_str)
    };

    let parsed_url =
        Url::parse(&url_to_parse).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    match parsed_url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                scheme
            ));
        }
    }

    if parsed_url.host_str().is_none() {
        return Err(format!("Invalid URL '{}': missing host", url_str));
    }

    Ok(parsed_url.as_str().trim_end_matches('/').to_string())
}

/// Loads the registry settings from the credentials file.
pub fn load_registry_config(path: &Path) -> Result<RegistryConfig, String> {
    RegistryConfig::load(path).map_err(|e| {
        format!(
            "{}\nRun 'nexus-cli configure' to create the credentials file",
            e
        )
    })
}

/// Loads the credentials file and connects a registry client.
pub fn open_registry(path: &Path) -> Result<Registry, String> {
    let config = load_registry_config(path)?;
    Registry::new(&config).map_err(|e| format!("Failed to create registry client: {}", e))
}

/// Validates the answers given to `configure` and writes the credentials file.
pub fn write_credentials(path: &Path, config: &RegistryConfig) -> Result<RegistryConfig, String> {
    let host = validate_host_url(&config.host)?;
    let config = RegistryConfig {
        host,
        ..config.clone()
    };
    config.validate().map_err(|e| e.to_string())?;
    config.save(path).map_err(|e| e.to_string())?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
