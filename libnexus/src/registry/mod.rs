//! Registry client for Nexus-hosted Docker repositories.
//!
//! Every call maps to exactly one request against
//! `{host}/repository/{repository}/v2/...`, authenticated with Basic auth and
//! asking for Docker manifest v2 documents. [`Registry::delete_image_by_tag`]
//! is the one exception: it first resolves the tag to a digest, because the
//! registry only deletes manifests by digest.

use crate::auth::Credentials;
use crate::client::{HttpClient, HttpRequest, HttpResponse, Method, Transport, normalize_url};
use crate::config::RegistryConfig;
use crate::digest::Digest;
use crate::error::{NexusError, Result};
use crate::manifest::{MANIFEST_V2_MEDIA_TYPE, Manifest};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

#[cfg(test)]
mod tests;

const STATUS_OK: u16 = 200;
const STATUS_ACCEPTED: u16 = 202;

const DIGEST_HEADER: &str = "Docker-Content-Digest";
const LAST_MODIFIED_HEADER: &str = "Last-Modified";

/// Response from the catalog API endpoint.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    /// List of image names
    repositories: Vec<String>,
}

/// Response from the tags list API endpoint.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[allow(dead_code)]
    #[serde(default)]
    name: String,
    /// `null` when the image has no tags left
    tags: Option<Vec<String>>,
}

/// Client for one Nexus Docker repository.
///
/// The transport defaults to [`HttpClient`]; tests inject their own.
///
/// # Examples
///
/// ```no_run
/// use libnexus::{Registry, RegistryConfig};
///
/// # fn main() -> libnexus::Result<()> {
/// let config = RegistryConfig::new("https://nexus.example.com", "admin", "secret", "docker");
/// let registry = Registry::new(&config)?;
/// for image in registry.list_images()? {
///     println!("{}", image);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Registry<T: Transport = HttpClient> {
    transport: T,
    /// `{host}/repository/{repository}/v2`
    base_url: String,
    credentials: Credentials,
}

impl Registry<HttpClient> {
    /// Creates a registry client using the default HTTP transport.
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        Self::with_transport(config, HttpClient::new()?)
    }
}

impl<T: Transport> Registry<T> {
    /// Creates a registry client that sends requests through `transport`.
    pub fn with_transport(config: &RegistryConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let host = normalize_url(&config.host)?;
        let base_url = format!(
            "{}/repository/{}/v2",
            host,
            config.repository.trim_matches('/')
        );

        Ok(Self {
            transport,
            base_url,
            credentials: config.credentials(),
        })
    }

    /// Returns the API base URL (`{host}/repository/{repository}/v2`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists image names in the repository (`GET /v2/_catalog`).
    pub fn list_images(&self) -> Result<Vec<String>> {
        let response = self.execute(Method::Get, "_catalog", STATUS_OK)?;
        let catalog: CatalogResponse = response.json("catalog response")?;
        Ok(catalog.repositories)
    }

    /// Lists tags of `image` in server order (`GET /v2/{image}/tags/list`).
    pub fn list_tags(&self, image: &str) -> Result<Vec<String>> {
        require_non_empty(image, "image name")?;

        let response = self.execute(Method::Get, &format!("{}/tags/list", image), STATUS_OK)?;
        let tags: TagsResponse = response.json("tags response")?;
        Ok(tags.tags.unwrap_or_default())
    }

    /// Fetches and decodes the manifest of `image:tag`.
    pub fn image_manifest(&self, image: &str, tag: &str) -> Result<Manifest> {
        let response = self.fetch_manifest(image, tag)?;
        Manifest::from_bytes(&response.body)
    }

    /// Returns the `Last-Modified` date of the manifest of `image:tag`.
    ///
    /// Issues the same GET as [`Registry::image_manifest`] but only reads the
    /// header, which must be an RFC 1123 date.
    pub fn image_tag_date(&self, image: &str, tag: &str) -> Result<DateTime<Utc>> {
        let response = self.fetch_manifest(image, tag)?;
        parse_last_modified(&response)
    }

    /// Resolves `image:tag` to the digest of its manifest.
    pub fn resolve_digest(&self, image: &str, tag: &str) -> Result<Digest> {
        let response = self.fetch_manifest(image, tag)?;
        let value = response
            .header(DIGEST_HEADER)
            .ok_or_else(|| NexusError::missing_header(DIGEST_HEADER))?;
        Digest::from_str(value.trim())
    }

    /// Deletes the manifest `image:tag` points to and returns its digest.
    ///
    /// Issues two requests in order: a GET resolving the digest, then a
    /// DELETE on that digest. Only `202 Accepted` counts as success. The
    /// deletion is permanent.
    pub fn delete_image_by_tag(&self, image: &str, tag: &str) -> Result<Digest> {
        let digest = self.resolve_digest(image, tag)?;

        self.execute(
            Method::Delete,
            &format!("{}/manifests/{}", image, digest),
            STATUS_ACCEPTED,
        )?;

        tracing::info!(image, tag, %digest, "deleted image manifest");
        Ok(digest)
    }

    fn fetch_manifest(&self, image: &str, tag: &str) -> Result<HttpResponse> {
        require_non_empty(image, "image name")?;
        require_non_empty(tag, "tag")?;

        self.execute(
            Method::Get,
            &format!("{}/manifests/{}", image, tag),
            STATUS_OK,
        )
    }

    /// Sends one request and checks the status code.
    fn execute(&self, method: Method, path: &str, expected: u16) -> Result<HttpResponse> {
        let url = format!("{}/{}", self.base_url, path);
        let request = match method {
            Method::Get => HttpRequest::get(&url),
            Method::Delete => HttpRequest::delete(&url),
        }
        .header("Authorization", self.credentials.to_header_value())
        .header("Accept", MANIFEST_V2_MEDIA_TYPE);

        let response = self.transport.send(request)?;

        if response.status != expected {
            tracing::debug!(
                %method,
                %url,
                status = response.status,
                expected,
                "unexpected registry status"
            );
            return Err(NexusError::unexpected_status(response.status, expected, url));
        }

        Ok(response)
    }
}

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NexusError::validation(format!("{} cannot be empty", what)));
    }
    Ok(())
}

/// Parses the `Last-Modified` header (RFC 1123, e.g. `Mon, 02 Jan 2006 15:04:05 GMT`).
pub(crate) fn parse_last_modified(response: &HttpResponse) -> Result<DateTime<Utc>> {
    let value = response.header(LAST_MODIFIED_HEADER).ok_or_else(|| {
        NexusError::date_parse(format!("Response missing {} header", LAST_MODIFIED_HEADER))
    })?;

    DateTime::parse_from_rfc2822(value.trim())
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| {
            NexusError::date_parse_with_source(
                format!("Invalid {} value '{}'", LAST_MODIFIED_HEADER, value),
                e,
            )
        })
}
