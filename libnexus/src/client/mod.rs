//! HTTP transport for registry communication.
//!
//! The registry client never talks to reqwest directly. It hands an
//! [`HttpRequest`] to a [`Transport`] and gets a fully buffered
//! [`HttpResponse`] back, so tests can swap the network for canned
//! responses. [`HttpClient`] is the production transport, built on
//! `reqwest::blocking`.

use crate::error::{NexusError, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;


/// HTTP methods used against the registry API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// An outgoing request: method, absolute URL and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a GET request for `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Creates a DELETE request for `url`.
    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Adds a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Looks up a request header by name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A fully read response. The body has already been consumed from the
/// connection by the time the caller sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates an empty response with the given status code.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Adds a header to the response.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Looks up a response header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Decodes the body as JSON. `what` names the document in the error message.
    pub fn json<T: DeserializeOwned>(&self, what: &str) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| NexusError::decode_with_source(format!("Failed to parse {}", what), e))
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Capability to execute one HTTP round trip.
///
/// Implementations must read the response body to completion before
/// returning and must not retry.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libnexus::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, 60);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30, the blocking client's own default)
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Blocking HTTP transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The underlying HTTP client
    http_client: reqwest::blocking::Client,
    timeout_seconds: u64,
}

impl HttpClient {
    /// Creates a client with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::client::HttpClient;
    ///
    /// let client = HttpClient::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with a custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| NexusError::transport_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Translates a reqwest error into a NexusError.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> NexusError {
        if error.is_timeout() {
            NexusError::transport_with_source(
                format!(
                    "Request to {} timed out after {} seconds",
                    url, self.timeout_seconds
                ),
                error,
            )
        } else if error.is_connect() {
            NexusError::transport_with_source(format!("Failed to connect to {}", url), error)
        } else if error.is_request() {
            NexusError::transport_with_source(format!("Failed to send request to {}", url), error)
        } else {
            NexusError::transport_with_source(
                format!("Network error communicating with {}", url),
                error,
            )
        }
    }
}

impl Transport for HttpClient {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending registry request");

        let mut builder = match request.method {
            Method::Get => self.http_client.get(&request.url),
            Method::Delete => self.http_client.delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .map_err(|e| self.translate_reqwest_error(e, &request.url))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .map_err(|e| NexusError::transport_with_source("Failed to read response body", e))?;

        tracing::trace!(status, bytes = body.len(), "received registry response");

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Normalizes a host URL by ensuring it has a scheme and removing trailing slashes.
///
/// # Examples
///
/// ```
/// use libnexus::client::normalize_url;
///
/// assert_eq!(normalize_url("nexus.local:8081/").unwrap(), "http://nexus.local:8081");
/// ```
pub fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim();

    if url.is_empty() {
        return Err(NexusError::validation("Nexus host cannot be empty"));
    }

    let url = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("http://{}", url)
    } else {
        url.to_string()
    };

    Ok(url.trim_end_matches('/').to_string())
}
