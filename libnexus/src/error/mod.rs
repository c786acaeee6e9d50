//! Error types for libnexus
//!
//! Every registry operation returns the first error it encounters. There are
//! no retries and no partial results: a failed call yields one of the
//! variants below and nothing else.

use thiserror::Error;


/// Main error type for libnexus operations
#[derive(Error, Debug)]
pub enum NexusError {
    /// Network-related errors (connection refused, timeout, DNS)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The registry answered with a status code other than the expected one
    #[error("HTTP Code: {status} (expected {expected}) from {url}")]
    UnexpectedStatus {
        status: u16,
        expected: u16,
        url: String,
    },

    /// Response body could not be decoded as the expected JSON document
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `Last-Modified` header missing or not in RFC 1123 format
    #[error("Date parse error: {message}")]
    DateParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required response header was absent
    #[error("Response missing {header} header")]
    MissingHeader { header: String },

    /// Invalid caller input (empty names, malformed digests, bad URLs)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credentials file errors (missing, unreadable, malformed)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for libnexus operations
pub type Result<T> = std::result::Result<T, NexusError>;

impl NexusError {
    /// Creates a new transport error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::transport("connection refused");
    /// assert!(matches!(err, NexusError::Transport { .. }));
    /// ```
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new unexpected status error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::unexpected_status(404, 200, "http://nexus/v2/_catalog");
    /// assert!(err.to_string().contains("404"));
    /// ```
    pub fn unexpected_status<S: Into<String>>(status: u16, expected: u16, url: S) -> Self {
        Self::UnexpectedStatus {
            status,
            expected,
            url: url.into(),
        }
    }

    /// Creates a new decode error with a source error.
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new date parse error.
    pub fn date_parse<S: Into<String>>(message: S) -> Self {
        Self::DateParse {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new date parse error with a source error.
    pub fn date_parse_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DateParse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new missing header error.
    pub fn missing_header<S: Into<String>>(header: S) -> Self {
        Self::MissingHeader {
            header: header.into(),
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::validation("image name cannot be empty");
    /// assert!(matches!(err, NexusError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new configuration error.
    pub fn config<M, P>(message: M, path: Option<P>) -> Self
    where
        M: Into<String>,
        P: Into<String>,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<M, P, E>(message: M, path: Option<P>, source: E) -> Self
    where
        M: Into<String>,
        P: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the HTTP status code carried by an `UnexpectedStatus` error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
