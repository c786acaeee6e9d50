//! Content digest validation.
//!
//! Manifests are deleted by digest, never by tag, so the value read from the
//! `Docker-Content-Digest` header is checked before it is put into a URL.

use crate::error::{NexusError, Result};
use std::fmt;
use std::str::FromStr;


/// A content-addressed identifier of the form `algorithm:hex`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: String,
    hex: String,
}

impl Digest {
    /// Returns the algorithm part (e.g., "sha256").
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Returns the encoded part after the colon.
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl FromStr for Digest {
    type Err = NexusError;

    fn from_str(s: &str) -> Result<Self> {
        let (algorithm, hex) = s
            .split_once(':')
            .ok_or_else(|| NexusError::validation(format!("Invalid digest format: {}", s)))?;

        let algorithm_ok = !algorithm.is_empty()
            && algorithm
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "+._-".contains(c));
        if !algorithm_ok {
            return Err(NexusError::validation(format!(
                "Invalid digest algorithm: {}",
                s
            )));
        }

        let expected_len = match algorithm {
            "sha256" => Some(64),
            "sha512" => Some(128),
            _ => None,
        };
        let hex_ok = !hex.is_empty()
            && hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
            && expected_len.is_none_or(|len| hex.len() == len);
        if !hex_ok {
            return Err(NexusError::validation(format!(
                "Invalid digest encoding: {}",
                s
            )));
        }

        Ok(Self {
            algorithm: algorithm.to_string(),
            hex: hex.to_string(),
        })
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}
