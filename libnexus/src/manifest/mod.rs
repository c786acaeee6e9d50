//! Docker image manifest v2 (schema 2) data structures.

use serde::{Deserialize, Serialize};


/// Media type requested on every registry call.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// A Docker distribution manifest describing one image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub schema_version: i64,
    #[serde(default)]
    pub media_type: String,
    /// Descriptor of the image configuration blob
    pub config: LayerInfo,
    /// Filesystem layers, base layer first
    #[serde(default)]
    pub layers: Vec<LayerInfo>,
}

/// Descriptor of a blob referenced from a manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    #[serde(default)]
    pub media_type: String,
    /// Blob size in bytes
    pub size: u64,
    pub digest: String,
}

impl Manifest {
    /// Parses manifest bytes as returned by the registry.
    pub fn from_bytes(bytes: &[u8]) -> crate::error::Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            crate::error::NexusError::decode_with_source("Failed to parse image manifest", e)
        })
    }
}
