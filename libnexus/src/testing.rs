//! In-memory transport for unit tests.

use crate::client::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::RegistryConfig;
use crate::error::{NexusError, Result};
use std::cell::RefCell;

pub(crate) const BASE: &str = "http://nexus.test/repository/docker/v2";

pub(crate) fn test_config() -> RegistryConfig {
    RegistryConfig::new("http://nexus.test", "admin", "admin123", "docker")
}

enum Reply {
    Response(HttpResponse),
    TransportFailure(String),
}

/// Answers requests from a route table and records every request it sees.
/// Unrouted requests get a 404.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Vec<(Method, String, Reply)>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Routes `method {BASE}/{path}` to `response`.
    pub(crate) fn on(mut self, method: Method, path: &str, response: HttpResponse) -> Self {
        self.routes
            .push((method, format!("{}/{}", BASE, path), Reply::Response(response)));
        self
    }

    /// Makes `method {BASE}/{path}` fail as if the connection dropped.
    pub(crate) fn fail(mut self, method: Method, path: &str, message: &str) -> Self {
        self.routes.push((
            method,
            format!("{}/{}", BASE, path),
            Reply::TransportFailure(message.to_string()),
        ));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Returns `"METHOD path"` for every request, relative to `BASE`.
    pub(crate) fn request_log(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| {
                format!(
                    "{} {}",
                    r.method,
                    r.url.strip_prefix(BASE).unwrap_or(&r.url).trim_start_matches('/')
                )
            })
            .collect()
    }

    pub(crate) fn count(&self, method: Method) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());

        let reply = self
            .routes
            .iter()
            .find(|(method, url, _)| *method == request.method && *url == request.url)
            .map(|(_, _, reply)| reply);

        match reply {
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::TransportFailure(message)) => Err(NexusError::transport(message.clone())),
            None => Ok(HttpResponse::new(404).with_body(r#"{"errors":[{"code":"NAME_UNKNOWN"}]}"#)),
        }
    }
}

/// A manifest response for a tag, with digest and date headers.
pub(crate) fn manifest_response(digest: &str, last_modified: &str, body: &str) -> HttpResponse {
    HttpResponse::new(200)
        .with_header("Docker-Content-Digest", digest)
        .with_header("Last-Modified", last_modified)
        .with_header("Content-Type", "application/vnd.docker.distribution.manifest.v2+json")
        .with_body(body)
}

/// Builds a manifest JSON document with the given `(digest, size)` layers.
pub(crate) fn manifest_json(layers: &[(&str, u64)]) -> String {
    let layers: Vec<serde_json::Value> = layers
        .iter()
        .map(|(digest, size)| {
            serde_json::json!({
                "mediaType": "application/vnd.docker.image.rootfs.diff.tar.gzip",
                "size": size,
                "digest": digest,
            })
        })
        .collect();

    serde_json::json!({
        "schemaVersion": 2,
        "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
        "config": {
            "mediaType": "application/vnd.docker.container.image.v1+json",
            "size": 7023,
            "digest": "sha256:b5b2b2c507a0944348e0303114d8d93aaaa081732b86451d9bce1f432a537bc7",
        },
        "layers": layers,
    })
    .to_string()
}

/// A well-formed sha256 digest made of one repeated hex character.
pub(crate) fn digest_of(c: char) -> String {
    format!("sha256:{}", c.to_string().repeat(64))
}

pub(crate) fn tags_response(image: &str, tags: &[&str]) -> HttpResponse {
    HttpResponse::new(200).with_body(
        serde_json::json!({ "name": image, "tags": tags }).to_string(),
    )
}
