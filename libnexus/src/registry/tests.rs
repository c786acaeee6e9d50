use super::*;
use crate::testing::{
    BASE, FakeTransport, digest_of, manifest_json, manifest_response, tags_response, test_config,
};
use chrono::TimeZone;

fn registry(transport: &FakeTransport) -> Registry<&FakeTransport> {
    Registry::with_transport(&test_config(), transport).unwrap()
}

#[test]
fn test_base_url_includes_repository() {
    let transport = FakeTransport::new();
    let registry = registry(&transport);
    assert_eq!(registry.base_url(), BASE);
}

#[test]
fn test_base_url_normalizes_host() {
    let config = RegistryConfig::new("nexus.test/", "u", "p", "docker");
    let registry = Registry::with_transport(&config, FakeTransport::new()).unwrap();
    assert_eq!(registry.base_url(), "http://nexus.test/repository/docker/v2");
}

#[test]
fn test_with_transport_rejects_empty_repository() {
    let config = RegistryConfig::new("http://nexus.test", "u", "p", "");
    let result = Registry::with_transport(&config, FakeTransport::new());
    assert!(matches!(result, Err(NexusError::Validation { .. })));
}

#[test]
fn test_every_request_carries_auth_and_accept_headers() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "_catalog",
        HttpResponse::new(200).with_body(r#"{"repositories":[]}"#),
    );
    registry(&transport).list_images().unwrap();

    let request = &transport.requests()[0];
    assert_eq!(
        request.header_value("Authorization"),
        Some(Credentials::basic("admin", "admin123").to_header_value().as_str())
    );
    assert_eq!(request.header_value("Accept"), Some(MANIFEST_V2_MEDIA_TYPE));
}

// list_images

#[test]
fn test_list_images_returns_server_order() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "_catalog",
        HttpResponse::new(200).with_body(r#"{"repositories":["nginx","alpine","app/api"]}"#),
    );

    let images = registry(&transport).list_images().unwrap();

    assert_eq!(images, vec!["nginx", "alpine", "app/api"]);
    assert_eq!(transport.request_log(), vec!["GET _catalog"]);
}

#[test]
fn test_list_images_not_found_is_unexpected_status() {
    let transport = FakeTransport::new();
    let err = registry(&transport).list_images().unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("404"));
}

#[test]
fn test_list_images_server_error_is_unexpected_status() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "_catalog",
        HttpResponse::new(500).with_body(r#"{"repositories":["partial"]}"#),
    );

    let err = registry(&transport).list_images().unwrap_err();
    assert!(matches!(
        err,
        NexusError::UnexpectedStatus {
            status: 500,
            expected: 200,
            ..
        }
    ));
}

#[test]
fn test_list_images_malformed_body_is_decode_error() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "_catalog",
        HttpResponse::new(200).with_body("<html>login</html>"),
    );

    let err = registry(&transport).list_images().unwrap_err();
    assert!(matches!(err, NexusError::Decode { .. }));
}

#[test]
fn test_list_images_transport_failure() {
    let transport = FakeTransport::new().fail(Method::Get, "_catalog", "connection reset");

    let err = registry(&transport).list_images().unwrap_err();
    assert!(matches!(err, NexusError::Transport { .. }));
}

// list_tags

#[test]
fn test_list_tags() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/tags/list",
        tags_response("app", &["1.0", "1.1", "latest"]),
    );

    let tags = registry(&transport).list_tags("app").unwrap();

    assert_eq!(tags, vec!["1.0", "1.1", "latest"]);
    assert_eq!(transport.request_log(), vec!["GET app/tags/list"]);
}

#[test]
fn test_list_tags_null_tags_is_empty() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/tags/list",
        HttpResponse::new(200).with_body(r#"{"name":"app","tags":null}"#),
    );

    assert!(registry(&transport).list_tags("app").unwrap().is_empty());
}

#[test]
fn test_list_tags_empty_image_rejected_without_request() {
    let transport = FakeTransport::new();

    let err = registry(&transport).list_tags("").unwrap_err();

    assert!(matches!(err, NexusError::Validation { .. }));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_list_tags_unknown_image() {
    let transport = FakeTransport::new();
    let err = registry(&transport).list_tags("missing").unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[test]
fn test_list_tags_malformed_body_is_decode_error() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/tags/list",
        HttpResponse::new(200).with_body(r#"{"name":"app","tags":"oops"}"#),
    );

    assert!(matches!(
        registry(&transport).list_tags("app"),
        Err(NexusError::Decode { .. })
    ));
}

// image_manifest

#[test]
fn test_image_manifest() {
    let body = manifest_json(&[(&digest_of('a'), 100), (&digest_of('b'), 200)]);
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        manifest_response(&digest_of('f'), "Tue, 15 Nov 1994 08:12:31 GMT", &body),
    );

    let manifest = registry(&transport).image_manifest("app", "1.0").unwrap();

    assert_eq!(manifest.schema_version, 2);
    assert_eq!(manifest.config.size, 7023);
    assert_eq!(manifest.layers.len(), 2);
    assert_eq!(manifest.layers[1].size, 200);
}

#[test]
fn test_image_manifest_tag_not_found() {
    let transport = FakeTransport::new();
    let err = registry(&transport).image_manifest("app", "nope").unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[test]
fn test_image_manifest_empty_tag_rejected() {
    let transport = FakeTransport::new();
    assert!(matches!(
        registry(&transport).image_manifest("app", " "),
        Err(NexusError::Validation { .. })
    ));
}

// image_tag_date

#[test]
fn test_image_tag_date_parses_rfc1123() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        manifest_response(&digest_of('a'), "Tue, 15 Nov 1994 08:12:31 GMT", "{}"),
    );

    let date = registry(&transport).image_tag_date("app", "1.0").unwrap();

    assert_eq!(date, Utc.with_ymd_and_hms(1994, 11, 15, 8, 12, 31).unwrap());
    assert_eq!(transport.request_log(), vec!["GET app/manifests/1.0"]);
}

#[test]
fn test_image_tag_date_missing_header() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        HttpResponse::new(200).with_body("{}"),
    );

    assert!(matches!(
        registry(&transport).image_tag_date("app", "1.0"),
        Err(NexusError::DateParse { .. })
    ));
}

#[test]
fn test_image_tag_date_malformed_header() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        HttpResponse::new(200).with_header("Last-Modified", "1994-11-15T08:12:31Z"),
    );

    assert!(matches!(
        registry(&transport).image_tag_date("app", "1.0"),
        Err(NexusError::DateParse { .. })
    ));
}

#[test]
fn test_image_tag_date_status_checked_before_header() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        HttpResponse::new(401).with_header("Last-Modified", "Tue, 15 Nov 1994 08:12:31 GMT"),
    );

    let err = registry(&transport).image_tag_date("app", "1.0").unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

// resolve_digest / delete_image_by_tag

#[test]
fn test_resolve_digest_reads_header() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        manifest_response(&digest_of('c'), "Tue, 15 Nov 1994 08:12:31 GMT", "{}"),
    );

    let digest = registry(&transport).resolve_digest("app", "1.0").unwrap();
    assert_eq!(digest.to_string(), digest_of('c'));
}

#[test]
fn test_resolve_digest_missing_header() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        HttpResponse::new(200).with_body("{}"),
    );

    assert!(matches!(
        registry(&transport).resolve_digest("app", "1.0"),
        Err(NexusError::MissingHeader { .. })
    ));
}

#[test]
fn test_delete_issues_get_then_delete_by_digest() {
    let digest = digest_of('d');
    let transport = FakeTransport::new()
        .on(
            Method::Get,
            "app/manifests/1.0",
            manifest_response(&digest, "Tue, 15 Nov 1994 08:12:31 GMT", "{}"),
        )
        .on(
            Method::Delete,
            &format!("app/manifests/{}", digest),
            HttpResponse::new(202),
        );

    let deleted = registry(&transport).delete_image_by_tag("app", "1.0").unwrap();

    assert_eq!(deleted.to_string(), digest);
    assert_eq!(
        transport.request_log(),
        vec![
            "GET app/manifests/1.0".to_string(),
            format!("DELETE app/manifests/{}", digest),
        ]
    );
}

#[test]
fn test_delete_non_202_is_failure_without_retry() {
    let digest = digest_of('d');
    let transport = FakeTransport::new()
        .on(
            Method::Get,
            "app/manifests/1.0",
            manifest_response(&digest, "Tue, 15 Nov 1994 08:12:31 GMT", "{}"),
        )
        .on(
            Method::Delete,
            &format!("app/manifests/{}", digest),
            HttpResponse::new(200),
        );

    let err = registry(&transport).delete_image_by_tag("app", "1.0").unwrap_err();

    assert!(matches!(
        err,
        NexusError::UnexpectedStatus {
            status: 200,
            expected: 202,
            ..
        }
    ));
    assert_eq!(transport.count(Method::Delete), 1);
}

#[test]
fn test_delete_unknown_tag_never_sends_delete() {
    let transport = FakeTransport::new();

    let err = registry(&transport).delete_image_by_tag("app", "gone").unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(transport.count(Method::Delete), 0);
}

#[test]
fn test_delete_with_invalid_digest_header_never_sends_delete() {
    let transport = FakeTransport::new().on(
        Method::Get,
        "app/manifests/1.0",
        HttpResponse::new(200).with_header("Docker-Content-Digest", "not-a-digest"),
    );

    let err = registry(&transport).delete_image_by_tag("app", "1.0").unwrap_err();

    assert!(matches!(err, NexusError::Validation { .. }));
    assert_eq!(transport.count(Method::Delete), 0);
}

#[test]
fn test_parse_last_modified_converts_offsets_to_utc() {
    let response =
        HttpResponse::new(200).with_header("last-modified", "Mon, 02 Jan 2006 17:04:05 +0200");
    let date = parse_last_modified(&response).unwrap();
    assert_eq!(date, Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap());
}
