use super::*;
use tempfile::TempDir;

fn answers(host: &str) -> RegistryConfig {
    RegistryConfig::new(host, "admin", "admin123", "docker-hosted")
}

#[test]
fn test_validate_host_url_with_scheme() {
    assert_eq!(
        validate_host_url("https://nexus.example.com").unwrap(),
        "https://nexus.example.com"
    );
}

#[test]
fn test_validate_host_url_adds_http_scheme() {
    assert_eq!(
        validate_host_url("localhost:8081").unwrap(),
        "http://localhost:8081"
    );
}

#[test]
fn test_validate_host_url_keeps_path() {
    assert_eq!(
        validate_host_url("https://example.com/nexus/").unwrap(),
        "https://example.com/nexus"
    );
}

#[test]
fn test_validate_host_url_rejects_other_schemes() {
    let err = validate_host_url("ftp://nexus.example.com").unwrap_err();
    assert!(err.contains("Invalid URL scheme 'ftp'"));
}

#[test]
fn test_validate_host_url_rejects_garbage() {
    assert!(validate_host_url("http://").is_err());
    assert!(validate_host_url("   ").is_err());
}

#[test]
fn test_get_credentials_path_env_override() {
    unsafe {
        std::env::set_var("NEXUS_CREDENTIALS", "/tmp/nexus-test.credentials");
    }
    assert_eq!(
        get_credentials_path(),
        PathBuf::from("/tmp/nexus-test.credentials")
    );
    unsafe {
        std::env::remove_var("NEXUS_CREDENTIALS");
    }
    assert_eq!(get_credentials_path(), PathBuf::from(".credentials"));
}

#[test]
fn test_write_credentials_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".credentials");

    let written = write_credentials(&path, &answers("nexus.local:8081/")).unwrap();
    assert_eq!(written.host, "http://nexus.local:8081");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("# Nexus Credentials"));
    assert!(contents.contains("nexus_repository = \"docker-hosted\""));

    let loaded = load_registry_config(&path).unwrap();
    assert_eq!(loaded.username, "admin");
    assert_eq!(loaded.repository, "docker-hosted");
}

#[test]
fn test_write_credentials_rejects_bad_host() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".credentials");

    assert!(write_credentials(&path, &answers("ftp://nexus")).is_err());
    assert!(!path.exists());
}

#[test]
fn test_write_credentials_rejects_empty_repository() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".credentials");
    let config = RegistryConfig::new("http://nexus", "admin", "pw", "");

    assert!(write_credentials(&path, &config).is_err());
    assert!(!path.exists());
}

#[test]
fn test_load_registry_config_missing_file_hints_configure() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_registry_config(&temp_dir.path().join("missing")).unwrap_err();

    assert!(err.contains("file not found"));
    assert!(err.contains("nexus-cli configure"));
}
