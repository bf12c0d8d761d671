//! Unit tests for the API client layer

use super::github::decode_base64_content;
use super::*;

#[test]
fn test_api_client_config_defaults() {
    let config = ApiClientConfig::default();
    assert_eq!(config.base_url, "https://api.github.com");
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.page_size, 100);
    assert!(config.access_token.is_none());
}

#[test]
fn test_api_client_config_builders() {
    let config = ApiClientConfig::github(Some("ghp_test".to_string()))
        .with_base_url("https://github.example.com/api/v3")
        .with_timeout(5)
        .with_page_size(50);

    assert_eq!(config.base_url, "https://github.example.com/api/v3");
    assert_eq!(config.timeout_seconds, 5);
    assert_eq!(config.page_size, 50);
    assert_eq!(config.access_token.as_deref(), Some("ghp_test"));
}

#[test]
fn test_decode_base64_content() {
    let encoded = "SGVsbG8sIFdvcmxkIQ==";
    let decoded = decode_base64_content(encoded).unwrap();
    assert_eq!(decoded, "Hello, World!");
}

#[test]
fn test_decode_base64_content_with_newlines() {
    // GitHub wraps blob content in newlines
    let encoded = "eyJuYW1lIjoi\ndGVzdCJ9\n";
    let decoded = decode_base64_content(encoded).unwrap();
    assert_eq!(decoded, r#"{"name":"test"}"#);
}

#[test]
fn test_decode_base64_content_invalid() {
    let result = decode_base64_content("not base64 at all!!!");
    assert!(result.is_err());
}

#[test]
fn test_tree_entry_deserialization() {
    let json = r#"{
        "path": "src/main.rs",
        "size": 1024,
        "url": "https://api.github.com/repos/o/r/git/blobs/abc"
    }"#;

    let entry: TreeEntry = serde_json::from_str(json).unwrap();
    assert_eq!(entry.path, "src/main.rs");
    assert_eq!(entry.size, Some(1024));
    assert!(entry.url.is_some());
}

#[test]
fn test_repository_metadata_deserialization() {
    let json = r#"{
        "name": "langscan",
        "default_branch": "main",
        "pushed_at": "2024-05-01T12:00:00Z",
        "private": false
    }"#;

    let metadata: RepositoryMetadata = serde_json::from_str(json).unwrap();
    assert_eq!(metadata.name, "langscan");
    assert_eq!(metadata.default_branch, "main");
    assert_eq!(metadata.pushed_at, "2024-05-01T12:00:00Z");
    assert!(!metadata.private);
}

#[tokio::test]
async fn test_github_client_creation() {
    let config = ApiClientConfig::github(None);
    let client = github::GitHubApiClient::new(config);
    assert!(client.is_ok());
}
