//! Integration tests for the HTTP server
//!
//! Each test binds its own listener on an ephemeral port against a temporary
//! directory tree and drives it over real TCP with reqwest.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use trayserve::server::{ServerConfig, ServerHandle};

/// Start a server on an ephemeral loopback port serving `root`
fn start_test_server(root: &Path) -> ServerHandle {
    let config = ServerConfig {
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        root: root.to_path_buf(),
    };
    ServerHandle::start(config).expect("server should start on an ephemeral port")
}

fn base_url(server: &ServerHandle) -> String {
    format!("http://{}", server.local_addr())
}

#[tokio::test]
async fn serves_existing_file_with_content_type() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("notes.html"), "<p>study notes</p>").unwrap();
    fs::write(temp_dir.path().join("style.css"), "body { margin: 0 }").unwrap();

    let server = start_test_server(temp_dir.path());
    let base = base_url(&server);

    let response = reqwest::get(format!("{}/notes.html", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);
    assert_eq!(response.text().await.unwrap(), "<p>study notes</p>");

    let response = reqwest::get(format!("{}/style.css", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("text/css"), "got {}", content_type);
}

#[tokio::test]
async fn missing_path_returns_404() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let server = start_test_server(temp_dir.path());

    let response = reqwest::get(format!("{}/no-such-file.txt", base_url(&server)))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn directory_with_index_serves_index() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::create_dir(temp_dir.path().join("sub")).unwrap();
    fs::write(temp_dir.path().join("sub/index.html"), "sub index").unwrap();

    let server = start_test_server(temp_dir.path());
    let base = base_url(&server);

    let response = reqwest::get(format!("{}/sub/", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "sub index");
}

#[tokio::test]
async fn directory_without_index_lists_entries() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(temp_dir.path().join("papers")).unwrap();

    let server = start_test_server(temp_dir.path());

    let response = reqwest::get(base_url(&server)).await.unwrap();
    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);

    let body = response.text().await.unwrap();
    assert!(body.contains("a.txt"));
    assert!(body.contains("papers/"));
}

#[tokio::test]
async fn directory_traversal_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let served = temp_dir.path().join("served");
    fs::create_dir(&served).unwrap();
    fs::write(temp_dir.path().join("secret.txt"), "keep out").unwrap();

    let server = start_test_server(&served);

    let response = reqwest::get(format!("{}/%2e%2e/secret.txt", base_url(&server)))
        .await
        .unwrap();
    assert_ne!(response.status(), 200);
}

#[tokio::test]
async fn encoded_absolute_path_cannot_escape_the_root() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let served = temp_dir.path().join("served");
    let outside = temp_dir.path().join("outside");
    fs::create_dir(&served).unwrap();
    fs::create_dir(&outside).unwrap();
    fs::write(outside.join("marker.txt"), "keep out").unwrap();

    let server = start_test_server(&served);

    // One URL segment whose decoded form is the sibling's absolute path; it
    // must resolve relative to the served root, never replace it
    let encoded = urlencoding::encode(&outside.display().to_string()).into_owned();
    let response = reqwest::get(format!("{}/{}/", base_url(&server), encoded))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body = response.text().await.unwrap();
    assert!(
        !body.contains("marker.txt"),
        "listing escaped the served root: {}",
        body
    );
}

#[tokio::test]
async fn encoded_parent_segments_never_resolve() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let served = temp_dir.path().join("served");
    fs::create_dir(&served).unwrap();
    fs::write(served.join("notes.txt"), "fine").unwrap();
    fs::write(temp_dir.path().join("secret.txt"), "keep out").unwrap();

    let server = start_test_server(&served);

    // %2F survives URL parsing, so the decoded tail embeds `..` segments
    let response = reqwest::get(format!(
        "{}/notes%2F..%2F..%2Fsecret.txt",
        base_url(&server)
    ))
    .await
    .unwrap();
    assert_ne!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(!body.contains("keep out"), "served out-of-root file: {}", body);
}

#[tokio::test]
async fn head_requests_reach_the_listing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

    let server = start_test_server(temp_dir.path());

    let client = reqwest::Client::new();
    let response = client
        .head(format!("{}/", base_url(&server)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn health_route_reports_version() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let server = start_test_server(temp_dir.path());

    let response = reqwest::get(format!("{}/health", base_url(&server)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn real_file_shadows_health_route() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("health"), "a file named health").unwrap();

    let server = start_test_server(temp_dir.path());

    let response = reqwest::get(format!("{}/health", base_url(&server)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "a file named health");
}

#[test]
fn bind_conflict_is_a_fatal_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let first = start_test_server(temp_dir.path());

    // Same port again must fail up front, not spin or retry
    let config = ServerConfig {
        bind_address: "127.0.0.1".to_string(),
        port: first.port(),
        root: temp_dir.path().to_path_buf(),
    };
    let second = ServerHandle::start(config);
    match second {
        Err(trayserve::TrayServeError::Bind(_)) => {}
        Err(other) => panic!("expected a bind error, got: {}", other),
        Ok(_) => panic!("second bind on the same port should fail"),
    }
}
