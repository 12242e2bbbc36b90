//! Tests for the static file server

use std::fs;

use tempfile::TempDir;

use crate::error::DashboardError;
use crate::services::RealStaticFileServer;
use crate::traits::StaticFileServer;

fn static_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<html>map</html>").unwrap();
    fs::create_dir(dir.path().join("js")).unwrap();
    fs::write(dir.path().join("js").join("map.js"), "console.log('map');").unwrap();
    dir
}

#[tokio::test]
async fn test_serve_index_for_empty_path() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    let response = server.serve_file("").await.unwrap();
    assert_eq!(response.content, b"<html>map</html>");
    assert_eq!(response.content_type, "text/html; charset=utf-8");
    assert_eq!(response.cache_control.as_deref(), Some("no-cache"));
}

#[tokio::test]
async fn test_serve_nested_asset() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    let response = server.serve_file("js/map.js").await.unwrap();
    assert_eq!(response.content_type, "application/javascript");
    assert_eq!(response.cache_control.as_deref(), Some("public, max-age=3600"));
}

#[tokio::test]
async fn test_missing_file_and_directory_are_not_found() {
    let dir = static_dir();
    let server = RealStaticFileServer::new(dir.path());

    assert!(matches!(
        server.serve_file("nope.css").await,
        Err(DashboardError::StaticFileNotFound { .. })
    ));
    assert!(matches!(
        server.serve_file("js").await,
        Err(DashboardError::StaticFileNotFound { .. })
    ));
}

#[tokio::test]
async fn test_traversal_is_denied() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("secret.txt"), "secret").unwrap();
    let public = root.path().join("public");
    fs::create_dir(&public).unwrap();

    let server = RealStaticFileServer::new(&public);
    assert!(matches!(
        server.serve_file("../secret.txt").await,
        Err(DashboardError::AccessDenied { .. })
    ));
}

