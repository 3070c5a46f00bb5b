//! Integration tests for the download module.
//!
//! These tests verify the full download flow with mock HTTP servers.

use std::path::Path;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use workshop_dl::download::{DownloadError, Downloader, HttpClient};
use workshop_dl::AddonSet;

mod support;
use support::socket_guard::start_mock_server_or_skip;

/// Helper to mount a file endpoint on an existing mock server.
async fn mount_file(server: &MockServer, path_str: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

fn http_client() -> HttpClient {
    HttpClient::new(reqwest::Client::new())
}

fn make_eligible(addons: &mut AddonSet, id: u64, file: &str, url: String) {
    addons.insert_if_absent(id);
    let record = addons.get_mut(id).expect("record was just inserted");
    record.name = format!("Addon {id}");
    record.file = file.to_string();
    record.url = url;
    record.download_eligible = true;
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("should read output dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_download_full_flow_preserves_content() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let content = b"GMAD\x03 addon payload\nline 2\nline 3";
    mount_file(&server, "/ugc/100", content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let target = temp_dir.path().join("pack.gma");
    let url = format!("{}/ugc/100", server.uri());
    let result = http_client().download_to_path(&url, &target).await;

    assert!(result.is_ok(), "Download should succeed: {:?}", result.err());
    let downloaded = std::fs::read(&target).expect("should read file");
    assert_eq!(downloaded, content, "Downloaded content should match original");
}

#[tokio::test]
async fn test_download_large_file_streams_to_disk() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let content = vec![0xAB_u8; 1024 * 1024];
    mount_file(&server, "/ugc/big", &content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let target = temp_dir.path().join("big.gma");
    let url = format!("{}/ugc/big", server.uri());
    let written = http_client()
        .download_to_path(&url, &target)
        .await
        .expect("download should succeed");

    assert_eq!(written, content.len() as u64);
    assert_eq!(std::fs::metadata(&target).expect("metadata").len(), written);
}

#[tokio::test]
async fn test_download_server_error_leaves_no_file() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/ugc/500"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let target = temp_dir.path().join("broken.gma");
    let url = format!("{}/ugc/500", server.uri());
    let result = http_client().download_to_path(&url, &target).await;

    assert!(matches!(
        result,
        Err(DownloadError::HttpStatus { status: 500, .. })
    ));
    assert!(file_names(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_downloader_writes_each_eligible_addon_by_file_name() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_file(&server, "/ugc/1", b"one").await;
    mount_file(&server, "/ugc/2", b"two").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let mut addons = AddonSet::new();
    make_eligible(&mut addons, 1, "first.gma", format!("{}/ugc/1", server.uri()));
    make_eligible(&mut addons, 2, "2.addon", format!("{}/ugc/2", server.uri()));
    addons.insert_if_absent(3);

    let downloader = Downloader::new(http_client(), temp_dir.path().to_path_buf());
    let stats = downloader.run(&addons).await;

    assert_eq!(stats.completed(), 2);
    assert_eq!(stats.failed(), 0);
    assert_eq!(file_names(temp_dir.path()), vec!["2.addon", "first.gma"]);
}

#[tokio::test]
async fn test_downloader_failure_does_not_stop_the_pass() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/ugc/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_file(&server, "/ugc/2", b"two").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let mut addons = AddonSet::new();
    make_eligible(&mut addons, 1, "one.gma", format!("{}/ugc/1", server.uri()));
    make_eligible(&mut addons, 2, "two.gma", format!("{}/ugc/2", server.uri()));

    let downloader = Downloader::new(http_client(), temp_dir.path().to_path_buf());
    let stats = downloader.run(&addons).await;

    assert_eq!(stats.completed(), 1);
    assert_eq!(stats.failed(), 1);
    assert_eq!(stats.total(), 2);
    assert_eq!(file_names(temp_dir.path()), vec!["two.gma"]);
}
