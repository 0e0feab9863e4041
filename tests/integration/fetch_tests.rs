//! Integration tests for the fetch pipeline
//!
//! These tests use wiremock to stand in for the package index host and
//! run `fetch` end-to-end into a temporary directory.

#![cfg(unix)]

use dpkg_builder::commands;
use dpkg_builder::config::{Config, DownloadConfig, ExtractConfig, IndexConfig};
use dpkg_builder::{ArtifactRole, ErrorKind};
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
///
/// The extractor is replaced by a shell script that records the file name
/// it was given, so no real dpkg-source is needed.
fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        index: IndexConfig {
            base_url: format!("{}/buster/", base_url),
        },
        download: DownloadConfig {
            output_dir: output_dir.to_string_lossy().into_owned(),
        },
        extract: ExtractConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), r#"echo "$0" > ../extracted.txt"#.to_string()],
        },
        ..Config::default()
    }
}

fn html_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<li><a href=\"{}\">{}</a></li>\n", href, href))
        .collect();
    format!(
        "<html><head><title>Package</title></head><body><ul>\n{}</ul></body></html>",
        anchors
    )
}

async fn mount_index(server: &MockServer, package: &str, hrefs: &[&str], expected: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/buster/{}", package)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(hrefs))
                .insert_header("content-type", "text/html"),
        )
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_file(server: &MockServer, file_path: &str, body: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

fn files_in(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .expect("Failed to read package directory")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[tokio::test]
async fn test_fetch_downloads_three_artifacts() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    mount_index(
        &mock_server,
        "foo",
        &[
            "foo_1.0.dsc",
            "foo_1.0.orig.tar.gz",
            "foo_1.0.debian.tar.xz",
            "changelog",
        ],
        1,
    )
    .await;
    mount_file(&mock_server, "/buster/foo_1.0.dsc", "Source: foo\n", 1).await;
    mount_file(&mock_server, "/buster/foo_1.0.orig.tar.gz", "orig", 1).await;
    mount_file(&mock_server, "/buster/foo_1.0.debian.tar.xz", "debian", 1).await;
    mount_file(&mock_server, "/buster/changelog", "changes", 0).await;

    let config = create_test_config(&mock_server.uri(), out.path());
    let source = commands::fetch(Some("foo"), &config)
        .await
        .expect("Fetch failed");

    assert_eq!(source.href(ArtifactRole::Description), Some("foo_1.0.dsc"));
    assert_eq!(source.href(ArtifactRole::Orig), Some("foo_1.0.orig.tar.gz"));
    assert_eq!(source.href(ArtifactRole::Debian), Some("foo_1.0.debian.tar.xz"));

    let pkg_dir = out.path().join("foo");
    let expected: BTreeSet<String> = ["foo_1.0.dsc", "foo_1.0.orig.tar.gz", "foo_1.0.debian.tar.xz"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(files_in(&pkg_dir), expected);

    assert_eq!(
        std::fs::read_to_string(pkg_dir.join("foo_1.0.dsc")).unwrap(),
        "Source: foo\n"
    );
    assert_eq!(source.description_path(), Some(pkg_dir.join("foo_1.0.dsc").as_path()));
}

#[tokio::test]
async fn test_extractor_runs_in_package_directory() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    mount_index(&mock_server, "foo", &["foo_1.0.dsc"], 1).await;
    mount_file(&mock_server, "/buster/foo_1.0.dsc", "Source: foo\n", 1).await;

    let config = create_test_config(&mock_server.uri(), out.path());
    commands::fetch(Some("foo"), &config)
        .await
        .expect("Fetch failed");

    // The script writes one level up from its working directory
    let recorded = std::fs::read_to_string(out.path().join("extracted.txt"))
        .expect("Extractor did not run in the package directory");
    assert_eq!(recorded.trim(), "foo_1.0.dsc");
}

#[tokio::test]
async fn test_refetch_skips_existing_files() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    mount_index(
        &mock_server,
        "foo",
        &["foo_1.0.dsc", "foo_1.0.orig.tar.xz", "foo_1.0.debian.tar.xz"],
        2,
    )
    .await;
    mount_file(&mock_server, "/buster/foo_1.0.dsc", "dsc", 1).await;
    mount_file(&mock_server, "/buster/foo_1.0.orig.tar.xz", "orig", 1).await;
    mount_file(&mock_server, "/buster/foo_1.0.debian.tar.xz", "debian", 1).await;

    let config = create_test_config(&mock_server.uri(), out.path());
    commands::fetch(Some("foo"), &config)
        .await
        .expect("First fetch failed");
    let second = commands::fetch(Some("foo"), &config)
        .await
        .expect("Second fetch failed");

    assert!(second.description_path().is_some());
}

#[tokio::test]
async fn test_native_package_without_orig() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    mount_index(
        &mock_server,
        "bar",
        &["bar_2.0.dsc", "bar_2.0.debian.tar.xz"],
        1,
    )
    .await;
    mount_file(&mock_server, "/buster/bar_2.0.dsc", "dsc", 1).await;
    mount_file(&mock_server, "/buster/bar_2.0.debian.tar.xz", "debian", 1).await;

    let config = create_test_config(&mock_server.uri(), out.path());
    let source = commands::fetch(Some("bar"), &config)
        .await
        .expect("Fetch failed");

    assert_eq!(source.href(ArtifactRole::Orig), None);
    assert_eq!(files_in(&out.path().join("bar")).len(), 2);
}

#[tokio::test]
async fn test_absolute_and_root_relative_links() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");
    let base = mock_server.uri();

    let dsc = format!("{}/debian/pool/main/f/foo/foo_1.0.dsc", base);
    mount_index(
        &mock_server,
        "foo",
        &[
            dsc.as_str(),
            "/debian/pool/main/f/foo/foo_1.0.orig.tar.gz",
            "../pool/foo_1.0.debian.tar.xz",
        ],
        1,
    )
    .await;
    mount_file(&mock_server, "/debian/pool/main/f/foo/foo_1.0.dsc", "dsc", 1).await;
    mount_file(&mock_server, "/debian/pool/main/f/foo/foo_1.0.orig.tar.gz", "orig", 1).await;
    mount_file(&mock_server, "/pool/foo_1.0.debian.tar.xz", "debian", 1).await;

    let config = create_test_config(&base, out.path());
    commands::fetch(Some("foo"), &config)
        .await
        .expect("Fetch failed");

    assert_eq!(files_in(&out.path().join("foo")).len(), 3);
}

#[tokio::test]
async fn test_last_link_of_a_role_wins() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    mount_index(&mock_server, "foo", &["foo_0.9.dsc", "foo_1.0.dsc"], 1).await;
    mount_file(&mock_server, "/buster/foo_0.9.dsc", "old", 0).await;
    mount_file(&mock_server, "/buster/foo_1.0.dsc", "new", 1).await;

    let config = create_test_config(&mock_server.uri(), out.path());
    commands::fetch(Some("foo"), &config)
        .await
        .expect("Fetch failed");

    assert!(out.path().join("foo/foo_1.0.dsc").exists());
    assert!(!out.path().join("foo/foo_0.9.dsc").exists());
}

#[tokio::test]
async fn test_missing_package_name_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), out.path());
    let err = commands::fetch(None, &config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Usage);
    assert!(err.to_string().contains("fetch"));
    assert!(!out.path().join("foo").exists());
}

#[tokio::test]
async fn test_index_page_not_found() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/buster/nosuchpackage"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), out.path());
    let err = commands::fetch(Some("nosuchpackage"), &config)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(!out.path().join("nosuchpackage").exists());
}

#[tokio::test]
async fn test_artifact_download_failure_stops_pipeline() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    mount_index(
        &mock_server,
        "foo",
        &["foo_1.0.dsc", "foo_1.0.orig.tar.gz", "foo_1.0.debian.tar.xz"],
        1,
    )
    .await;
    mount_file(&mock_server, "/buster/foo_1.0.dsc", "dsc", 1).await;
    Mock::given(method("GET"))
        .and(path("/buster/foo_1.0.debian.tar.xz"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_file(&mock_server, "/buster/foo_1.0.orig.tar.gz", "orig", 0).await;

    let config = create_test_config(&mock_server.uri(), out.path());
    let err = commands::fetch(Some("foo"), &config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(out.path().join("foo/foo_1.0.dsc").exists());
    assert!(!out.path().join("extracted.txt").exists());
}

#[tokio::test]
async fn test_page_without_artifacts_skips_everything() {
    let mock_server = MockServer::start().await;
    let out = TempDir::new().expect("Failed to create temp dir");

    mount_index(&mock_server, "foo", &["changelog", "copyright"], 1).await;

    let config = create_test_config(&mock_server.uri(), out.path());
    let source = commands::fetch(Some("foo"), &config)
        .await
        .expect("Fetch failed");

    assert_eq!(source.description_path(), None);
    assert!(!out.path().join("foo").exists());
    assert!(!out.path().join("extracted.txt").exists());
}
