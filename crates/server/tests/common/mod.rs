//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the router around either
//! the real ingest pipeline (with roster sources in a temp dir) or a
//! `MockIngest`, enabling end-to-end tests without binding a port.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use roster_core::{
    testing::MockIngest, ArchivePipeline, Config, IngestConfig, RosterIngest, ServerConfig,
    SourcesConfig,
};

/// Re-export fixtures for test convenience
pub use roster_core::testing::fixtures;

const BOUNDARY: &str = "roster-test-boundary";

/// Test fixture for API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_upload() {
///     let fixture = TestFixture::new();
///
///     let response = fixture
///         .upload("/api/v1/members/upload", "member.gz", &fixtures::gzip(b"name,priority\n"))
///         .await;
///
///     assert_eq!(response.body["status"], "success");
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock ingest, when the fixture was built with one
    pub mock: Option<MockIngest>,
    /// Temporary directory holding the configured roster sources
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture backed by the real ingest pipeline.
    pub fn new() -> Self {
        Self::with_ingest_config(IngestConfig::default())
    }

    /// Create a fixture backed by the real pipeline with custom ingest settings.
    pub fn with_ingest_config(ingest: IngestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pipeline = ArchivePipeline::new(&ingest);
        let config = test_config(&temp_dir, ingest);
        Self::build(config, Arc::new(pipeline), None, temp_dir)
    }

    /// Create a fixture backed by a `MockIngest`.
    pub fn with_mock() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mock = MockIngest::new();
        let config = test_config(&temp_dir, IngestConfig::default());
        Self::build(config, Arc::new(mock.clone()), Some(mock), temp_dir)
    }

    fn build(
        config: Config,
        ingest: Arc<dyn RosterIngest>,
        mock: Option<MockIngest>,
        temp_dir: TempDir,
    ) -> Self {
        let state = Arc::new(roster_server::state::AppState::new(config, ingest));
        let router = roster_server::api::create_router(state);

        Self {
            router,
            mock,
            temp_dir,
        }
    }

    /// Path of the configured tar.gz source.
    pub fn archive_path(&self) -> PathBuf {
        self.temp_dir.path().join("member.tar.gz")
    }

    /// Path of the configured CSV source.
    pub fn csv_path(&self) -> PathBuf {
        self.temp_dir.path().join("member.csv")
    }

    /// Write the configured tar.gz source.
    pub fn write_archive(&self, bytes: &[u8]) {
        std::fs::write(self.archive_path(), bytes).expect("Failed to write archive");
    }

    /// Write the configured CSV source.
    pub fn write_csv(&self, bytes: &[u8]) {
        std::fs::write(self.csv_path(), bytes).expect("Failed to write csv");
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST a multipart form with a single `file` field.
    pub async fn upload(&self, path: &str, filename: &str, data: &[u8]) -> TestResponse {
        let body = multipart_body(&[Part::file("file", filename, data)]);
        self.post_multipart(path, body).await
    }

    /// POST a pre-built multipart body.
    pub async fn post_multipart(&self, path: &str, body: Vec<u8>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with raw body and custom content type.
    pub async fn post_with_content_type(
        &self,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request and return the raw text body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).into_owned())
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

fn test_config(temp_dir: &TempDir, ingest: IngestConfig) -> Config {
    Config {
        server: ServerConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0, // Not used for in-process testing
        },
        sources: SourcesConfig {
            archive_path: temp_dir.path().join("member.tar.gz"),
            csv_path: temp_dir.path().join("member.csv"),
        },
        ingest,
    }
}

/// One part of a multipart form.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, filename: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            filename: Some(filename),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            data: value.as_bytes(),
        }
    }
}

/// Encode parts as a `multipart/form-data` body using the fixture boundary.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Helper to assert a response is a `failed` result with the given message.
#[macro_export]
macro_rules! assert_failed {
    ($response:expr, $message:expr) => {
        assert_eq!(
            $response.body["status"], "failed",
            "Expected failure, got {}",
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
        assert_eq!($response.body["message"], $message);
    };
}
