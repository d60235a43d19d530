#![allow(dead_code)]

use std::io::Cursor;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use dronemap_api::config::ServerConfig;
use dronemap_api::router::build_app_router;
use dronemap_api::state::AppState;

pub const BOUNDARY: &str = "dronemap-test-boundary";

/// Build a test `ServerConfig` pointing at a scratch directory.
///
/// Uses `http://localhost:8501` as CORS origin (matching the dev default),
/// a 30-second request timeout and a 1 MB upload cap.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        data_file: dir.path().join("media_data.json"),
        upload_dir: dir.path().join("uploads"),
        max_upload_bytes: 1024 * 1024,
    }
}

/// A running app plus the scratch directory backing it.
///
/// The directory is removed when this is dropped, so keep it alive for the
/// whole test.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    pub fn config(&self) -> ServerConfig {
        test_config(&self.dir)
    }
}

/// Build the full application router over a fresh scratch directory.
///
/// No data file exists yet, so the collection starts from the two seed
/// stories.
pub async fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    build_test_app_in(dir).await
}

/// Build the app over an existing directory, e.g. to check what survived
/// a restart.
pub async fn build_test_app_in(dir: TempDir) -> TestApp {
    let config = test_config(&dir);
    let state = AppState::load(config.clone()).await;
    let router = build_app_router(state.clone(), &config);
    TestApp { router, state, dir }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: &TestApp, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_multipart(app: &TestApp, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// Builder for `multipart/form-data` bodies using [`BOUNDARY`].
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// A small solid-colour PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// A complete, valid upload form around `file_name`/`data`.
pub fn story_form(title: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    MultipartBody::new()
        .text("title", title)
        .text("description", "Flyover of the harbour at dawn")
        .text("lat", "33.7405")
        .text("lon", "-118.2775")
        .text("altitude", "90")
        .text("timestamp", "2024-07-01 05:45:00")
        .file("file", file_name, "application/octet-stream", data)
        .finish()
}
