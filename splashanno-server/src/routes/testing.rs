//! In-process router harness for handler tests.

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use splashanno_core::{FilterMode, ServerConfig};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::routes::app;
use crate::state::AppState;

pub const PREFIX: &str = "https://dl.dir.freefiremobile.com/common/Local/BD/Splashanno/";
pub const ADMIN_HTML: &str = "<h1>admin</h1>";

pub struct TestServer {
    dir: TempDir,
    app: Router,
}

impl TestServer {
    pub fn new(mode: FilterMode, initial: Option<&Value>) -> Self {
        Self::with_config(mode, initial, false)
    }

    pub fn with_config(mode: FilterMode, initial: Option<&Value>, validate_writes: bool) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let data_file = dir.path().join("data.json");
        if let Some(doc) = initial {
            std::fs::write(&data_file, doc.to_string()).expect("write data");
        }

        let admin_page = dir.path().join("admin.html");
        std::fs::write(&admin_page, ADMIN_HTML).expect("write admin page");

        let config = ServerConfig {
            data_file,
            admin_page: admin_page.clone(),
            filter_mode: mode,
            validate_writes,
            ..ServerConfig::default()
        };

        let app = app(AppState::new(&config), &config.admin_page);
        TestServer { dir, app }
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data.json")
    }

    pub fn admin_page(&self) -> PathBuf {
        self.dir.path().join("admin.html")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    pub async fn post(&self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let (status, body) = self.send(request).await;
        (status, String::from_utf8(body).expect("utf8 body"))
    }

    pub async fn respond(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.expect("response")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.respond(request).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, body.to_vec())
    }
}
