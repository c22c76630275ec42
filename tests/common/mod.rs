#![allow(dead_code)]

use accepted_lists::middleware::ApiKey;
use accepted_lists::{AppState, app_router, db};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const TEST_KEY: &str = "testkey123";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Router over a fresh SQLite file; the file is removed on drop.
pub struct TestApp {
    pub router: Router,
    pub db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut p = self.db_path.clone().into_os_string();
            p.push(suffix);
            let _ = fs::remove_file(PathBuf::from(p));
        }
    }
}

pub fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "accepted-lists-{tag}-{}-{}-{}.sqlite",
        std::process::id(),
        nanos,
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    temp_path
}

pub fn static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

pub async fn spawn_app(tag: &str) -> TestApp {
    let db_path = temp_db_path(tag);
    let database_url = format!("sqlite://{}", db_path.display());
    let storage = db::open(&database_url)
        .await
        .expect("failed to open test database");

    let state = AppState::new(storage, ApiKey::new(TEST_KEY));
    TestApp {
        router: app_router(state, static_dir()),
        db_path,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = body_bytes(resp).await;
    serde_json::from_slice(&bytes).expect("response body was not json")
}

pub fn request(method: &str, uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn json_request(method: &str, uri: &str, key: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// GET with the valid key, returning status and parsed body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let resp = send(app, request("GET", uri, Some(TEST_KEY))).await;
    let status = resp.status();
    (status, body_json(resp).await)
}

/// POST `{"<field>": value}` with the valid key.
pub async fn create(app: &Router, path: &str, field: &str, value: &str) -> (StatusCode, Value) {
    let body = serde_json::json!({ field: value }).to_string();
    let resp = send(app, json_request("POST", path, Some(TEST_KEY), &body)).await;
    let status = resp.status();
    (status, body_json(resp).await)
}

/// Percent-encode a query value.
pub fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
