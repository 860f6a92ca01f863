//! Shared helpers for the integration test binaries.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use rabbit_storefront::{build_router, AppState, Config, MemoryStore};

pub const BASE_URL: &str = "http://localhost:3000";
pub const BOUNDARY: &str = "rabbit-storefront-test-boundary";

/// Create a test configuration
pub fn test_config(upload_dir: &Path, public_base_url: &str) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0, // Random port
        database_url: None,
        database_max_connections: 1,
        allowed_origins: vec!["http://localhost:5173".to_string()],
        upload_dir: upload_dir.to_path_buf(),
        public_base_url: public_base_url.to_string(),
        max_upload_bytes: 1024 * 1024,
        bcrypt_cost: 4,
        environment: "test".to_string(),
    }
}

/// Create a test app router backed by a fresh in-memory store
pub fn create_test_app(upload_dir: &Path) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), test_config(upload_dir, BASE_URL));
    (build_router(state), store)
}

/// Serve a fresh app on an ephemeral port and return its base URL
pub async fn spawn_server(upload_dir: &Path) -> (String, Arc<MemoryStore>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), test_config(upload_dir, &base_url));
    let app = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, store)
}

/// Parse response body as JSON
pub async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_to_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

/// Create a request with a JSON body
pub fn make_json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Create a GET request
pub fn make_get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Create a DELETE request
pub fn make_delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Create a multipart upload with a single file field
pub fn make_upload_request(field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Create a multipart upload carrying a plain (non-file) form value
pub fn make_form_value_request(field: &str, value: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{b}--\r\n",
        b = BOUNDARY,
        field = field,
        value = value
    );

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send one request through a clone of the router
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Body) {
    let response = app.clone().oneshot(request).await.unwrap();
    (response.status(), response.into_body())
}
