//! Shared helpers for API integration tests
//!
//! Every test gets its own temp work dir and SQLite file, so the pool's
//! connections all see the same database and nothing leaks between tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use recipe_server::{Config, ServerState};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    _work_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let work_dir = tempfile::tempdir().unwrap();
    let db_path = work_dir.path().join("recipes.db");
    let config = Config::with_overrides(
        work_dir.path().to_str().unwrap(),
        db_path.to_str().unwrap(),
        0,
    );
    let state = ServerState::initialize(&config).await.unwrap();
    let app = recipe_server::api::build_app(&state);
    TestApp {
        app,
        state,
        _work_dir: work_dir,
    }
}

/// Send a JSON request and return (status, parsed body)
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json_body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Send a raw-bytes request (multipart uploads)
pub async fn request_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    content_type: &str,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body)).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register an account and return a bearer token for it
pub async fn register_and_token(app: &Router, email: &str) -> String {
    let (status, _) = request(
        app,
        "POST",
        "/users/create",
        None,
        Some(json!({"email": email, "password": TEST_PASSWORD, "name": "Test User"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed for {email}");

    let (status, body) = request(
        app,
        "POST",
        "/users/token",
        None,
        Some(json!({"email": email, "password": TEST_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "token issuance failed for {email}");
    body["token"].as_str().unwrap().to_string()
}

/// Create a tag and return its id
pub async fn create_tag(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/recipe/tags",
        Some(token),
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Create an ingredient and return its id
pub async fn create_ingredient(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/recipe/ingredients",
        Some(token),
        Some(json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Create a recipe from a payload and return its id
pub async fn create_recipe(app: &Router, token: &str, payload: Value) -> i64 {
    let (status, body) = request(app, "POST", "/recipe/recipes", Some(token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Minimal valid recipe payload
pub fn recipe_payload(title: &str) -> Value {
    json!({"title": title, "time_minutes": 10, "price": "5.00"})
}
