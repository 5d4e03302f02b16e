#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tracker_api::config::ServerConfig;
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_core::workspace::WorkspaceLayout;

/// Build a test `ServerConfig` with safe defaults rooted at `workspace`.
pub fn test_config(workspace: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        workspace_path: workspace.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build the full application router for tests that never touch files.
pub fn build_test_app(pool: PgPool) -> Router {
    let root: PathBuf = std::env::temp_dir().join("tracker-api-test-workspace");
    std::fs::create_dir_all(&root).unwrap();
    build_test_app_in(pool, &root)
}

/// Build the full application router with the workspace at `root`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the middleware
/// stack under test is the production one.
pub fn build_test_app_in(pool: PgPool, root: &Path) -> Router {
    let config = test_config(root);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        workspace: Arc::new(WorkspaceLayout::new(root)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a single-file multipart form under the field name `file`.
pub async fn post_file(app: Router, uri: &str, file_name: &str, contents: &[u8]) -> Response {
    let boundary = "tracker-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a category and return its id.
pub async fn create_category(app: Router, name: &str) -> i64 {
    let response = post_json(app, "/api/v1/categories", serde_json::json!({ "name": name })).await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a project in `category_id` and return its id.
pub async fn create_project(app: Router, category_id: i64, body: serde_json::Value) -> i64 {
    let mut body = body;
    body["category_id"] = serde_json::json!(category_id);
    let response = post_json(app, "/api/v1/projects", body).await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a step in `project_id` and return its id.
pub async fn create_step(app: Router, project_id: i64, body: serde_json::Value) -> i64 {
    let response = post_json(app, &format!("/api/v1/projects/{project_id}/steps"), body).await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a subtask in `step_id` and return its id.
pub async fn create_subtask(app: Router, step_id: i64, body: serde_json::Value) -> i64 {
    let response = post_json(app, &format!("/api/v1/steps/{step_id}/subtasks"), body).await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
