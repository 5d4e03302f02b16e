//! Tests for `AppError` → HTTP response mapping.
//!
//! Most cases call `IntoResponse` directly on `AppError` values. Database
//! constraint mappings go through the router since they need real
//! PostgreSQL errors.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, delete, post_json};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tracker_api::error::AppError;
use tracker_core::error::CoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Direct variant mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Project",
        id: 42,
    });
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("name must not be empty".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name must not be empty");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Missing required 'file' field".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate name".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "duplicate name");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("disk /srv/tracker is full".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Conversions used by `?` in handlers
// ---------------------------------------------------------------------------

#[test]
fn core_and_database_errors_convert_into_matching_variants() {
    let err: AppError = CoreError::Validation("weight must be positive".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Validation(msg)) if msg.contains("weight"));

    let err: AppError = CoreError::NotFound { entity: "Step", id: 7 }.into();
    assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Step", id: 7 }));

    let err: AppError = sqlx::Error::RowNotFound.into();
    assert_matches!(err, AppError::Database(sqlx::Error::RowNotFound));
}

// ---------------------------------------------------------------------------
// Constraint mapping through the router
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_category_name_returns_409(pool: PgPool) {
    common::create_category(common::build_test_app(pool.clone()), "Kitchen").await;

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/categories", serde_json::json!({"name": "Kitchen"})).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_categories_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_category_with_projects_returns_409(pool: PgPool) {
    let category_id = common::create_category(common::build_test_app(pool.clone()), "Garden").await;
    common::create_project(
        common::build_test_app(pool.clone()),
        category_id,
        serde_json::json!({"name": "Hose reel"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/categories/{category_id}")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("fk_projects_category"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_rejected_before_the_handler(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/categories", serde_json::json!({"title": "x"})).await;
    assert!(response.status().is_client_error());
}
