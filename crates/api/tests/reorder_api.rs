//! HTTP-level tests for step and subtask reordering.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_category, create_project, create_step, create_subtask};
use common::{get, put_json};
use serde_json::json;
use sqlx::PgPool;

/// A project with three steps created in order; returns (project, step ids).
async fn project_with_steps(pool: &PgPool, category: &str) -> (i64, Vec<i64>) {
    let category_id = create_category(common::build_test_app(pool.clone()), category).await;
    let project_id = create_project(
        common::build_test_app(pool.clone()),
        category_id,
        json!({"name": "Chair"}),
    )
    .await;
    let mut steps = Vec::new();
    for (i, name) in ["Sketch", "Prototype", "Ship"].into_iter().enumerate() {
        steps.push(
            create_step(
                common::build_test_app(pool.clone()),
                project_id,
                json!({"name": name, "order_index": i}),
            )
            .await,
        );
    }
    (project_id, steps)
}

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_steps_returns_new_order(pool: PgPool) {
    let (project_id, steps) = project_with_steps(&pool, "Chairs").await;
    let wanted = vec![steps[2], steps[0], steps[1]];

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/steps/order"),
        json!({"ids": wanted}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(ids(&json), wanted);
    assert_eq!(json["data"][0]["order_index"], 0);
    assert_eq!(json["data"][2]["order_index"], 2);

    // The detail view reads steps in the same order.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    let json = body_json(response).await;
    let detail_ids: Vec<i64> = json["data"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(detail_ids, wanted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_current_order_changes_nothing(pool: PgPool) {
    let (project_id, steps) = project_with_steps(&pool, "Chairs").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/steps/order"),
        json!({"ids": steps}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), steps);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_foreign_step_is_rejected_and_leaves_order(pool: PgPool) {
    let (project_id, steps) = project_with_steps(&pool, "Chairs").await;
    let (_, other_steps) = project_with_steps(&pool, "Tables").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/steps/order"),
        json!({"ids": [steps[2], other_steps[0], steps[0]]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains(&other_steps[0].to_string()));

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/projects/{project_id}/steps")).await;
    assert_eq!(ids(&body_json(response).await), steps);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_duplicate_ids_is_rejected(pool: PgPool) {
    let (project_id, steps) = project_with_steps(&pool, "Chairs").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/steps/order"),
        json!({"ids": [steps[1], steps[1]]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_for_missing_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/v1/projects/999999/steps/order", json!({"ids": []})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn partial_reorder_keeps_unlisted_steps(pool: PgPool) {
    let (project_id, steps) = project_with_steps(&pool, "Chairs").await;

    // Ship moves to 0 and ties with Sketch; id breaks the tie.
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/steps/order"),
        json!({"ids": [steps[2]]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        ids(&body_json(response).await),
        vec![steps[0], steps[2], steps[1]]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_subtasks_within_step(pool: PgPool) {
    let (_, steps) = project_with_steps(&pool, "Chairs").await;
    let step_id = steps[0];
    let mut subtasks = Vec::new();
    for (i, name) in ["Cut", "Sand", "Oil"].into_iter().enumerate() {
        subtasks.push(
            create_subtask(
                common::build_test_app(pool.clone()),
                step_id,
                json!({"name": name, "order_index": i}),
            )
            .await,
        );
    }
    let wanted = vec![subtasks[1], subtasks[2], subtasks[0]];

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/steps/{step_id}/subtasks/order"),
        json!({"ids": wanted}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), wanted);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/steps/{step_id}/subtasks")).await;
    assert_eq!(ids(&body_json(response).await), wanted);
}
