//! Handlers for subtasks, both step-scoped (`/steps/{id}/subtasks`) and
//! direct (`/subtasks/{id}`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::ordering::{normalize_bulk_ids, validate_order_request};
use tracker_core::types::DbId;
use tracker_core::validation::{validate_name, validate_optional, validate_weight};
use tracker_db::models::bulk::{BulkIds, BulkResult, BulkTaskStatusUpdate, ReorderRequest};
use tracker_db::models::subtask::{CreateSubtask, Subtask, UpdateSubtask};
use tracker_db::repositories::{StepRepo, SubtaskRepo};
use tracker_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::{bulk_applied, reorder_applied};
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_step(pool: &DbPool, step_id: DbId) -> AppResult<()> {
    StepRepo::find_by_id(pool, step_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Step",
            id: step_id,
        }))?;
    Ok(())
}

/// GET /api/v1/steps/{step_id}/subtasks
pub async fn list_by_step(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Subtask>>>> {
    ensure_step(&state.pool, step_id).await?;
    let subtasks = SubtaskRepo::list_by_step(&state.pool, step_id).await?;
    Ok(Json(DataResponse { data: subtasks }))
}

/// POST /api/v1/steps/{step_id}/subtasks
pub async fn create(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
    Json(input): Json<CreateSubtask>,
) -> AppResult<(StatusCode, Json<DataResponse<Subtask>>)> {
    validate_name(&input.name, "name")?;
    validate_optional(input.weight, "weight", validate_weight)?;
    ensure_step(&state.pool, step_id).await?;

    let subtask = SubtaskRepo::create(&state.pool, step_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: subtask })))
}

/// GET /api/v1/subtasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Subtask>>> {
    let subtask = SubtaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subtask",
            id,
        }))?;
    Ok(Json(DataResponse { data: subtask }))
}

/// PUT /api/v1/subtasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubtask>,
) -> AppResult<Json<DataResponse<Subtask>>> {
    if let Some(name) = &input.name {
        validate_name(name, "name")?;
    }
    validate_optional(input.weight, "weight", validate_weight)?;

    let subtask = SubtaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subtask",
            id,
        }))?;
    Ok(Json(DataResponse { data: subtask }))
}

/// DELETE /api/v1/subtasks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if SubtaskRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Subtask",
            id,
        }))
    }
}

/// PUT /api/v1/steps/{step_id}/subtasks/order
pub async fn reorder(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<Subtask>>>> {
    validate_order_request(&input.ids)?;
    ensure_step(&state.pool, step_id).await?;

    let outcome = SubtaskRepo::reorder(&state.pool, step_id, &input.ids).await?;
    let subtasks = reorder_applied(outcome)?;
    tracing::info!(step_id, moved = input.ids.len(), "Subtasks reordered");
    Ok(Json(DataResponse { data: subtasks }))
}

/// POST /api/v1/subtasks/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(input): Json<BulkIds>,
) -> AppResult<Json<DataResponse<BulkResult>>> {
    let ids = normalize_bulk_ids(&input.ids)?;
    let outcome = SubtaskRepo::bulk_delete(&state.pool, &ids).await?;
    let result = bulk_applied(outcome, "subtask")?;
    tracing::info!(affected = result.affected, "Subtasks bulk deleted");
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/subtasks/bulk-status
pub async fn bulk_status(
    State(state): State<AppState>,
    Json(input): Json<BulkTaskStatusUpdate>,
) -> AppResult<Json<DataResponse<BulkResult>>> {
    let ids = normalize_bulk_ids(&input.ids)?;
    let outcome = SubtaskRepo::bulk_update_status(&state.pool, &ids, input.status).await?;
    let result = bulk_applied(outcome, "subtask")?;
    tracing::info!(
        affected = result.affected,
        status = input.status.name(),
        "Subtasks bulk status updated"
    );
    Ok(Json(DataResponse { data: result }))
}
