//! Handlers for steps, both project-scoped (`/projects/{id}/steps`) and
//! direct (`/steps/{id}`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::ordering::{normalize_bulk_ids, validate_order_request};
use tracker_core::types::DbId;
use tracker_core::validation::{validate_name, validate_optional, validate_weight};
use tracker_db::models::bulk::{BulkIds, BulkResult, BulkTaskStatusUpdate, ReorderRequest};
use tracker_db::models::step::{CreateStep, Step, StepDetail, UpdateStep};
use tracker_db::repositories::{ProjectRepo, StepRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{bulk_applied, ensure_pm, reorder_applied};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/steps
///
/// Steps in `(order_index, id)` order, each with subtasks and progress.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StepDetail>>>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    let steps = StepRepo::list_details(&state.pool, &project).await?;
    Ok(Json(DataResponse { data: steps }))
}

/// POST /api/v1/projects/{project_id}/steps
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateStep>,
) -> AppResult<(StatusCode, Json<DataResponse<StepDetail>>)> {
    validate_name(&input.name, "name")?;
    validate_optional(input.weight, "weight", validate_weight)?;
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    ensure_pm(&state.pool, input.assignee_id).await?;

    let step = StepRepo::create(&state.pool, project_id, &input).await?;
    let detail = StepRepo::detail(&state.pool, step).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/steps/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StepDetail>>> {
    let detail = StepRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Step", id }))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/steps/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStep>,
) -> AppResult<Json<DataResponse<StepDetail>>> {
    if let Some(name) = &input.name {
        validate_name(name, "name")?;
    }
    validate_optional(input.weight, "weight", validate_weight)?;
    ensure_pm(&state.pool, input.assignee_id).await?;

    let step = StepRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Step", id }))?;
    let detail = StepRepo::detail(&state.pool, step).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/steps/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if StepRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Step", id }))
    }
}

/// PUT /api/v1/projects/{project_id}/steps/order
///
/// Listed steps take their list position as `order_index`; unlisted steps
/// keep theirs. A repeated id or a step from another project rejects the
/// request and nothing moves. Returns every step of the project.
pub async fn reorder(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<Step>>>> {
    validate_order_request(&input.ids)?;
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let outcome = StepRepo::reorder(&state.pool, project_id, &input.ids).await?;
    let steps = reorder_applied(outcome)?;
    tracing::info!(project_id, moved = input.ids.len(), "Steps reordered");
    Ok(Json(DataResponse { data: steps }))
}

/// POST /api/v1/steps/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(input): Json<BulkIds>,
) -> AppResult<Json<DataResponse<BulkResult>>> {
    let ids = normalize_bulk_ids(&input.ids)?;
    let outcome = StepRepo::bulk_delete(&state.pool, &ids).await?;
    let result = bulk_applied(outcome, "step")?;
    tracing::info!(affected = result.affected, "Steps bulk deleted");
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/steps/bulk-status
pub async fn bulk_status(
    State(state): State<AppState>,
    Json(input): Json<BulkTaskStatusUpdate>,
) -> AppResult<Json<DataResponse<BulkResult>>> {
    let ids = normalize_bulk_ids(&input.ids)?;
    let outcome = StepRepo::bulk_update_status(&state.pool, &ids, input.status).await?;
    let result = bulk_applied(outcome, "step")?;
    tracing::info!(
        affected = result.affected,
        status = input.status.name(),
        "Steps bulk status updated"
    );
    Ok(Json(DataResponse { data: result }))
}
