//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::ordering::normalize_bulk_ids;
use tracker_core::types::DbId;
use tracker_core::validation::{
    validate_name, validate_optional, validate_unit_range, validate_weight,
};
use tracker_db::models::bulk::{BulkIds, BulkProjectStatusUpdate, BulkResult};
use tracker_db::models::project::{CreateProject, ProjectDetail, ProjectSummary, UpdateProject};
use tracker_db::repositories::{CategoryRepo, ProjectRepo};
use tracker_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::{bulk_applied, ensure_pm};
use crate::query::ProjectListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Field checks shared by create and update.
fn validate_fields(
    name: Option<&str>,
    inprogress_coeff: Option<f64>,
    amounts: [(Option<f64>, &str); 3],
) -> Result<(), CoreError> {
    if let Some(name) = name {
        validate_name(name, "name")?;
    }
    validate_optional(inprogress_coeff, "inprogress_coeff", validate_unit_range)?;
    for (value, field) in amounts {
        validate_optional(value, field, validate_weight)?;
    }
    Ok(())
}

async fn ensure_category(pool: &DbPool, category_id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;
    Ok(())
}

/// GET /api/v1/projects
///
/// Optional `?category_id=` and `?status=` filters. Every item carries
/// computed progress.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectSummary>>>> {
    let projects = ProjectRepo::list_summaries(&state.pool, &params.into()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectSummary>>)> {
    validate_fields(
        Some(&input.name),
        input.inprogress_coeff,
        [
            (input.moq, "moq"),
            (input.base_price, "base_price"),
            (input.retail_price, "retail_price"),
        ],
    )?;
    ensure_category(&state.pool, input.category_id).await?;
    ensure_pm(&state.pool, input.owner_id).await?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, category_id = project.category_id, "Project created");

    let summary = ProjectRepo::summarize(&state.pool, project).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

/// GET /api/v1/projects/{id}
///
/// Full detail: steps with subtasks, characteristics, attachments and
/// computed progress at every level.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let detail = ProjectRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectSummary>>> {
    validate_fields(
        input.name.as_deref(),
        input.inprogress_coeff,
        [
            (input.moq, "moq"),
            (input.base_price, "base_price"),
            (input.retail_price, "retail_price"),
        ],
    )?;
    if let Some(category_id) = input.category_id {
        ensure_category(&state.pool, category_id).await?;
    }
    ensure_pm(&state.pool, input.owner_id).await?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let summary = ProjectRepo::summarize(&state.pool, project).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// POST /api/v1/projects/bulk-delete
///
/// All-or-nothing: any unknown id rejects the whole request.
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(input): Json<BulkIds>,
) -> AppResult<Json<DataResponse<BulkResult>>> {
    let ids = normalize_bulk_ids(&input.ids)?;
    let outcome = ProjectRepo::bulk_delete(&state.pool, &ids).await?;
    let result = bulk_applied(outcome, "project")?;
    tracing::info!(affected = result.affected, "Projects bulk deleted");
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/projects/bulk-status
pub async fn bulk_status(
    State(state): State<AppState>,
    Json(input): Json<BulkProjectStatusUpdate>,
) -> AppResult<Json<DataResponse<BulkResult>>> {
    let ids = normalize_bulk_ids(&input.ids)?;
    let outcome = ProjectRepo::bulk_update_status(&state.pool, &ids, input.status).await?;
    let result = bulk_applied(outcome, "project")?;
    tracing::info!(
        affected = result.affected,
        status = input.status.name(),
        "Projects bulk status updated"
    );
    Ok(Json(DataResponse { data: result }))
}
