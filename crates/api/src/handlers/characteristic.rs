//! Handlers for project characteristics.
//!
//! Besides single-row edits, a project's characteristics can be replaced
//! as a whole, either from a list of items or from sheet rows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::characteristics::{items_from_rows, validate_items, CharacteristicItem};
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_core::validation::validate_name;
use tracker_db::models::characteristic::{
    Characteristic, CreateCharacteristic, ImportCharacteristics, ReplaceCharacteristics,
    UpdateCharacteristic,
};
use tracker_db::repositories::{CharacteristicRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/characteristics
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Characteristic>>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    let rows = CharacteristicRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/projects/{project_id}/characteristics
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateCharacteristic>,
) -> AppResult<(StatusCode, Json<DataResponse<Characteristic>>)> {
    validate_name(&input.parameter, "parameter")?;
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let row = CharacteristicRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/projects/{project_id}/characteristics
///
/// Replaces the whole list. An empty `items` clears it.
pub async fn replace(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReplaceCharacteristics>,
) -> AppResult<Json<DataResponse<Vec<Characteristic>>>> {
    let rows = replace_items(&state, project_id, &input.items).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/projects/{project_id}/characteristics/import
///
/// Replaces the whole list from two-column sheet rows. Rows with a blank
/// first column are skipped.
pub async fn import(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<ImportCharacteristics>,
) -> AppResult<Json<DataResponse<Vec<Characteristic>>>> {
    let items = items_from_rows(&input.rows);
    tracing::debug!(
        project_id,
        rows = input.rows.len(),
        kept = items.len(),
        "Characteristic rows parsed"
    );
    let rows = replace_items(&state, project_id, &items).await?;
    Ok(Json(DataResponse { data: rows }))
}

async fn replace_items(
    state: &AppState,
    project_id: DbId,
    items: &[CharacteristicItem],
) -> AppResult<Vec<Characteristic>> {
    validate_items(items)?;
    let rows = CharacteristicRepo::replace_for_project(&state.pool, project_id, items)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    tracing::info!(project_id, count = rows.len(), "Characteristics replaced");
    Ok(rows)
}

/// PUT /api/v1/characteristics/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacteristic>,
) -> AppResult<Json<DataResponse<Characteristic>>> {
    if let Some(parameter) = &input.parameter {
        validate_name(parameter, "parameter")?;
    }
    let row = CharacteristicRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Characteristic",
            id,
        }))?;
    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/characteristics/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CharacteristicRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Characteristic",
            id,
        }))
    }
}
