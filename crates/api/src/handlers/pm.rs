//! Handlers for the `/pms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_core::validation::validate_name;
use tracker_db::models::pm::{CreatePm, Pm, UpdatePm};
use tracker_db::repositories::PmRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/pms
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Pm>>>> {
    let pms = PmRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: pms }))
}

/// POST /api/v1/pms
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePm>,
) -> AppResult<(StatusCode, Json<DataResponse<Pm>>)> {
    validate_name(&input.name, "name")?;
    let pm = PmRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: pm })))
}

/// GET /api/v1/pms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Pm>>> {
    let pm = PmRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pm", id }))?;
    Ok(Json(DataResponse { data: pm }))
}

/// PUT /api/v1/pms/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePm>,
) -> AppResult<Json<DataResponse<Pm>>> {
    if let Some(name) = &input.name {
        validate_name(name, "name")?;
    }
    let pm = PmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pm", id }))?;
    Ok(Json(DataResponse { data: pm }))
}

/// DELETE /api/v1/pms/{id}
///
/// Projects and steps that referenced the PM keep existing without an owner.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PmRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Pm", id }))
    }
}
