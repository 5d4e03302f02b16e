//! Handlers for attachments.
//!
//! Files live under the workspace root; rows store the path relative to it.
//! Uploads write the file first and then the row. Deletes remove the row
//! first and then the file.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_core::workspace::AttachmentOwner;
use tracker_db::models::attachment::{Attachment, CreateAttachment};
use tracker_db::repositories::{AttachmentRepo, ProjectRepo, StepRepo};
use tracker_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_owner(pool: &DbPool, owner: AttachmentOwner) -> AppResult<()> {
    match owner {
        AttachmentOwner::Project(id) => {
            ProjectRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Project",
                    id,
                }))?;
        }
        AttachmentOwner::Step(id) => {
            StepRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound { entity: "Step", id }))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{project_id}/attachments
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Attachment>>>> {
    ensure_owner(&state.pool, AttachmentOwner::Project(project_id)).await?;
    let rows = AttachmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/steps/{step_id}/attachments
pub async fn list_by_step(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Attachment>>>> {
    ensure_owner(&state.pool, AttachmentOwner::Step(step_id)).await?;
    let rows = AttachmentRepo::list_by_step(&state.pool, step_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/attachments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Attachment>>> {
    let row = AttachmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;
    Ok(Json(DataResponse { data: row }))
}

// ---------------------------------------------------------------------------
// Registration and upload
// ---------------------------------------------------------------------------

/// POST /api/v1/attachments
///
/// Registers a file already present in the workspace. The path must be
/// relative to the workspace root.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAttachment>,
) -> AppResult<(StatusCode, Json<DataResponse<Attachment>>)> {
    if input.project_id.is_none() && input.step_id.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "An attachment needs a project_id or a step_id".into(),
        )));
    }
    state.workspace.resolve(&input.path)?;
    if let Some(id) = input.project_id {
        ensure_owner(&state.pool, AttachmentOwner::Project(id)).await?;
    }
    if let Some(id) = input.step_id {
        ensure_owner(&state.pool, AttachmentOwner::Step(id)).await?;
    }

    let row = AttachmentRepo::create(&state.pool, &input).await?;
    tracing::info!(attachment_id = row.id, path = %row.path, "Attachment registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// POST /api/v1/projects/{project_id}/attachments
///
/// Multipart upload with a required `file` field.
pub async fn upload_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Attachment>>)> {
    let row = store_upload(&state, AttachmentOwner::Project(project_id), multipart).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// POST /api/v1/steps/{step_id}/attachments
///
/// Multipart upload with a required `file` field. The row references the
/// step only.
pub async fn upload_for_step(
    State(state): State<AppState>,
    Path(step_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Attachment>>)> {
    let row = store_upload(&state, AttachmentOwner::Step(step_id), multipart).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

async fn store_upload(
    state: &AppState,
    owner: AttachmentOwner,
    mut multipart: Multipart,
) -> AppResult<Attachment> {
    ensure_owner(&state.pool, owner).await?;

    let mut file_data: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
    }
    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let relative = state
        .workspace
        .attachment_path(owner, &filename, chrono::Utc::now().timestamp());
    let absolute = state.workspace.resolve(&relative)?;
    if let Some(parent) = absolute.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
    }
    tokio::fs::write(&absolute, &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let (project_id, step_id) = match owner {
        AttachmentOwner::Project(id) => (Some(id), None),
        AttachmentOwner::Step(id) => (None, Some(id)),
    };
    let input = CreateAttachment {
        project_id,
        step_id,
        path: relative,
        added_at: None,
    };
    let row = match AttachmentRepo::create(&state.pool, &input).await {
        Ok(row) => row,
        Err(e) => {
            if let Err(io) = tokio::fs::remove_file(&absolute).await {
                tracing::warn!(
                    path = %absolute.display(),
                    error = %io,
                    "Failed to remove orphaned upload"
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        attachment_id = row.id,
        path = %row.path,
        bytes = data.len(),
        "Attachment uploaded"
    );
    Ok(row)
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

/// DELETE /api/v1/attachments/{id}
///
/// Removes the row, then the file. A file that is already gone, or that
/// cannot be removed, is logged and does not fail the request.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let row = AttachmentRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;

    match state.workspace.resolve(&row.path) {
        Ok(absolute) => {
            if let Err(e) = tokio::fs::remove_file(&absolute).await {
                tracing::warn!(
                    attachment_id = id,
                    path = %absolute.display(),
                    error = %e,
                    "Attachment file not removed"
                );
            }
        }
        Err(e) => {
            tracing::warn!(
                attachment_id = id,
                path = %row.path,
                error = %e,
                "Stored path outside workspace"
            );
        }
    }
    Ok(StatusCode::NO_CONTENT)
}
