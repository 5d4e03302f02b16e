//! Workspace location handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracker_core::workspace::ATTACHMENTS_DIR;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WorkspaceInfo {
    pub root: String,
    pub attachments_dir: String,
    pub logs_dir: String,
    /// Largest upload the server accepts, in bytes.
    pub max_upload_bytes: usize,
}

/// GET /api/v1/workspace
pub async fn info(State(state): State<AppState>) -> Json<DataResponse<WorkspaceInfo>> {
    let root = state.workspace.root();
    Json(DataResponse {
        data: WorkspaceInfo {
            root: root.display().to_string(),
            attachments_dir: root.join(ATTACHMENTS_DIR).display().to_string(),
            logs_dir: state.workspace.logs_dir().display().to_string(),
            max_upload_bytes: state.config.max_upload_bytes,
        },
    })
}
