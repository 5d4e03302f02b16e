//! Route definitions for the `/steps` resource.
//!
//! Also nests step-scoped subtask and attachment routes under
//! `/steps/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{attachment, step, subtask};
use crate::state::AppState;

/// Routes mounted at `/steps`.
///
/// ```text
/// POST   /bulk-delete                  -> bulk_delete
/// POST   /bulk-status                  -> bulk_status
/// GET    /{id}                         -> get_by_id
/// PUT    /{id}                         -> update
/// DELETE /{id}                         -> delete
///
/// GET    /{id}/subtasks           -> subtask::list_by_step
/// POST   /{id}/subtasks           -> subtask::create
/// PUT    /{id}/subtasks/order     -> subtask::reorder
///
/// GET    /{id}/attachments        -> attachment::list_by_step
/// POST   /{id}/attachments        -> attachment::upload_for_step
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bulk-delete", post(step::bulk_delete))
        .route("/bulk-status", post(step::bulk_status))
        .route(
            "/{id}",
            get(step::get_by_id).put(step::update).delete(step::delete),
        )
        .route(
            "/{id}/subtasks",
            get(subtask::list_by_step).post(subtask::create),
        )
        .route("/{id}/subtasks/order", put(subtask::reorder))
        .route(
            "/{id}/attachments",
            get(attachment::list_by_step).post(attachment::upload_for_step),
        )
}
