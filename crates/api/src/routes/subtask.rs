//! Route definitions for the `/subtasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subtask;
use crate::state::AppState;

/// Routes mounted at `/subtasks`.
///
/// ```text
/// POST   /bulk-delete     -> bulk_delete
/// POST   /bulk-status     -> bulk_status
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bulk-delete", post(subtask::bulk_delete))
        .route("/bulk-status", post(subtask::bulk_status))
        .route(
            "/{id}",
            get(subtask::get_by_id)
                .put(subtask::update)
                .delete(subtask::delete),
        )
}
