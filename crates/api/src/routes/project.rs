//! Route definitions for the `/projects` resource.
//!
//! Also nests project-scoped step, characteristic and attachment routes
//! under `/projects/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{attachment, characteristic, project, step};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                    -> list
/// POST   /                                    -> create
/// POST   /bulk-delete                         -> bulk_delete
/// POST   /bulk-status                         -> bulk_status
/// GET    /{id}                                -> get_by_id
/// PUT    /{id}                                -> update
/// DELETE /{id}                                -> delete
///
/// GET    /{id}/steps                  -> step::list_by_project
/// POST   /{id}/steps                  -> step::create
/// PUT    /{id}/steps/order            -> step::reorder
///
/// GET    /{id}/characteristics        -> characteristic::list_by_project
/// POST   /{id}/characteristics        -> characteristic::create
/// PUT    /{id}/characteristics        -> characteristic::replace
/// POST   /{id}/characteristics/import -> characteristic::import
///
/// GET    /{id}/attachments            -> attachment::list_by_project
/// POST   /{id}/attachments            -> attachment::upload_for_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/bulk-delete", post(project::bulk_delete))
        .route("/bulk-status", post(project::bulk_status))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/steps",
            get(step::list_by_project).post(step::create),
        )
        .route("/{id}/steps/order", put(step::reorder))
        .route(
            "/{id}/characteristics",
            get(characteristic::list_by_project)
                .post(characteristic::create)
                .put(characteristic::replace),
        )
        .route(
            "/{id}/characteristics/import",
            post(characteristic::import),
        )
        .route(
            "/{id}/attachments",
            get(attachment::list_by_project).post(attachment::upload_for_project),
        )
}
