//! Route definitions for the `/pms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::pm;
use crate::state::AppState;

/// Routes mounted at `/pms`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pm::list).post(pm::create))
        .route(
            "/{id}",
            get(pm::get_by_id).put(pm::update).delete(pm::delete),
        )
}
