//! Route definitions for the `/attachments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attachment;
use crate::state::AppState;

/// Routes mounted at `/attachments`.
///
/// ```text
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(attachment::create))
        .route(
            "/{id}",
            get(attachment::get_by_id).delete(attachment::delete),
        )
}
