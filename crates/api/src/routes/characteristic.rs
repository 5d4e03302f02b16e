//! Route definitions for the `/characteristics` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::characteristic;
use crate::state::AppState;

/// Routes mounted at `/characteristics`.
///
/// ```text
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(characteristic::update).delete(characteristic::delete),
    )
}
