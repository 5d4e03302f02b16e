use axum::routing::get;
use axum::Router;

use crate::handlers::workspace;
use crate::state::AppState;

/// Routes mounted at `/workspace`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(workspace::info))
}
