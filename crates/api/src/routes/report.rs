//! Route definitions for `/reports`.

use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /kpi     -> kpi
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/kpi", get(report::kpi))
}
