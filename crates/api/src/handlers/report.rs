//! KPI report handler.

use axum::extract::{Query, State};
use axum::Json;
use tracker_core::progress::{kpi_report, KpiReport};
use tracker_db::models::project::ProjectFilter;
use tracker_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::query::KpiParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/kpi
///
/// Project counts, average progress and step/subtask totals, optionally
/// restricted to one category with `?category_id=`.
pub async fn kpi(
    State(state): State<AppState>,
    Query(params): Query<KpiParams>,
) -> AppResult<Json<DataResponse<KpiReport>>> {
    let filter = ProjectFilter {
        category_id: params.category_id,
        ..ProjectFilter::default()
    };
    let summaries = ProjectRepo::list_summaries(&state.pool, &filter).await?;
    let report = kpi_report(&summaries, params.category_id);
    Ok(Json(DataResponse { data: report }))
}
