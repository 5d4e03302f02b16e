//! Shared query parameter types for API handlers.

use serde::Deserialize;
use tracker_core::status::ProjectStatus;
use tracker_core::types::DbId;
use tracker_db::models::project::ProjectFilter;

/// Filters for the project list (`?category_id=&status=`).
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub category_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
}

impl From<ProjectListParams> for ProjectFilter {
    fn from(params: ProjectListParams) -> Self {
        Self {
            category_id: params.category_id,
            status: params.status,
        }
    }
}

/// Optional category restriction for reports (`?category_id=`).
#[derive(Debug, Default, Deserialize)]
pub struct KpiParams {
    pub category_id: Option<DbId>,
}
