//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::progress::ProjectProgress;
use tracker_core::status::ProjectStatus;
use tracker_core::types::{Date, DbId, Timestamp};

use crate::models::attachment::Attachment;
use crate::models::characteristic::Characteristic;
use crate::models::step::StepDetail;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub code: Option<String>,
    pub status: String,
    pub owner_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub description: Option<String>,
    pub inprogress_coeff: f64,
    pub moq: Option<f64>,
    pub base_price: Option<f64>,
    pub retail_price: Option<f64>,
    pub cover_image: Option<String>,
    pub media_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub category_id: DbId,
    pub name: String,
    pub code: Option<String>,
    /// Defaults to `active` if omitted.
    pub status: Option<ProjectStatus>,
    pub owner_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub description: Option<String>,
    /// Defaults to 0.5 if omitted.
    pub inprogress_coeff: Option<f64>,
    pub moq: Option<f64>,
    pub base_price: Option<f64>,
    pub retail_price: Option<f64>,
    pub cover_image: Option<String>,
    pub media_path: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub status: Option<ProjectStatus>,
    pub owner_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub description: Option<String>,
    pub inprogress_coeff: Option<f64>,
    pub moq: Option<f64>,
    pub base_price: Option<f64>,
    pub retail_price: Option<f64>,
    pub cover_image: Option<String>,
    pub media_path: Option<String>,
}

/// Filters accepted by the project list.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub category_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
}

/// A project with its computed progress figures.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    #[serde(flatten)]
    pub progress: ProjectProgress,
}

/// A project with everything hanging off it, as returned by the detail view.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    #[serde(flatten)]
    pub progress: ProjectProgress,
    pub steps: Vec<StepDetail>,
    pub characteristics: Vec<Characteristic>,
    pub attachments: Vec<Attachment>,
}
