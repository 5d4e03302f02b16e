//! Step entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::status::TaskStatus;
use tracker_core::types::{Date, DbId, Timestamp};

use crate::models::attachment::Attachment;
use crate::models::subtask::Subtask;

/// A row from the `steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Step {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub assignee_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub completed_date: Option<Date>,
    pub order_index: i32,
    pub weight: f64,
    pub comments: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a step under a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStep {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `todo` if omitted.
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub completed_date: Option<Date>,
    /// Defaults to 0 if omitted.
    pub order_index: Option<i32>,
    /// Defaults to 1.0 if omitted.
    pub weight: Option<f64>,
    pub comments: Option<String>,
}

/// DTO for updating a step. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStep {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub completed_date: Option<Date>,
    pub order_index: Option<i32>,
    pub weight: Option<f64>,
    pub comments: Option<String>,
}

/// A step with its subtasks, attachments and computed progress.
///
/// `progress_percent` is derived on every load and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct StepDetail {
    #[serde(flatten)]
    pub step: Step,
    pub progress_percent: i32,
    pub subtasks: Vec<Subtask>,
    /// Files recorded against this step.
    pub attachments: Vec<Attachment>,
}
