//! Subtask entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::status::TaskStatus;
use tracker_core::types::{Date, DbId, Timestamp};

/// A row from the `subtasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subtask {
    pub id: DbId,
    pub step_id: DbId,
    pub name: String,
    pub status: String,
    pub weight: f64,
    pub target_date: Option<Date>,
    pub completed_date: Option<Date>,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a subtask under a step.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubtask {
    pub name: String,
    /// Defaults to `todo` if omitted.
    pub status: Option<TaskStatus>,
    /// Defaults to 1.0 if omitted.
    pub weight: Option<f64>,
    pub target_date: Option<Date>,
    pub completed_date: Option<Date>,
    /// Defaults to 0 if omitted.
    pub order_index: Option<i32>,
}

/// DTO for updating a subtask. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubtask {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
    pub weight: Option<f64>,
    pub target_date: Option<Date>,
    pub completed_date: Option<Date>,
    pub order_index: Option<i32>,
}
