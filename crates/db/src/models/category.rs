//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

use crate::models::project::ProjectSummary;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

/// DTO for renaming a category.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
}

/// A category with its roll-up figures, as listed.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithProgress {
    #[serde(flatten)]
    pub category: Category,
    pub projects_count: i64,
    pub progress_percent: i32,
}

/// A category with its member projects.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub progress_percent: i32,
    pub projects: Vec<ProjectSummary>,
}
