//! Project manager entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

/// A row from the `pms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pm {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a PM.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePm {
    pub name: String,
}

/// DTO for renaming a PM.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePm {
    pub name: Option<String>,
}
