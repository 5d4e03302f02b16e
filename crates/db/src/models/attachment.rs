//! Attachment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{Date, DbId, Timestamp};

/// A row from the `attachments` table.
///
/// `path` is relative to the workspace root.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub step_id: Option<DbId>,
    pub path: String,
    pub added_at: Option<Date>,
    pub created_at: Timestamp,
}

/// DTO for registering an attachment record.
///
/// At least one of `project_id` / `step_id` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttachment {
    pub project_id: Option<DbId>,
    pub step_id: Option<DbId>,
    pub path: String,
    pub added_at: Option<Date>,
}
