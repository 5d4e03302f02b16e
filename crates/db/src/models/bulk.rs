//! Request and result types for reorder and bulk operations.

use serde::{Deserialize, Serialize};
use tracker_core::status::{ProjectStatus, TaskStatus};
use tracker_core::types::DbId;

/// A list of ids to delete.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkIds {
    pub ids: Vec<DbId>,
}

/// Set one status on many projects.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkProjectStatusUpdate {
    pub ids: Vec<DbId>,
    pub status: ProjectStatus,
}

/// Set one status on many steps or subtasks.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkTaskStatusUpdate {
    pub ids: Vec<DbId>,
    pub status: TaskStatus,
}

/// New display order for a parent's children.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<DbId>,
}

/// Result of an all-or-nothing batch write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome<T> {
    /// Every id was valid and the write was committed.
    Applied(T),
    /// Some ids did not match; nothing was written.
    UnknownIds(Vec<DbId>),
}

/// Number of rows touched by a bulk write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkResult {
    pub affected: u64,
}
