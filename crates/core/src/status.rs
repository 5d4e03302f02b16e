//! Status enums for projects and tasks.
//!
//! Statuses are stored as lowercase snake_case text (constrained by CHECK
//! constraints in the schema). Row structs keep the raw string so that the
//! progress aggregator can treat anything unrecognized as "not started";
//! request DTOs deserialize straight into these enums so unknown values are
//! rejected at the write boundary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Task status (steps and subtasks)
// ---------------------------------------------------------------------------

/// Status of a step or subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    /// All variants, in workflow order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];

    /// Parse from the stored `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            other => Err(CoreError::Validation(format!(
                "Unknown task status '{other}'. Must be one of: todo, in_progress, blocked, done"
            ))),
        }
    }

    /// Stored `status` column value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }
}

// ---------------------------------------------------------------------------
// Project status
// ---------------------------------------------------------------------------

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
}

impl ProjectStatus {
    /// Parse from the stored `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::Validation(format!(
                "Unknown project status '{other}'. Must be one of: active, archived"
            ))),
        }
    }

    /// Stored `status` column value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_names_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_name(status.name()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_task_status_is_rejected() {
        assert!(TaskStatus::from_name("cancelled").is_err());
        assert!(TaskStatus::from_name("DONE").is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: ProjectStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Archived);
    }

    #[test]
    fn defaults_match_schema_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
    }
}
