//! Repository for the `subtasks` table.

use sqlx::PgPool;
use tracker_core::status::TaskStatus;
use tracker_core::types::DbId;

use crate::models::bulk::{BulkOutcome, BulkResult};
use crate::models::subtask::{CreateSubtask, Subtask, UpdateSubtask};
use crate::repositories::batch;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, step_id, name, status, weight, target_date, completed_date, \
    order_index, created_at, updated_at";

/// Provides CRUD, reorder and bulk operations for subtasks.
pub struct SubtaskRepo;

impl SubtaskRepo {
    /// Insert a new subtask under `step_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        step_id: DbId,
        input: &CreateSubtask,
    ) -> Result<Subtask, sqlx::Error> {
        let query = format!(
            "INSERT INTO subtasks (step_id, name, status, weight, target_date, completed_date,
                order_index)
             VALUES ($1, $2, COALESCE($3, 'todo'), COALESCE($4, 1.0), $5, $6, COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(step_id)
            .bind(input.name.trim())
            .bind(input.status.map(TaskStatus::name))
            .bind(input.weight)
            .bind(input.target_date)
            .bind(input.completed_date)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subtask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subtasks WHERE id = $1");
        sqlx::query_as::<_, Subtask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a step's subtasks in `(order_index, id)` order.
    pub async fn list_by_step(pool: &PgPool, step_id: DbId) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subtasks WHERE step_id = $1 ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(step_id)
            .fetch_all(pool)
            .await
    }

    /// List the subtasks of several steps at once.
    pub async fn list_by_steps(
        pool: &PgPool,
        step_ids: &[DbId],
    ) -> Result<Vec<Subtask>, sqlx::Error> {
        if step_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM subtasks WHERE step_id = ANY($1)
             ORDER BY step_id, order_index, id"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(step_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a subtask. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubtask,
    ) -> Result<Option<Subtask>, sqlx::Error> {
        let query = format!(
            "UPDATE subtasks SET
                name = COALESCE($2, name),
                status = COALESCE($3, status),
                weight = COALESCE($4, weight),
                target_date = COALESCE($5, target_date),
                completed_date = COALESCE($6, completed_date),
                order_index = COALESCE($7, order_index)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.status.map(TaskStatus::name))
            .bind(input.weight)
            .bind(input.target_date)
            .bind(input.completed_date)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subtasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reposition the listed subtasks of a step.
    ///
    /// `ids` must be free of duplicates. Returns every subtask of the step
    /// in its new order, or the ids that do not belong to it.
    pub async fn reorder(
        pool: &PgPool,
        step_id: DbId,
        ids: &[DbId],
    ) -> Result<BulkOutcome<Vec<Subtask>>, sqlx::Error> {
        batch::reorder_children(pool, "subtasks", COLUMNS, "step_id", step_id, ids).await
    }

    pub async fn bulk_delete(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
        batch::delete_all(pool, "subtasks", ids).await
    }

    pub async fn bulk_update_status(
        pool: &PgPool,
        ids: &[DbId],
        status: TaskStatus,
    ) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
        batch::update_status_all(pool, "subtasks", ids, status.name()).await
    }
}
