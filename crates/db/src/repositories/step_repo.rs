//! Repository for the `steps` table.

use sqlx::PgPool;
use tracker_core::status::TaskStatus;
use tracker_core::types::DbId;

use crate::models::bulk::{BulkOutcome, BulkResult};
use crate::models::project::Project;
use crate::models::step::{CreateStep, Step, StepDetail, UpdateStep};
use crate::progress::{attach_step_files, build_step_details, step_detail};
use crate::repositories::batch;
use crate::repositories::{AttachmentRepo, ProjectRepo, SubtaskRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, status, assignee_id, \
    start_date, target_date, completed_date, order_index, weight, comments, created_at, updated_at";

/// Provides CRUD, reorder and bulk operations for steps.
pub struct StepRepo;

impl StepRepo {
    /// Insert a new step under `project_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateStep,
    ) -> Result<Step, sqlx::Error> {
        let query = format!(
            "INSERT INTO steps (project_id, name, description, status, assignee_id, start_date,
                target_date, completed_date, order_index, weight, comments)
             VALUES ($1, $2, $3, COALESCE($4, 'todo'), $5, $6, $7, $8, COALESCE($9, 0),
                COALESCE($10, 1.0), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Step>(&query)
            .bind(project_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.status.map(TaskStatus::name))
            .bind(input.assignee_id)
            .bind(input.start_date)
            .bind(input.target_date)
            .bind(input.completed_date)
            .bind(input.order_index)
            .bind(input.weight)
            .bind(&input.comments)
            .fetch_one(pool)
            .await
    }

    /// Find a step by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Step>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM steps WHERE id = $1");
        sqlx::query_as::<_, Step>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's steps in `(order_index, id)` order.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Step>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM steps WHERE project_id = $1 ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Step>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List the steps of several projects at once.
    pub async fn list_by_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<Step>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM steps WHERE project_id = ANY($1)
             ORDER BY project_id, order_index, id"
        );
        sqlx::query_as::<_, Step>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a step. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStep,
    ) -> Result<Option<Step>, sqlx::Error> {
        let query = format!(
            "UPDATE steps SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                assignee_id = COALESCE($5, assignee_id),
                start_date = COALESCE($6, start_date),
                target_date = COALESCE($7, target_date),
                completed_date = COALESCE($8, completed_date),
                order_index = COALESCE($9, order_index),
                weight = COALESCE($10, weight),
                comments = COALESCE($11, comments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Step>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.status.map(TaskStatus::name))
            .bind(input.assignee_id)
            .bind(input.start_date)
            .bind(input.target_date)
            .bind(input.completed_date)
            .bind(input.order_index)
            .bind(input.weight)
            .bind(&input.comments)
            .fetch_optional(pool)
            .await
    }

    /// Delete a step and its subtasks. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM steps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Computed views
    // -----------------------------------------------------------------------

    /// Load a step with its subtasks and computed progress.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<StepDetail>, sqlx::Error> {
        let Some(step) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Self::detail(pool, step).await.map(Some)
    }

    /// Attach subtasks, attachments and progress to an already loaded step.
    pub async fn detail(pool: &PgPool, step: Step) -> Result<StepDetail, sqlx::Error> {
        let project = ProjectRepo::find_by_id(pool, step.project_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let subtasks = SubtaskRepo::list_by_step(pool, step.id).await?;
        let attachments = AttachmentRepo::list_by_step(pool, step.id).await?;
        let mut detail = step_detail(step, subtasks, project.inprogress_coeff);
        detail.attachments = attachments;
        Ok(detail)
    }

    /// All steps of a project with subtasks and progress.
    pub async fn list_details(
        pool: &PgPool,
        project: &Project,
    ) -> Result<Vec<StepDetail>, sqlx::Error> {
        let steps = Self::list_by_project(pool, project.id).await?;
        let step_ids: Vec<DbId> = steps.iter().map(|s| s.id).collect();
        let subtasks = SubtaskRepo::list_by_steps(pool, &step_ids).await?;
        let attachments = AttachmentRepo::list_by_steps(pool, &step_ids).await?;
        let (mut details, _) = build_step_details(steps, subtasks, project.inprogress_coeff);
        attach_step_files(&mut details, attachments);
        Ok(details)
    }

    // -----------------------------------------------------------------------
    // Reorder & bulk
    // -----------------------------------------------------------------------

    /// Reposition the listed steps of a project.
    ///
    /// `ids` must be free of duplicates. Returns every step of the project
    /// in its new order, or the ids that do not belong to it.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        ids: &[DbId],
    ) -> Result<BulkOutcome<Vec<Step>>, sqlx::Error> {
        batch::reorder_children(pool, "steps", COLUMNS, "project_id", project_id, ids).await
    }

    /// Delete every listed step, or none if any id is unknown.
    pub async fn bulk_delete(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
        batch::delete_all(pool, "steps", ids).await
    }

    /// Set `status` on every listed step, or on none if any id is unknown.
    pub async fn bulk_update_status(
        pool: &PgPool,
        ids: &[DbId],
        status: TaskStatus,
    ) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
        batch::update_status_all(pool, "steps", ids, status.name()).await
    }
}
