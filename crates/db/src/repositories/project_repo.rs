//! Repository for the `projects` table.

use sqlx::PgPool;
use tracker_core::status::ProjectStatus;
use tracker_core::types::DbId;

use crate::models::bulk::{BulkOutcome, BulkResult};
use crate::models::project::{
    CreateProject, Project, ProjectDetail, ProjectFilter, ProjectSummary, UpdateProject,
};
use crate::progress::{assemble_detail, summarize_project, summarize_projects};
use crate::repositories::batch;
use crate::repositories::{AttachmentRepo, CharacteristicRepo, StepRepo, SubtaskRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, name, code, status, owner_id, start_date, target_date, \
    description, inprogress_coeff, moq, base_price, retail_price, cover_image, media_path, \
    created_at, updated_at";

/// Provides CRUD and bulk operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `status` is `None` it defaults to `active`; a missing
    /// `inprogress_coeff` defaults to 0.5.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (category_id, name, code, status, owner_id, start_date,
                target_date, description, inprogress_coeff, moq, base_price, retail_price,
                cover_image, media_path)
             VALUES ($1, $2, $3, COALESCE($4, 'active'), $5, $6, $7, $8, COALESCE($9, 0.5),
                $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.category_id)
            .bind(input.name.trim())
            .bind(&input.code)
            .bind(input.status.map(ProjectStatus::name))
            .bind(input.owner_id)
            .bind(input.start_date)
            .bind(input.target_date)
            .bind(&input.description)
            .bind(input.inprogress_coeff)
            .bind(input.moq)
            .bind(input.base_price)
            .bind(input.retail_price)
            .bind(&input.cover_image)
            .bind(&input.media_path)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `filter`, oldest first.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::bigint IS NULL OR category_id = $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.category_id)
            .bind(filter.status.map(ProjectStatus::name))
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                category_id = COALESCE($2, category_id),
                name = COALESCE($3, name),
                code = COALESCE($4, code),
                status = COALESCE($5, status),
                owner_id = COALESCE($6, owner_id),
                start_date = COALESCE($7, start_date),
                target_date = COALESCE($8, target_date),
                description = COALESCE($9, description),
                inprogress_coeff = COALESCE($10, inprogress_coeff),
                moq = COALESCE($11, moq),
                base_price = COALESCE($12, base_price),
                retail_price = COALESCE($13, retail_price),
                cover_image = COALESCE($14, cover_image),
                media_path = COALESCE($15, media_path)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.code)
            .bind(input.status.map(ProjectStatus::name))
            .bind(input.owner_id)
            .bind(input.start_date)
            .bind(input.target_date)
            .bind(&input.description)
            .bind(input.inprogress_coeff)
            .bind(input.moq)
            .bind(input.base_price)
            .bind(input.retail_price)
            .bind(&input.cover_image)
            .bind(&input.media_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Steps, subtasks, characteristics and
    /// attachments go with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Computed views
    // -----------------------------------------------------------------------

    /// Attach progress figures to an already loaded project.
    pub async fn summarize(pool: &PgPool, project: Project) -> Result<ProjectSummary, sqlx::Error> {
        let steps = StepRepo::list_by_project(pool, project.id).await?;
        let step_ids: Vec<DbId> = steps.iter().map(|s| s.id).collect();
        let subtasks = SubtaskRepo::list_by_steps(pool, &step_ids).await?;
        let (progress, _) = summarize_project(&project, steps, subtasks);
        Ok(ProjectSummary { project, progress })
    }

    /// List projects matching `filter` with their progress figures.
    pub async fn list_summaries(
        pool: &PgPool,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let projects = Self::list(pool, filter).await?;
        let project_ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let steps = StepRepo::list_by_projects(pool, &project_ids).await?;
        let step_ids: Vec<DbId> = steps.iter().map(|s| s.id).collect();
        let subtasks = SubtaskRepo::list_by_steps(pool, &step_ids).await?;
        Ok(summarize_projects(projects, steps, subtasks))
    }

    /// Load a project with steps, subtasks, characteristics, attachments and
    /// computed progress. Returns `None` if the project does not exist.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let steps = StepRepo::list_by_project(pool, id).await?;
        let step_ids: Vec<DbId> = steps.iter().map(|s| s.id).collect();
        let subtasks = SubtaskRepo::list_by_steps(pool, &step_ids).await?;
        let characteristics = CharacteristicRepo::list_by_project(pool, id).await?;
        let attachments = AttachmentRepo::list_by_project(pool, id).await?;
        let step_attachments = AttachmentRepo::list_by_steps(pool, &step_ids).await?;

        Ok(Some(assemble_detail(
            project,
            steps,
            subtasks,
            characteristics,
            attachments,
            step_attachments,
        )))
    }

    // -----------------------------------------------------------------------
    // Bulk
    // -----------------------------------------------------------------------

    /// Delete every listed project, or none if any id is unknown.
    pub async fn bulk_delete(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
        batch::delete_all(pool, "projects", ids).await
    }

    /// Set `status` on every listed project, or on none if any id is unknown.
    pub async fn bulk_update_status(
        pool: &PgPool,
        ids: &[DbId],
        status: ProjectStatus,
    ) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
        batch::update_status_all(pool, "projects", ids, status.name()).await
    }
}
