//! Repository for the `attachments` table.

use sqlx::PgPool;
use tracker_core::types::DbId;

use crate::models::attachment::{Attachment, CreateAttachment};

const COLUMNS: &str = "id, project_id, step_id, path, added_at, created_at";

/// Provides create, lookup and delete for attachment records.
///
/// File contents live in the workspace; this repository only tracks paths.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Insert an attachment record. `added_at` defaults to today.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttachment,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments (project_id, step_id, path, added_at)
             VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(input.project_id)
            .bind(input.step_id)
            .bind(&input.path)
            .bind(input.added_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE id = $1");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_step(
        pool: &PgPool,
        step_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE step_id = $1 ORDER BY id");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(step_id)
            .fetch_all(pool)
            .await
    }

    /// Attachments of any of the given steps, ordered by step then id.
    pub async fn list_by_steps(
        pool: &PgPool,
        step_ids: &[DbId],
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        if step_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM attachments WHERE step_id = ANY($1) ORDER BY step_id, id"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(step_ids)
            .fetch_all(pool)
            .await
    }

    /// Delete an attachment record, returning the removed row so the caller
    /// can clean up the stored file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("DELETE FROM attachments WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
