//! Repository for the `pms` table.

use sqlx::PgPool;
use tracker_core::types::DbId;

use crate::models::pm::{CreatePm, Pm, UpdatePm};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for project managers.
pub struct PmRepo;

impl PmRepo {
    pub async fn create(pool: &PgPool, input: &CreatePm) -> Result<Pm, sqlx::Error> {
        let query = format!("INSERT INTO pms (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Pm>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pms WHERE id = $1");
        sqlx::query_as::<_, Pm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Pm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pms ORDER BY name, id");
        sqlx::query_as::<_, Pm>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePm,
    ) -> Result<Option<Pm>, sqlx::Error> {
        let query = format!(
            "UPDATE pms SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pm>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete a PM. Projects and steps pointing at it lose the reference.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
