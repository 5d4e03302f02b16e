//! Repository for the `project_characteristics` table.

use sqlx::PgPool;
use tracker_core::characteristics::CharacteristicItem;
use tracker_core::types::DbId;

use crate::models::characteristic::{
    Characteristic, CreateCharacteristic, UpdateCharacteristic,
};

const COLUMNS: &str = "id, project_id, parameter, value";

/// Provides CRUD and batch replace for project characteristics.
pub struct CharacteristicRepo;

impl CharacteristicRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateCharacteristic,
    ) -> Result<Characteristic, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_characteristics (project_id, parameter, value)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Characteristic>(&query)
            .bind(project_id)
            .bind(input.parameter.trim())
            .bind(&input.value)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Characteristic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_characteristics WHERE id = $1");
        sqlx::query_as::<_, Characteristic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's characteristics in insertion order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Characteristic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_characteristics WHERE project_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Characteristic>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacteristic,
    ) -> Result<Option<Characteristic>, sqlx::Error> {
        let query = format!(
            "UPDATE project_characteristics SET
                parameter = COALESCE($2, parameter),
                value = COALESCE($3, value)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Characteristic>(&query)
            .bind(id)
            .bind(input.parameter.as_deref().map(str::trim))
            .bind(&input.value)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_characteristics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a project's characteristics with `items` within a transaction.
    ///
    /// Existing rows are deleted and the new list inserted in order. An
    /// empty list clears the project. Returns `None` if the project does not
    /// exist, otherwise the new rows in insertion order.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: DbId,
        items: &[CharacteristicItem],
    ) -> Result<Option<Vec<Characteristic>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(project_id)
                .fetch_optional(&mut *tx)
                .await?;
        if project.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM project_characteristics WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO project_characteristics (project_id, parameter, value)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, Characteristic>(&insert)
                .bind(project_id)
                .bind(item.parameter.trim())
                .bind(&item.value)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(Some(rows))
    }
}
