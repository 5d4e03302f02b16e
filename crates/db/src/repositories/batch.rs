//! All-or-nothing batch writes shared by the project, step and subtask
//! repositories.
//!
//! Every helper locks the rows it is about to touch, checks the requested
//! ids against what it locked, and only then writes. A rejected request
//! rolls back with nothing changed.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracker_core::ordering::{assign_positions, foreign_ids, missing_ids};
use tracker_core::types::DbId;

use crate::models::bulk::{BulkOutcome, BulkResult};

/// Delete every row in `ids`, or none if any id is unknown.
///
/// `ids` must already be deduplicated.
pub(crate) async fn delete_all(
    pool: &PgPool,
    table: &str,
    ids: &[DbId],
) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let lock = format!("SELECT id FROM {table} WHERE id = ANY($1) ORDER BY id FOR UPDATE");
    let found: Vec<DbId> = sqlx::query_scalar(&lock)
        .bind(ids)
        .fetch_all(&mut *tx)
        .await?;
    let missing = missing_ids(ids, &found);
    if !missing.is_empty() {
        tx.rollback().await?;
        tracing::debug!(table, ?missing, "Bulk delete rejected");
        return Ok(BulkOutcome::UnknownIds(missing));
    }

    let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ANY($1)"))
        .bind(ids)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(BulkOutcome::Applied(BulkResult {
        affected: result.rows_affected(),
    }))
}

/// Set `status` on every row in `ids`, or on none if any id is unknown.
///
/// `ids` must already be deduplicated.
pub(crate) async fn update_status_all(
    pool: &PgPool,
    table: &str,
    ids: &[DbId],
    status: &str,
) -> Result<BulkOutcome<BulkResult>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let lock = format!("SELECT id FROM {table} WHERE id = ANY($1) ORDER BY id FOR UPDATE");
    let found: Vec<DbId> = sqlx::query_scalar(&lock)
        .bind(ids)
        .fetch_all(&mut *tx)
        .await?;
    let missing = missing_ids(ids, &found);
    if !missing.is_empty() {
        tx.rollback().await?;
        tracing::debug!(table, ?missing, "Bulk status update rejected");
        return Ok(BulkOutcome::UnknownIds(missing));
    }

    let result = sqlx::query(&format!("UPDATE {table} SET status = $2 WHERE id = ANY($1)"))
        .bind(ids)
        .bind(status)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(BulkOutcome::Applied(BulkResult {
        affected: result.rows_affected(),
    }))
}

/// Reposition the listed children of one parent.
///
/// Listed ids get `order_index = position`; unlisted children keep theirs.
/// Any id not owned by the parent rejects the whole request. Returns every
/// child of the parent in `(order_index, id)` order.
pub(crate) async fn reorder_children<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    parent_column: &str,
    parent_id: DbId,
    ids: &[DbId],
) -> Result<BulkOutcome<Vec<T>>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut tx = pool.begin().await?;

    let lock = format!("SELECT id FROM {table} WHERE {parent_column} = $1 ORDER BY id FOR UPDATE");
    let owned: Vec<DbId> = sqlx::query_scalar(&lock)
        .bind(parent_id)
        .fetch_all(&mut *tx)
        .await?;
    let foreign = foreign_ids(&owned, ids);
    if !foreign.is_empty() {
        tx.rollback().await?;
        tracing::debug!(table, parent_id, ?foreign, "Reorder rejected");
        return Ok(BulkOutcome::UnknownIds(foreign));
    }

    if !ids.is_empty() {
        let (plan_ids, positions): (Vec<DbId>, Vec<i32>) = assign_positions(ids)
            .into_iter()
            .map(|a| (a.id, a.order_index))
            .unzip();
        let update = format!(
            "UPDATE {table} AS t SET order_index = u.order_index \
             FROM UNNEST($1::bigint[], $2::int[]) AS u(id, order_index) \
             WHERE t.id = u.id AND t.{parent_column} = $3"
        );
        sqlx::query(&update)
            .bind(&plan_ids[..])
            .bind(&positions[..])
            .bind(parent_id)
            .execute(&mut *tx)
            .await?;
    }

    let select = format!(
        "SELECT {columns} FROM {table} WHERE {parent_column} = $1 ORDER BY order_index, id"
    );
    let children = sqlx::query_as::<_, T>(&select)
        .bind(parent_id)
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(BulkOutcome::Applied(children))
}
