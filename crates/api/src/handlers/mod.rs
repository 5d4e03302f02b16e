pub mod attachment;
pub mod category;
pub mod characteristic;
pub mod pm;
pub mod project;
pub mod report;
pub mod step;
pub mod subtask;
pub mod workspace;

use tracker_core::error::CoreError;
use tracker_core::ordering::{foreign_ids_error, unknown_ids_error};
use tracker_core::types::DbId;
use tracker_db::models::bulk::BulkOutcome;
use tracker_db::repositories::PmRepo;
use tracker_db::DbPool;

use crate::error::{AppError, AppResult};

/// Unwrap a committed bulk write, or report the ids that matched nothing.
pub(crate) fn bulk_applied<T>(outcome: BulkOutcome<T>, entity: &str) -> AppResult<T> {
    match outcome {
        BulkOutcome::Applied(value) => Ok(value),
        BulkOutcome::UnknownIds(missing) => Err(unknown_ids_error(entity, &missing).into()),
    }
}

/// Unwrap a committed reorder, or report the ids foreign to the parent.
pub(crate) fn reorder_applied<T>(outcome: BulkOutcome<T>) -> AppResult<T> {
    match outcome {
        BulkOutcome::Applied(value) => Ok(value),
        BulkOutcome::UnknownIds(foreign) => Err(foreign_ids_error(&foreign).into()),
    }
}

/// Confirm an optional PM reference points at an existing PM.
pub(crate) async fn ensure_pm(pool: &DbPool, pm_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = pm_id {
        PmRepo::find_by_id(pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Pm", id }))?;
    }
    Ok(())
}
