//! Child ordering and bulk id-list checks.
//!
//! Steps within a project and subtasks within a step are read in
//! `(order_index, id)` order everywhere. A reorder request repositions only
//! the ids it lists; children it omits keep their current `order_index`,
//! and any resulting ties fall back to id order.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::validate_count_range;

/// Maximum number of ids accepted by a single reorder or bulk request.
pub const MAX_BATCH_IDS: usize = 1000;

/// An entity with an explicit sort key.
pub trait Ordered {
    fn id(&self) -> DbId;
    fn order_index(&self) -> i32;
}

/// Sort into canonical read order: `order_index` ascending, then id.
pub fn sort_canonical<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| (item.order_index(), item.id()));
}

/// New position for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAssignment {
    pub id: DbId,
    pub order_index: i32,
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// Check a reorder request on its own: bounded size and no repeated ids.
pub fn validate_order_request(ids: &[DbId]) -> Result<(), CoreError> {
    validate_count_range(ids.len(), MAX_BATCH_IDS, "Reorder")?;
    let duplicates = duplicate_ids(ids);
    if !duplicates.is_empty() {
        return Err(CoreError::Validation(format!(
            "Reorder list contains duplicate ids: {duplicates:?}"
        )));
    }
    Ok(())
}

/// Ids in `requested` that are not among `children`, in request order.
pub fn foreign_ids(children: &[DbId], requested: &[DbId]) -> Vec<DbId> {
    let owned: HashSet<DbId> = children.iter().copied().collect();
    requested
        .iter()
        .copied()
        .filter(|id| !owned.contains(id))
        .collect()
}

/// Assign 0-based positions in list order.
pub fn assign_positions(requested: &[DbId]) -> Vec<OrderAssignment> {
    requested
        .iter()
        .zip(0..)
        .map(|(&id, order_index)| OrderAssignment { id, order_index })
        .collect()
}

/// Validation error for ids that do not belong to the parent.
pub fn foreign_ids_error(foreign: &[DbId]) -> CoreError {
    CoreError::Validation(format!("Ids do not belong to the parent: {foreign:?}"))
}

// ---------------------------------------------------------------------------
// Bulk id lists
// ---------------------------------------------------------------------------

/// Normalize a bulk-operation id list: non-empty, bounded, deduplicated,
/// ascending.
pub fn normalize_bulk_ids(ids: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("At least one id is required".into()));
    }
    validate_count_range(ids.len(), MAX_BATCH_IDS, "Bulk operation")?;
    let mut unique: Vec<DbId> = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();
    Ok(unique)
}

/// Ids in `requested` that were not found, in request order.
pub fn missing_ids(requested: &[DbId], found: &[DbId]) -> Vec<DbId> {
    foreign_ids(found, requested)
}

/// Validation error for ids that matched no row.
pub fn unknown_ids_error(entity: &str, missing: &[DbId]) -> CoreError {
    CoreError::Validation(format!("Unknown {entity} ids: {missing:?}"))
}

fn duplicate_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut duplicates = Vec::new();
    for &id in ids {
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}
