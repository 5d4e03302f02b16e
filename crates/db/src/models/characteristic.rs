//! Project characteristic model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::characteristics::{CharacteristicItem, SheetCell};
use tracker_core::types::DbId;

/// A row from the `project_characteristics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Characteristic {
    pub id: DbId,
    pub project_id: DbId,
    pub parameter: String,
    pub value: Option<String>,
}

/// DTO for adding a single characteristic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacteristic {
    pub parameter: String,
    pub value: Option<String>,
}

/// DTO for editing a single characteristic.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacteristic {
    pub parameter: Option<String>,
    pub value: Option<String>,
}

/// Replace a project's whole characteristic list.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceCharacteristics {
    pub items: Vec<CharacteristicItem>,
}

/// Replace a project's characteristics from two-column sheet rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportCharacteristics {
    pub rows: Vec<Vec<Option<SheetCell>>>,
}
