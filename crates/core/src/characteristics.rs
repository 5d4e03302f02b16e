//! Project characteristics: free-form parameter/value pairs.
//!
//! Characteristics are always replaced as a whole batch. A batch comes
//! either as a list of items or as rows lifted from a two-column sheet
//! (parameter in the first column, value in the second).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{validate_count_range, validate_name};

/// Maximum number of characteristics per project.
pub const MAX_CHARACTERISTICS: usize = 1000;

/// One parameter/value pair as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicItem {
    pub parameter: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// A single spreadsheet cell. Sheets hand us strings, numbers and booleans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SheetCell {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl SheetCell {
    /// Trimmed textual form, `None` when blank.
    pub fn text(&self) -> Option<String> {
        let raw = match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
        };
        (!raw.is_empty()).then_some(raw)
    }
}

/// Convert sheet rows into items.
///
/// Rows whose first cell is missing or blank are skipped. Cells past the
/// second column are ignored.
pub fn items_from_rows(rows: &[Vec<Option<SheetCell>>]) -> Vec<CharacteristicItem> {
    rows.iter()
        .filter_map(|row| {
            let parameter = row.first()?.as_ref()?.text()?;
            let value = row.get(1).and_then(Option::as_ref).and_then(SheetCell::text);
            Some(CharacteristicItem { parameter, value })
        })
        .collect()
}

/// Validate a replacement batch. An empty batch is valid (clears the list).
pub fn validate_items(items: &[CharacteristicItem]) -> Result<(), CoreError> {
    validate_count_range(items.len(), MAX_CHARACTERISTICS, "Characteristics")?;
    for (i, item) in items.iter().enumerate() {
        validate_name(&item.parameter, &format!("characteristics[{i}].parameter"))?;
    }
    Ok(())
}
