//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Computed response shapes (rows plus derived progress) sit next to the
//! row they extend.

pub mod attachment;
pub mod bulk;
pub mod category;
pub mod characteristic;
pub mod pm;
pub mod project;
pub mod step;
pub mod subtask;
