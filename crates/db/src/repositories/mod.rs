//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

mod batch;

pub mod attachment_repo;
pub mod category_repo;
pub mod characteristic_repo;
pub mod pm_repo;
pub mod project_repo;
pub mod step_repo;
pub mod subtask_repo;

pub use attachment_repo::AttachmentRepo;
pub use category_repo::CategoryRepo;
pub use characteristic_repo::CharacteristicRepo;
pub use pm_repo::PmRepo;
pub use project_repo::ProjectRepo;
pub use step_repo::StepRepo;
pub use subtask_repo::SubtaskRepo;
