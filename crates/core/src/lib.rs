//! Domain logic for the project tracker.
//!
//! Everything in this crate is pure: no database access, no HTTP, no file
//! I/O. The persistence and API crates feed loaded rows into these
//! functions and render what comes back.

pub mod characteristics;
pub mod error;
pub mod ordering;
pub mod progress;
pub mod status;
pub mod types;
pub mod validation;
pub mod workspace;
