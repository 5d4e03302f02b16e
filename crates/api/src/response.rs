//! Success envelope shared by all tracker endpoints.

use serde::Serialize;

/// `{ "data": T }` wrapper for every successful JSON body.
///
/// Lists, single rows, computed reports and bulk results all go through it,
/// so clients always read the payload from `data`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
