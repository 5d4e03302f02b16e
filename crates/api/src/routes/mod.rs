pub mod attachment;
pub mod category;
pub mod characteristic;
pub mod health;
pub mod pm;
pub mod project;
pub mod report;
pub mod step;
pub mod subtask;
pub mod workspace;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                                list, create
/// /categories/{id}                           get (with projects), update, delete
///
/// /pms                                       list, create
/// /pms/{id}                                  get, update, delete
///
/// /projects                                  list (?category_id&status), create
/// /projects/bulk-delete                      bulk delete (POST)
/// /projects/bulk-status                      bulk status (POST)
/// /projects/{id}                             get (detail), update, delete
/// /projects/{id}/steps                       list, create
/// /projects/{id}/steps/order                 reorder (PUT)
/// /projects/{id}/characteristics             list, create, replace (PUT)
/// /projects/{id}/characteristics/import      replace from sheet rows (POST)
/// /projects/{id}/attachments                 list, upload (multipart POST)
///
/// /steps/bulk-delete                         bulk delete (POST)
/// /steps/bulk-status                         bulk status (POST)
/// /steps/{id}                                get (detail), update, delete
/// /steps/{id}/subtasks                       list, create
/// /steps/{id}/subtasks/order                 reorder (PUT)
/// /steps/{id}/attachments                    list, upload (multipart POST)
///
/// /subtasks/bulk-delete                      bulk delete (POST)
/// /subtasks/bulk-status                      bulk status (POST)
/// /subtasks/{id}                             get, update, delete
///
/// /characteristics/{id}                      update, delete
///
/// /attachments                               create record (POST)
/// /attachments/{id}                          get, delete
///
/// /reports/kpi                               KPI report (?category_id)
///
/// /workspace                                 workspace info
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/pms", pm::router())
        .nest("/projects", project::router())
        .nest("/steps", step::router())
        .nest("/subtasks", subtask::router())
        .nest("/characteristics", characteristic::router())
        .nest("/attachments", attachment::router())
        .nest("/reports", report::router())
        .nest("/workspace", workspace::router())
}
