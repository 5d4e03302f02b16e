use std::sync::Arc;

use tracker_core::workspace::WorkspaceLayout;

use crate::config::ServerConfig;

/// Handler state: the pool plus configuration, including the workspace
/// root that attachment paths resolve against.
#[derive(Clone)]
pub struct AppState {
    pub pool: tracker_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub workspace: Arc<WorkspaceLayout>,
}
