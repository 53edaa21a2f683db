//! Application state shared by handlers.

use std::sync::Arc;

use sqlx::SqlitePool;
use whisker_core::Config;
use whisker_storage::Storage;

use crate::services::DetectionPipeline;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub pipeline: DetectionPipeline,
    /// Staging area, probed by the health check
    pub staging: Arc<dyn Storage>,
}
