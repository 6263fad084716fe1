//! Application state for the HTTP server.

use std::sync::Arc;

use crate::build_info::BuildInfo;
use crate::db::repository::TceRepository;
use crate::services::HighWatermarks;

/// Shared application state passed to all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for TCE lookups
    pub repository: Arc<dyn TceRepository>,
    pub build: Arc<BuildInfo>,
    pub watermarks: Arc<HighWatermarks>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn TceRepository>) -> Self {
        Self {
            repository,
            build: Arc::new(BuildInfo::default()),
            watermarks: Arc::new(HighWatermarks::current()),
        }
    }

    pub fn with_build_info(mut self, build: BuildInfo) -> Self {
        self.build = Arc::new(build);
        self
    }
}
