use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::artifact::ArtifactStore;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded artifacts, read-only for the process lifetime
    pub artifacts: Arc<ArtifactStore>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(artifacts: Arc<ArtifactStore>) -> Self {
        Self {
            artifacts,
            start_time: Utc::now(),
        }
    }

    /// Get system uptime in seconds
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
