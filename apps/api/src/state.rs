use std::sync::Arc;

use crate::config::Config;
use crate::scan::pipeline::Scanner;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Scan pipeline with its completion, storage and persistence collaborators.
    pub scanner: Arc<Scanner>,
    pub config: Config,
}
