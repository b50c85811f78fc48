//! Implements a struct that holds the state of the REST server.

use std::{path::PathBuf, sync::Arc};

use crate::dataset::Dataset;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The orders loaded at startup, shared by all requests.
    pub dataset: Arc<Dataset>,

    /// The directory that static files (scripts, styles) are served from.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create a new [AppState] that serves `dataset`.
    pub fn new(dataset: Dataset, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset: Arc::new(dataset),
            static_dir: static_dir.into(),
        }
    }
}
