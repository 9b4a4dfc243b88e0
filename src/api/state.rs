//! Application state for the API server

use crate::{Config, Newsroom};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// The newsroom serving every operation
    pub newsroom: Arc<Newsroom>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(newsroom: Arc<Newsroom>, config: Arc<Config>) -> Self {
        Self { newsroom, config }
    }
}
