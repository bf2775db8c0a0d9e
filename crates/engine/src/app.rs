//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, MapRepo, RandomPort};
use crate::use_cases::{ChunkManager, MapService};

/// Main application state.
///
/// Holds the use cases wired over the shared ports. Passed to HTTP handlers
/// via Axum state.
pub struct App {
    pub maps: Arc<MapService>,
    pub chunks: ChunkManager,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repo: Arc<dyn MapRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let maps = Arc::new(MapService::new(repo, random));
        let chunks = ChunkManager::new(maps.clone(), clock);
        Self { maps, chunks }
    }
}
