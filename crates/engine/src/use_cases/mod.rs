//! Use cases - orchestration over the ports.

pub mod chunks;
pub mod maps;

pub use chunks::ChunkManager;
pub use maps::{MapCreateRequest, MapGenerateOptions, MapService, MapServiceError, MapUpdateRequest};
