//! # Engine Error Types

use thiserror::Error;

use blockworld_core::StoreError;
use blockworld_procedural::GenerationError;

use crate::config::ConfigError;

/// Errors surfaced by the [`crate::Engine`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Voxel store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Terrain generation or worker pool failure.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
