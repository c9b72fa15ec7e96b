//! # Generation Error Types
//!
//! Terrain generation itself cannot fail on valid input; what can fail is
//! the configuration, allocating chunk buffers and talking to the worker
//! pool.

use thiserror::Error;

use blockworld_core::{ColumnCoord, StoreError};

/// Errors that can occur while generating terrain.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Chunk allocation failed; the column's output was discarded.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A `[terrain]` setting is out of range.
    #[error("invalid terrain config: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },

    /// The worker pool has shut down.
    #[error("generation workers have shut down")]
    WorkersShutDown,

    /// The request queue is full.
    #[error("generation queue is full ({capacity} pending)")]
    QueueFull {
        /// Queue capacity.
        capacity: usize,
    },

    /// The column was evicted or cancelled before its result was installed.
    #[error("generation of column {column:?} was cancelled")]
    Cancelled {
        /// The abandoned column.
        column: ColumnCoord,
    },
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
