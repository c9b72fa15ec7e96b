//! # Store Error Types
//!
//! Errors that can occur while creating, filling or persisting chunks.
//!
//! Plain reads and writes never produce these: out-of-range addressing is
//! answered with air (reads) or silently dropped (writes).

use thiserror::Error;

use crate::chunk::ChunkCoord;

/// Errors that can occur in the voxel store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Chunk edge length outside the supported range.
    #[error("invalid chunk size {size}: must be within 1..={max}")]
    InvalidChunkSize {
        /// The rejected edge length.
        size: usize,
        /// Largest supported edge length.
        max: usize,
    },

    /// A chunk buffer could not be allocated.
    #[error("failed to allocate {bytes} bytes for chunk {coord:?}")]
    AllocationFailed {
        /// Chunk that was being created.
        coord: ChunkCoord,
        /// Requested buffer size.
        bytes: usize,
    },

    /// A raw chunk buffer had the wrong length.
    #[error("corrupt chunk {coord:?}: expected {expected} bytes, got {actual}")]
    Corrupt {
        /// Chunk that was being loaded.
        coord: ChunkCoord,
        /// Bytes required for the configured chunk size.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// LZ4 payload could not be decompressed.
    #[error("chunk decompression failed: {0}")]
    Decompress(#[from] lz4_flex::block::DecompressError),

    /// Filesystem error while saving or loading a chunk.
    #[error("chunk persistence failed: {0}")]
    Persistence(#[from] std::io::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
