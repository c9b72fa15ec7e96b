//! # Blockworld Core
//!
//! Voxel storage for the Blockworld engine:
//!
//! - [`BlockId`] and the static block [`registry`]
//! - [`Chunk`] buffers of `N^3` bytes
//! - [`VoxelStore`], the sparse chunk map with its dirty set
//! - [`ChunkCodec`], LZ4 chunk persistence
//!
//! ## Architecture Rules
//!
//! 1. **The world is infinite to callers** - missing chunks and `y < 0` read as air
//! 2. **One owner at a time** - no locks inside the store
//! 3. **The registry is static** - safe to read from any thread
//!
//! ## Example
//!
//! ```rust
//! use blockworld_core::{BlockId, VoxelStore};
//!
//! let mut store = VoxelStore::default();
//! store.set_voxel(-5, 10, 3, BlockId::STONE);
//! assert_eq!(store.get_voxel(-5, 10, 3), BlockId::STONE);
//! assert_eq!(store.get_voxel(-5, -1, 3), BlockId::AIR);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod chunk;
pub mod config;
pub mod error;
pub mod persistence;
pub mod registry;
pub mod store;

pub use block::{BlockId, Face};
pub use chunk::{Chunk, ChunkCoord, ChunkShape, ColumnCoord, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use persistence::ChunkCodec;
pub use registry::{
    BlockDescriptor, BlockKind, CustomShape, FaceTiles, FoodData, TileCoord, ToolData, ToolKind,
};
pub use store::{VoxelStore, WriteOptions};
