//! # Blockworld
//!
//! A seeded, chunked voxel world: terrain generation, sparse storage and
//! chunk meshing behind one [`Engine`].
//!
//! ## Crates
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          blockworld                          │
//! │            Engine · EngineConfig · registry lookups          │
//! ├─────────────────────────────┬────────────────────────────────┤
//! │    blockworld_procedural    │       blockworld_meshing       │
//! │  noise · biomes · terrain   │  naive · greedy · sub-boxes    │
//! │  background workers         │  atlas UVs · vertex layout     │
//! ├─────────────────────────────┴────────────────────────────────┤
//! │                       blockworld_core                        │
//! │       block registry · chunks · voxel store · persistence    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use blockworld::{BlockId, ChunkCoord, ColumnCoord, Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::with_seed("42")).unwrap();
//! engine.generate_column(ColumnCoord::new(0, 0)).unwrap();
//! assert_eq!(engine.get_voxel(0, 0, 0), BlockId::BEDROCK);
//!
//! engine.set_voxel(0, 200, 0, BlockId::GLASS);
//! let meshes = engine.rebuild_dirty_meshes();
//! assert!(meshes.iter().any(|(coord, _)| *coord == ChunkCoord::new(0, 6, 0)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod engine;
pub mod error;

pub use blockworld_core as core;
pub use blockworld_meshing as meshing;
pub use blockworld_procedural as procedural;

pub use blockworld_core::registry::{descriptor, hardness, is_no_collision, is_transparent, texture_coords, tool_data};
pub use blockworld_core::{BlockDescriptor, BlockId, ChunkCoord, ColumnCoord, Face, TileCoord, ToolData};
pub use blockworld_meshing::{ChunkMesh, MeshAlgorithm, MeshConfig, TerrainVertex};
pub use blockworld_procedural::{ColumnReport, TerrainConfig, WorldSeed};

pub use config::{ConfigError, EngineConfig, WorkerConfig};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};

/// Atlas tile of a block face given as a face index
/// (`0..6` = `-X, +X, -Y, +Y, -Z, +Z`). `None` for an invalid index.
#[must_use]
pub fn texture_coords_by_index(id: BlockId, face_index: usize) -> Option<TileCoord> {
    Face::from_index(face_index).map(|face| texture_coords(id, face))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookups() {
        assert!(is_transparent(BlockId::AIR));
        assert!(!is_transparent(BlockId::STONE));
        assert!(is_no_collision(BlockId::WATER));
        assert!(hardness(BlockId::BEDROCK) < 0.0);
        assert!(tool_data(BlockId::IRON_PICKAXE).is_some());
        assert!(tool_data(BlockId::STONE).is_none());
        assert_eq!(descriptor(BlockId::STONE).map(|d| d.id), Some(BlockId::STONE));
    }

    #[test]
    fn test_texture_coords_by_index() {
        assert_eq!(
            texture_coords_by_index(BlockId::GRASS, 3),
            Some(texture_coords(BlockId::GRASS, Face::PosY))
        );
        assert_eq!(texture_coords_by_index(BlockId::GRASS, 6), None);
        assert_eq!(texture_coords_by_index(BlockId(77), 0), Some(TileCoord::MISSING));
    }
}
