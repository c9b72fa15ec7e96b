//! # Blockworld Meshing
//!
//! Turns chunk cells of a [`VoxelStore`] into indexed triangle meshes.
//!
//! ## Pipeline
//!
//! ```text
//! VoxelStore ─→ ChunkView ─┬─→ naive:  every visible face ─────────┐
//!                          └─→ greedy: plants + boxes, then merged ─┴─→ ChunkMesh
//! ```
//!
//! ## Rules
//!
//! - Meshers only read the store; rebuilds are driven by the dirty set
//! - Border faces are culled against neighbouring chunks; absent chunks are air
//! - Positions are chunk-local; the host places the mesh at the chunk origin
//!
//! ## Example
//!
//! ```rust
//! use blockworld_core::{BlockId, ChunkCoord, VoxelStore};
//! use blockworld_meshing::{build_mesh, MeshAlgorithm};
//!
//! let mut store = VoxelStore::default();
//! store.set_voxel(1, 1, 1, BlockId::STONE);
//! let mesh = build_mesh(&store, ChunkCoord::new(0, 0, 0), MeshAlgorithm::Greedy);
//! assert_eq!(mesh.quad_count(), 6);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod atlas;
pub mod config;
pub mod mesh;
pub mod voxel;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use blockworld_core::{ChunkCoord, VoxelStore};
use tracing::{debug, warn};

pub use atlas::{UvRect, ATLAS_SIZE, TILE_SIZE};
pub use config::{MeshAlgorithm, MeshConfig};
pub use mesh::{vertex_bytes, ChunkMesh, TerrainVertex};
pub use voxel::greedy_mesh::GreedyMesher;
pub use voxel::naive_mesh::CaveDarkening;
pub use voxel::ChunkView;

/// Reusable chunk mesher.
///
/// Holds the greedy mask between builds; keep one per meshing thread.
#[derive(Debug, Default)]
pub struct ChunkMesher {
    config: MeshConfig,
    greedy: GreedyMesher,
}

impl ChunkMesher {
    /// Creates a mesher.
    #[must_use]
    pub fn new(config: MeshConfig) -> Self {
        Self {
            config,
            greedy: GreedyMesher::new(),
        }
    }

    /// Active settings.
    #[must_use]
    pub const fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Builds the mesh of the chunk cell at `coord`.
    ///
    /// Empty or absent cells give an empty mesh.
    pub fn mesh(&mut self, store: &VoxelStore, coord: ChunkCoord) -> ChunkMesh {
        let view = ChunkView::new(store, coord);
        let mut mesh = ChunkMesh::default();
        if view.is_empty() {
            return mesh;
        }

        let start = Instant::now();
        match self.config.algorithm {
            MeshAlgorithm::Naive => voxel::naive_mesh::mesh_naive(&view, self.config.darkening(), &mut mesh),
            MeshAlgorithm::Greedy => {
                voxel::naive_mesh::mesh_special(&view, &mut mesh);
                self.greedy.mesh(&view, &mut mesh);
            }
        }
        let elapsed = start.elapsed();

        debug!(
            "meshed chunk ({}, {}, {}) with {:?}: {} quads, {} vertices in {:?}",
            coord.x,
            coord.y,
            coord.z,
            self.config.algorithm,
            mesh.quad_count(),
            mesh.vertex_count(),
            elapsed
        );
        if elapsed.as_millis() > u128::from(self.config.slow_mesh_warn_ms) {
            warn!(
                "slow mesh: {}ms for chunk ({}, {}, {})",
                elapsed.as_millis(),
                coord.x,
                coord.y,
                coord.z
            );
        }
        mesh
    }
}

/// One-off mesh build with default settings and the given algorithm.
#[must_use]
pub fn build_mesh(store: &VoxelStore, coord: ChunkCoord, algorithm: MeshAlgorithm) -> ChunkMesh {
    ChunkMesher::new(MeshConfig::default().with_algorithm(algorithm)).mesh(store, coord)
}
