//! # Engine
//!
//! Owns the voxel store and wires the generator, the worker pool and the
//! mesher around it.
//!
//! ```text
//! request_column ─→ workers ─→ pump ─→ store ─→ dirty set ─→ rebuild_dirty_meshes
//!                                        ↑
//!                           set_voxel ───┘
//! ```

use std::sync::Arc;

use tracing::{info, trace};

use blockworld_core::{BlockId, ChunkCoord, ColumnCoord, VoxelStore, WriteOptions};
use blockworld_meshing::{ChunkMesh, ChunkMesher, MeshAlgorithm};
use blockworld_procedural::{
    ColumnReport, GeneratedColumn, GenerationWorkers, TerrainGenerator, WorkerStats, WorldSeed,
};

use crate::config::EngineConfig;
use crate::error::EngineResult;

/// The voxel world engine.
pub struct Engine {
    config: EngineConfig,
    store: VoxelStore,
    generator: Arc<TerrainGenerator>,
    workers: GenerationWorkers,
    mesher: ChunkMesher,
}

impl Engine {
    /// Validates `config`, allocates the store and starts the workers.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or a worker thread that cannot be spawned.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let store = VoxelStore::from_config(&config.store)?;
        let seed = config.world_seed();
        let generator = Arc::new(TerrainGenerator::new(seed, config.terrain.clone()));
        let workers = GenerationWorkers::spawn(Arc::clone(&generator), store.shape(), config.workers.into())?;
        let mesher = ChunkMesher::new(config.mesh);

        info!(
            "engine ready: seed {}, chunk size {}, {:?} meshing",
            seed.value(),
            store.shape().size(),
            config.mesh.algorithm
        );
        Ok(Self {
            config,
            store,
            generator,
            workers,
            mesher,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// World seed.
    #[must_use]
    pub fn seed(&self) -> WorldSeed {
        self.generator.seed()
    }

    /// The voxel store.
    #[must_use]
    pub const fn store(&self) -> &VoxelStore {
        &self.store
    }

    /// Mutable access to the voxel store.
    pub fn store_mut(&mut self) -> &mut VoxelStore {
        &mut self.store
    }

    /// The terrain generator.
    #[must_use]
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    // =========================================================================
    // Voxels
    // =========================================================================

    /// Block at a world position; air outside loaded chunks.
    #[must_use]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.store.get_voxel(x, y, z)
    }

    /// Edits a voxel and marks its chunk for remeshing, along with any
    /// loaded neighbour chunk sharing a face with the voxel.
    ///
    /// Returns true if the position now holds `block`.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> bool {
        let written = self.store.set_voxel_with(x, y, z, block, WriteOptions::EDIT);
        if written {
            self.mark_neighbours_dirty(x, y, z);
        }
        written
    }

    /// Edits a voxel, surfacing allocation failures.
    ///
    /// # Errors
    ///
    /// Returns the store error if a new chunk cannot be allocated.
    pub fn try_set_voxel(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> EngineResult<bool> {
        let written = self.store.try_set_voxel(x, y, z, block, WriteOptions::EDIT)?;
        if written {
            self.mark_neighbours_dirty(x, y, z);
        }
        Ok(written)
    }

    /// Border edits change the faces of the neighbouring chunk too.
    fn mark_neighbours_dirty(&mut self, x: i32, y: i32, z: i32) {
        let shape = self.store.shape();
        let here = shape.chunk_of(x, y, z);
        for [dx, dy, dz] in [[-1, 0, 0], [1, 0, 0], [0, -1, 0], [0, 1, 0], [0, 0, -1], [0, 0, 1]] {
            let there = shape.chunk_of(x + dx, y + dy, z + dz);
            if there != here && self.store.contains_chunk(there) {
                self.store.mark_dirty(there);
            }
        }
    }

    /// Queues a chunk for remeshing.
    pub fn mark_dirty(&mut self, coord: ChunkCoord) {
        self.store.mark_dirty(coord);
    }

    /// Returns and clears the set of chunks waiting for a remesh.
    pub fn take_dirty_set(&mut self) -> Vec<ChunkCoord> {
        let mut dirty: Vec<_> = self.store.take_dirty_set().into_iter().collect();
        dirty.sort_unstable_by_key(|c| (c.x, c.z, c.y));
        dirty
    }

    // =========================================================================
    // Terrain
    // =========================================================================

    /// Generates a column on the calling thread and installs it, marking
    /// its chunks dirty.
    ///
    /// The column is built in a scratch store and merged like a background
    /// result, so the world does not depend on generation order and a
    /// failure leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Chunk allocation failure.
    pub fn generate_column(&mut self, column: ColumnCoord) -> EngineResult<ColumnReport> {
        let generated = GeneratedColumn::generate(&self.generator, self.store.shape(), column)?;
        Ok(self.install(generated))
    }

    /// As [`Self::generate_column`] with cave carving switched off.
    ///
    /// # Errors
    ///
    /// Chunk allocation failure.
    pub fn generate_column_without_caves(&mut self, column: ColumnCoord) -> EngineResult<ColumnReport> {
        let generated = GeneratedColumn::generate_without_caves(&self.generator, self.store.shape(), column)?;
        Ok(self.install(generated))
    }

    fn install(&mut self, generated: GeneratedColumn) -> ColumnReport {
        let report = generated.report().clone();
        let chunks = generated.install(&mut self.store);
        trace!("installed column [{},{}]: {chunks} chunks", report.column.x, report.column.z);
        report
    }

    /// Queues a column for background generation. Finished columns are
    /// installed by [`Self::pump`].
    ///
    /// # Errors
    ///
    /// The queue is full or the workers have stopped.
    pub fn request_column(&self, column: ColumnCoord) -> EngineResult<()> {
        self.workers.request(column)?;
        Ok(())
    }

    /// True if a column is queued or being generated.
    #[must_use]
    pub fn is_pending(&self, column: ColumnCoord) -> bool {
        self.workers.is_pending(column)
    }

    /// Number of queued or running column requests.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.workers.pending_count()
    }

    /// Drops a column: cancels its pending request and unloads its chunks.
    ///
    /// Returns the number of chunks removed.
    pub fn evict_column(&mut self, column: ColumnCoord) -> usize {
        let cancelled = self.workers.cancel(column);
        let removed = self.store.remove_column(column);
        trace!("evicted column [{},{}]: {removed} chunks, cancelled: {cancelled}", column.x, column.z);
        removed
    }

    /// Installs every finished background column without blocking.
    pub fn pump(&mut self) -> Vec<ColumnCoord> {
        self.workers.drain_completed(&mut self.store)
    }

    /// Blocks until every requested column is installed.
    ///
    /// # Errors
    ///
    /// The workers stopped before finishing.
    pub fn wait_for_columns(&mut self) -> EngineResult<Vec<ColumnCoord>> {
        Ok(self.workers.wait_all(&mut self.store)?)
    }

    /// Worker pool counters.
    #[must_use]
    pub fn worker_stats(&self) -> Arc<WorkerStats> {
        self.workers.stats()
    }

    // =========================================================================
    // Meshing
    // =========================================================================

    /// Meshes one chunk cell with the configured algorithm.
    pub fn build_mesh(&mut self, coord: ChunkCoord) -> ChunkMesh {
        self.mesher.mesh(&self.store, coord)
    }

    /// Meshes one chunk cell with a specific algorithm.
    #[must_use]
    pub fn build_mesh_with(&self, coord: ChunkCoord, algorithm: MeshAlgorithm) -> ChunkMesh {
        ChunkMesher::new(self.config.mesh.with_algorithm(algorithm)).mesh(&self.store, coord)
    }

    /// Drains the dirty set and meshes every chunk in it that is still
    /// loaded.
    pub fn rebuild_dirty_meshes(&mut self) -> Vec<(ChunkCoord, ChunkMesh)> {
        let dirty = self.take_dirty_set();
        trace!("rebuilding {} dirty chunks", dirty.len());
        dirty
            .into_iter()
            .filter(|&coord| self.store.contains_chunk(coord))
            .map(|coord| (coord, self.mesher.mesh(&self.store, coord)))
            .collect()
    }
}
