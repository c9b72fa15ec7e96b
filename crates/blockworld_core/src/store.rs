//! # Voxel Store
//!
//! Sparse world of fixed-size chunks addressed by signed world coordinates.
//!
//! ## Addressing Rules
//!
//! - A chunk missing from the map reads as air.
//! - `y < 0` reads as air; writes there are dropped.
//! - Writing a non-air voxel creates the containing chunk unless the write
//!   asks not to. Writing air never creates a chunk.
//!
//! ## Ownership
//!
//! The store takes `&mut self` for every write. It has one owner at a time;
//! background generators build their own store and hand the finished chunks
//! over with [`VoxelStore::into_chunks`] / [`VoxelStore::insert_chunk`].

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{trace, warn};

use crate::block::BlockId;
use crate::chunk::{Chunk, ChunkCoord, ChunkShape, ColumnCoord};
use crate::config::StoreConfig;
use crate::error::StoreResult;

/// Initial chunk-map capacity.
const INITIAL_CHUNK_CAPACITY: usize = 256;

/// Options for a single voxel write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Create the containing chunk if it is absent.
    pub create_if_absent: bool,
    /// Add the containing chunk to the dirty set.
    pub mark_dirty: bool,
}

impl WriteOptions {
    /// Generator writes: create chunks, do not mark.
    pub const GENERATE: Self = Self { create_if_absent: true, mark_dirty: false };
    /// Live edits: create chunks and mark them for remeshing.
    pub const EDIT: Self = Self { create_if_absent: true, mark_dirty: true };
    /// Only touch chunks that already exist.
    pub const EXISTING_ONLY: Self = Self { create_if_absent: false, mark_dirty: false };
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::GENERATE
    }
}

/// Sparse chunked voxel world.
#[derive(Debug, Clone)]
pub struct VoxelStore {
    shape: ChunkShape,
    chunks: HashMap<ChunkCoord, Chunk>,
    dirty: HashSet<ChunkCoord>,
}

impl VoxelStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(shape: ChunkShape) -> Self {
        Self {
            shape,
            chunks: HashMap::with_capacity(INITIAL_CHUNK_CAPACITY),
            dirty: HashSet::new(),
        }
    }

    /// Creates an empty store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured chunk size is out of range.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        Ok(Self::new(ChunkShape::new(config.chunk_size)?))
    }

    /// Chunk dimensions.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> ChunkShape {
        self.shape
    }

    /// Chunk containing a world position.
    #[inline]
    #[must_use]
    pub const fn chunk_coord_for(&self, x: i32, y: i32, z: i32) -> ChunkCoord {
        self.shape.chunk_of(x, y, z)
    }

    /// Offset of a world position inside its chunk.
    #[inline]
    #[must_use]
    pub const fn local_offset(&self, x: i32, y: i32, z: i32) -> [usize; 3] {
        self.shape.local_of(x, y, z)
    }

    /// Voxel at a world position; air if the chunk is absent or `y < 0`.
    #[inline]
    #[must_use]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> BlockId {
        if y < 0 {
            return BlockId::AIR;
        }
        let [lx, ly, lz] = self.shape.local_of(x, y, z);
        self.chunks
            .get(&self.shape.chunk_of(x, y, z))
            .map_or(BlockId::AIR, |chunk| chunk.get(lx, ly, lz))
    }

    /// Writes with [`WriteOptions::GENERATE`].
    ///
    /// Returns true if the position now holds `block`.
    #[inline]
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, block: BlockId) -> bool {
        self.set_voxel_with(x, y, z, block, WriteOptions::GENERATE)
    }

    /// Writes a voxel.
    ///
    /// Returns true if the position now holds `block`. A failed chunk
    /// allocation is logged and reported as `false`; use
    /// [`Self::try_set_voxel`] to observe it.
    pub fn set_voxel_with(&mut self, x: i32, y: i32, z: i32, block: BlockId, options: WriteOptions) -> bool {
        match self.try_set_voxel(x, y, z, block, options) {
            Ok(written) => written,
            Err(err) => {
                warn!("voxel write at ({x}, {y}, {z}) dropped: {err}");
                false
            }
        }
    }

    /// Writes a voxel, surfacing allocation failures.
    ///
    /// `Ok(false)` means the write was a no-op: `y < 0`, or the chunk is
    /// absent and `create_if_absent` is off.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::AllocationFailed`] if a new chunk buffer
    /// cannot be allocated.
    pub fn try_set_voxel(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        block: BlockId,
        options: WriteOptions,
    ) -> StoreResult<bool> {
        if y < 0 {
            return Ok(false);
        }
        let coord = self.shape.chunk_of(x, y, z);
        let [lx, ly, lz] = self.shape.local_of(x, y, z);

        let chunk = match self.chunks.entry(coord) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(_) if !options.create_if_absent => return Ok(false),
            // Absent chunks already read as air.
            Entry::Vacant(_) if block.is_air() => return Ok(true),
            Entry::Vacant(entry) => entry.insert(Chunk::try_new(coord, self.shape)?),
        };
        chunk.set(lx, ly, lz, block);

        if options.mark_dirty {
            self.dirty.insert(coord);
        }
        Ok(true)
    }

    /// Chunk at a chunk coordinate.
    #[inline]
    #[must_use]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Mutable chunk at a chunk coordinate. Does not mark it dirty.
    #[inline]
    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// True if the chunk is loaded.
    #[inline]
    #[must_use]
    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of loaded chunks.
    #[inline]
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Loaded chunk coordinates, in no particular order.
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Loaded chunks belonging to one column, sorted bottom to top.
    #[must_use]
    pub fn column_chunks(&self, column: ColumnCoord) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self
            .chunks
            .keys()
            .filter(|c| c.column() == column)
            .copied()
            .collect();
        coords.sort_unstable_by_key(|c| c.y);
        coords
    }

    /// Installs a chunk, replacing and returning any previous one.
    ///
    /// The chunk must have this store's shape.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        debug_assert_eq!(chunk.shape(), self.shape);
        self.chunks.insert(chunk.coord(), chunk)
    }

    /// Evicts a chunk. It is also dropped from the dirty set.
    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        self.dirty.remove(&coord);
        self.chunks.remove(&coord)
    }

    /// Evicts every chunk of a column, returning how many were removed.
    pub fn remove_column(&mut self, column: ColumnCoord) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|coord, _| coord.column() != column);
        self.dirty.retain(|coord| coord.column() != column);
        before - self.chunks.len()
    }

    /// Consumes the store, yielding its chunks.
    pub fn into_chunks(self) -> impl Iterator<Item = Chunk> {
        self.chunks.into_values()
    }

    /// Copies a chunk's raw `N^3` buffer.
    #[must_use]
    pub fn export_chunk(&self, coord: ChunkCoord) -> Option<Vec<u8>> {
        self.chunks.get(&coord).map(|c| c.as_bytes().to_vec())
    }

    /// Installs a chunk from a raw `N^3` buffer and marks it dirty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::Corrupt`] if the buffer length is wrong.
    pub fn import_chunk(&mut self, coord: ChunkCoord, bytes: Vec<u8>) -> StoreResult<()> {
        let chunk = Chunk::from_bytes(coord, self.shape, bytes)?;
        self.chunks.insert(coord, chunk);
        self.dirty.insert(coord);
        Ok(())
    }

    /// Adds a chunk to the dirty set.
    #[inline]
    pub fn mark_dirty(&mut self, coord: ChunkCoord) {
        self.dirty.insert(coord);
    }

    /// True if the chunk is waiting for a remesh.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self, coord: ChunkCoord) -> bool {
        self.dirty.contains(&coord)
    }

    /// Number of chunks waiting for a remesh.
    #[inline]
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Returns and clears the dirty set.
    pub fn take_dirty_set(&mut self) -> HashSet<ChunkCoord> {
        let dirty = std::mem::take(&mut self.dirty);
        trace!("drained {} dirty chunks", dirty.len());
        dirty
    }
}

impl Default for VoxelStore {
    fn default() -> Self {
        Self::new(ChunkShape::default())
    }
}
