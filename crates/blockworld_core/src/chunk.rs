//! Chunk buffers and chunk-space math.
//!
//! A chunk is an `N x N x N` cube of voxels stored as one contiguous byte
//! buffer in `y * N^2 + z * N + x` order, the same layout used on disk.

use bytemuck::{Pod, Zeroable};

use crate::block::BlockId;
use crate::error::{StoreError, StoreResult};

/// Default chunk edge length.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Largest supported chunk edge length.
pub const MAX_CHUNK_SIZE: usize = 256;

/// Chunk coordinate in chunk space.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
pub struct ChunkCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Column key (x, z) this chunk belongs to.
    #[inline]
    #[must_use]
    pub const fn column(self) -> ColumnCoord {
        ColumnCoord::new(self.x, self.z)
    }
}

/// A vertical stack of chunks, addressed by its horizontal chunk coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnCoord {
    /// Chunk X.
    pub x: i32,
    /// Chunk Z.
    pub z: i32,
}

impl ColumnCoord {
    /// Creates a new column coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Chunk dimensions and the world/chunk/local conversions that depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkShape {
    size: usize,
}

impl ChunkShape {
    /// Validates `size` and builds a shape.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidChunkSize`] unless `1 <= size <= 256`.
    pub const fn new(size: usize) -> StoreResult<Self> {
        if size == 0 || size > MAX_CHUNK_SIZE {
            return Err(StoreError::InvalidChunkSize { size, max: MAX_CHUNK_SIZE });
        }
        Ok(Self { size })
    }

    /// Edge length `N`.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        self.size
    }

    /// Edge length as a signed world-space extent.
    #[inline]
    #[must_use]
    pub const fn size_i32(self) -> i32 {
        self.size as i32
    }

    /// Voxels per chunk, `N^3`.
    #[inline]
    #[must_use]
    pub const fn volume(self) -> usize {
        self.size * self.size * self.size
    }

    /// Buffer index of a local position.
    #[inline]
    #[must_use]
    pub const fn index(self, x: usize, y: usize, z: usize) -> usize {
        (y * self.size + z) * self.size + x
    }

    /// Chunk containing a world position (floor division).
    #[inline]
    #[must_use]
    pub const fn chunk_of(self, x: i32, y: i32, z: i32) -> ChunkCoord {
        let n = self.size_i32();
        ChunkCoord::new(x.div_euclid(n), y.div_euclid(n), z.div_euclid(n))
    }

    /// Offset of a world position inside its chunk (euclidean modulo).
    #[inline]
    #[must_use]
    pub const fn local_of(self, x: i32, y: i32, z: i32) -> [usize; 3] {
        let n = self.size_i32();
        [
            x.rem_euclid(n) as usize,
            y.rem_euclid(n) as usize,
            z.rem_euclid(n) as usize,
        ]
    }

    /// World position of a chunk's local origin.
    #[inline]
    #[must_use]
    pub const fn origin(self, coord: ChunkCoord) -> [i32; 3] {
        let n = self.size_i32();
        [coord.x * n, coord.y * n, coord.z * n]
    }
}

impl Default for ChunkShape {
    fn default() -> Self {
        Self { size: DEFAULT_CHUNK_SIZE }
    }
}

/// One chunk's voxel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    shape: ChunkShape,
    voxels: Vec<BlockId>,
    solid_count: u32,
}

impl Chunk {
    /// Allocates an all-air chunk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AllocationFailed`] if the buffer cannot be reserved.
    pub fn try_new(coord: ChunkCoord, shape: ChunkShape) -> StoreResult<Self> {
        let volume = shape.volume();
        let mut voxels = Vec::new();
        voxels
            .try_reserve_exact(volume)
            .map_err(|_| StoreError::AllocationFailed { coord, bytes: volume })?;
        voxels.resize(volume, BlockId::AIR);
        Ok(Self {
            coord,
            shape,
            voxels,
            solid_count: 0,
        })
    }

    /// Wraps a raw `N^3` byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the length is not `N^3`.
    pub fn from_bytes(coord: ChunkCoord, shape: ChunkShape, bytes: Vec<u8>) -> StoreResult<Self> {
        if bytes.len() != shape.volume() {
            return Err(StoreError::Corrupt {
                coord,
                expected: shape.volume(),
                actual: bytes.len(),
            });
        }
        let voxels: Vec<BlockId> = bytes.into_iter().map(BlockId).collect();
        let solid_count = voxels.iter().filter(|v| !v.is_air()).count() as u32;
        Ok(Self {
            coord,
            shape,
            voxels,
            solid_count,
        })
    }

    /// Returns the chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Returns the chunk shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> ChunkShape {
        self.shape
    }

    /// Voxel at a local position. Callers guarantee `x, y, z < N`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.voxels[self.shape.index(x, y, z)]
    }

    /// Writes a voxel at a local position, returning the previous value.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockId) -> BlockId {
        let index = self.shape.index(x, y, z);
        let old = std::mem::replace(&mut self.voxels[index], block);
        match (old.is_air(), block.is_air()) {
            (true, false) => self.solid_count += 1,
            (false, true) => self.solid_count -= 1,
            _ => {}
        }
        old
    }

    /// Fills every voxel with one block.
    pub fn fill(&mut self, block: BlockId) {
        self.voxels.fill(block);
        self.solid_count = if block.is_air() { 0 } else { self.shape.volume() as u32 };
    }

    /// Number of non-air voxels.
    #[inline]
    #[must_use]
    pub const fn solid_count(&self) -> u32 {
        self.solid_count
    }

    /// True if the chunk holds only air.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    /// Voxels in buffer order.
    #[inline]
    #[must_use]
    pub fn voxels(&self) -> &[BlockId] {
        &self.voxels
    }

    /// Raw bytes in `y * N^2 + z * N + x` order.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.voxels)
    }

    /// Consumes the chunk, returning the raw buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.voxels.into_iter().map(BlockId::raw).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_rejects_bad_sizes() {
        assert!(ChunkShape::new(0).is_err());
        assert!(ChunkShape::new(257).is_err());
        assert!(ChunkShape::new(1).is_ok());
        assert!(ChunkShape::new(256).is_ok());
    }

    #[test]
    fn test_negative_coordinates() {
        let shape = ChunkShape::default();
        assert_eq!(shape.chunk_of(-1, 0, -32), ChunkCoord::new(-1, 0, -1));
        assert_eq!(shape.chunk_of(-33, 31, 32), ChunkCoord::new(-2, 0, 1));
        assert_eq!(shape.local_of(-1, 0, -32), [31, 0, 0]);
        assert_eq!(shape.local_of(-33, 31, 32), [31, 31, 0]);
    }

    #[test]
    fn test_index_layout() {
        let shape = ChunkShape::new(4).unwrap();
        assert_eq!(shape.index(1, 0, 0), 1);
        assert_eq!(shape.index(0, 0, 1), 4);
        assert_eq!(shape.index(0, 1, 0), 16);
        assert_eq!(shape.index(3, 3, 3), 63);
    }

    #[test]
    fn test_solid_count_tracks_writes() {
        let mut chunk = Chunk::try_new(ChunkCoord::default(), ChunkShape::new(8).unwrap()).unwrap();
        assert!(chunk.is_empty());
        chunk.set(1, 2, 3, BlockId::STONE);
        chunk.set(1, 2, 3, BlockId::DIRT);
        assert_eq!(chunk.solid_count(), 1);
        assert_eq!(chunk.get(1, 2, 3), BlockId::DIRT);
        chunk.set(1, 2, 3, BlockId::AIR);
        assert!(chunk.is_empty());
        chunk.fill(BlockId::STONE);
        assert_eq!(chunk.solid_count(), 512);
    }

    #[test]
    fn test_bytes_round_trip() {
        let shape = ChunkShape::new(4).unwrap();
        let mut chunk = Chunk::try_new(ChunkCoord::new(1, 2, 3), shape).unwrap();
        chunk.set(3, 1, 2, BlockId::GLASS);
        assert_eq!(chunk.as_bytes()[shape.index(3, 1, 2)], BlockId::GLASS.raw());
        let bytes = chunk.clone().into_bytes();
        let restored = Chunk::from_bytes(chunk.coord(), shape, bytes).unwrap();
        assert_eq!(restored, chunk);
        assert!(matches!(
            Chunk::from_bytes(chunk.coord(), shape, vec![0; 5]),
            Err(StoreError::Corrupt { expected: 64, actual: 5, .. })
        ));
    }
}
