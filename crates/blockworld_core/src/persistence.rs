//! # Chunk Persistence
//!
//! A persisted chunk is its flat `N^3` byte buffer in `y * N^2 + z * N + x`
//! order, LZ4-compressed with the uncompressed size prepended.
//!
//! Terrain compresses well: stone below, air above, long runs either way.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use tracing::debug;

use crate::chunk::{Chunk, ChunkCoord, ChunkShape};
use crate::error::StoreResult;
use crate::store::VoxelStore;

/// Encodes and decodes chunk buffers of one fixed shape.
#[derive(Debug, Clone, Copy)]
pub struct ChunkCodec {
    shape: ChunkShape,
}

impl ChunkCodec {
    /// Creates a codec for chunks of `shape`.
    #[must_use]
    pub const fn new(shape: ChunkShape) -> Self {
        Self { shape }
    }

    /// Compresses a chunk.
    #[must_use]
    pub fn encode(&self, chunk: &Chunk) -> Vec<u8> {
        compress_prepend_size(chunk.as_bytes())
    }

    /// Decompresses a chunk and checks its length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::Decompress`] for a damaged payload and
    /// [`crate::StoreError::Corrupt`] if the buffer is not `N^3` bytes.
    pub fn decode(&self, coord: ChunkCoord, compressed: &[u8]) -> StoreResult<Chunk> {
        let bytes = decompress_size_prepended(compressed)?;
        Chunk::from_bytes(coord, self.shape, bytes)
    }

    /// File name used for a chunk inside a save directory.
    #[must_use]
    pub fn chunk_path(dir: &Path, coord: ChunkCoord) -> PathBuf {
        dir.join(format!("c.{}.{}.{}.lz4", coord.x, coord.y, coord.z))
    }

    /// Writes a chunk to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn save(&self, chunk: &Chunk, path: &Path) -> StoreResult<()> {
        let compressed = self.encode(chunk);
        let mut file = fs::File::create(path)?;
        file.write_all(&compressed)?;
        debug!(
            "saved chunk {:?}: {} -> {} bytes",
            chunk.coord(),
            self.shape.volume(),
            compressed.len()
        );
        Ok(())
    }

    /// Reads a chunk from `path`.
    ///
    /// # Errors
    ///
    /// Returns error if file operations or decompression fail, or the buffer
    /// has the wrong size.
    pub fn load(&self, path: &Path, coord: ChunkCoord) -> StoreResult<Chunk> {
        let mut file = fs::File::open(path)?;
        let mut compressed = Vec::new();
        file.read_to_end(&mut compressed)?;
        self.decode(coord, &compressed)
    }

    /// Saves every loaded chunk of a store into `dir`, returning the count.
    ///
    /// # Errors
    ///
    /// Returns the first file error encountered.
    pub fn save_store(&self, store: &VoxelStore, dir: &Path) -> StoreResult<usize> {
        fs::create_dir_all(dir)?;
        let mut saved = 0;
        for coord in store.chunk_coords() {
            if let Some(chunk) = store.chunk(coord) {
                self.save(chunk, &Self::chunk_path(dir, coord))?;
                saved += 1;
            }
        }
        Ok(saved)
    }

    /// Loads one chunk from `dir` into a store if its file exists.
    ///
    /// Returns `Ok(false)` when there is no file for `coord`. A loaded
    /// chunk is marked dirty.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or decoded.
    pub fn load_into(&self, store: &mut VoxelStore, dir: &Path, coord: ChunkCoord) -> StoreResult<bool> {
        let path = Self::chunk_path(dir, coord);
        if !path.exists() {
            return Ok(false);
        }
        let chunk = self.load(&path, coord)?;
        store.insert_chunk(chunk);
        store.mark_dirty(coord);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;
    use crate::error::StoreError;

    fn sample_chunk(shape: ChunkShape) -> Chunk {
        let mut chunk = Chunk::try_new(ChunkCoord::new(-2, 1, 7), shape).unwrap();
        for z in 0..shape.size() {
            for x in 0..shape.size() {
                for y in 0..shape.size() / 2 {
                    chunk.set(x, y, z, BlockId::STONE);
                }
            }
        }
        chunk.set(1, 2, 3, BlockId::DIAMOND_ORE);
        chunk
    }

    #[test]
    fn test_chunk_compression() {
        let shape = ChunkShape::default();
        let codec = ChunkCodec::new(shape);
        let chunk = sample_chunk(shape);

        let compressed = codec.encode(&chunk);
        assert!(compressed.len() < shape.volume() / 10, "compressed to {} bytes", compressed.len());

        let loaded = codec.decode(chunk.coord(), &compressed).unwrap();
        assert_eq!(loaded, chunk);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let codec = ChunkCodec::new(ChunkShape::new(16).unwrap());
        let chunk = sample_chunk(ChunkShape::new(8).unwrap());
        let compressed = compress_prepend_size(chunk.as_bytes());
        assert!(matches!(
            codec.decode(chunk.coord(), &compressed),
            Err(StoreError::Corrupt { expected: 4096, actual: 512, .. })
        ));
        assert!(codec.decode(chunk.coord(), &[1, 2]).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let shape = ChunkShape::new(8).unwrap();
        let codec = ChunkCodec::new(shape);
        let dir = std::env::temp_dir().join(format!("blockworld_codec_{}", std::process::id()));

        let mut store = VoxelStore::new(shape);
        store.insert_chunk(sample_chunk(shape));
        assert_eq!(codec.save_store(&store, &dir).unwrap(), 1);

        let mut restored = VoxelStore::new(shape);
        let coord = ChunkCoord::new(-2, 1, 7);
        assert!(codec.load_into(&mut restored, &dir, coord).unwrap());
        assert!(!codec.load_into(&mut restored, &dir, ChunkCoord::new(0, 0, 0)).unwrap());
        assert_eq!(restored.chunk(coord), store.chunk(coord));
        assert!(restored.is_dirty(coord));

        let _ = fs::remove_dir_all(&dir);
    }
}
