//! Chunk meshers.
//!
//! - [`naive_mesh`]: one quad per visible cube face, with cave darkening
//! - [`greedy_mesh`]: visible cube faces merged into maximal rectangles
//! - [`shapes`]: cross-shaped plants and sub-box blocks, shared by both
//!
//! Meshers read the store through a [`ChunkView`], so faces on the chunk
//! border are culled against the neighbouring chunk.

pub mod greedy_mesh;
pub mod naive_mesh;
pub mod shapes;

use blockworld_core::registry::{self, BlockKind, CustomShape, FaceTiles, TileCoord};
use blockworld_core::{BlockId, Chunk, ChunkCoord, Face, VoxelStore};

/// Baked brightness per face, in face-index order `[-X, +X, -Y, +Y, -Z, +Z]`.
pub const FACE_BRIGHTNESS: [f32; 6] = [0.8, 0.8, 0.6, 1.0, 0.7, 0.9];

/// Unit-cube corners of each face in quad vertex order (bottom-left,
/// bottom-right, top-left, top-right), wound outward.
pub const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    // -X
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0]],
    // +X
    [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
    // -Y
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0]],
    // +Y
    [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
    // -Z
    [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    // +Z
    [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
];

/// Read access to one chunk cell and its surroundings, in chunk-local
/// coordinates. Positions outside `0..N` read through the store.
pub struct ChunkView<'a> {
    store: &'a VoxelStore,
    chunk: Option<&'a Chunk>,
    coord: ChunkCoord,
    origin: [i32; 3],
    size: i32,
}

impl<'a> ChunkView<'a> {
    /// View of the chunk cell at `coord`.
    #[must_use]
    pub fn new(store: &'a VoxelStore, coord: ChunkCoord) -> Self {
        let shape = store.shape();
        Self {
            store,
            chunk: store.chunk(coord),
            coord,
            origin: shape.origin(coord),
            size: shape.size_i32(),
        }
    }

    /// Chunk coordinate.
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Chunk edge length.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// World position of local `(0, 0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> [i32; 3] {
        self.origin
    }

    /// True if the cell holds nothing to mesh.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunk.map_or(true, Chunk::is_empty)
    }

    /// True if the local position lies inside the cell.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && y >= 0 && z >= 0 && x < self.size && y < self.size && z < self.size
    }

    /// Block at a local position.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        if self.contains(x, y, z) {
            return self
                .chunk
                .map_or(BlockId::AIR, |c| c.get(x as usize, y as usize, z as usize));
        }
        let [ox, oy, oz] = self.origin;
        self.store.get_voxel(ox + x, oy + y, oz + z)
    }

    /// Block next to a local position across `face`.
    #[inline]
    #[must_use]
    pub fn neighbour(&self, [x, y, z]: [i32; 3], face: Face) -> BlockId {
        let [dx, dy, dz] = face.offset();
        self.get(x + dx, y + dy, z + dz)
    }
}

/// How a block is meshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Nothing to draw.
    Skip,
    /// Full cube.
    Cube,
    /// Two crossed quads.
    Cross(TileCoord),
    /// Sub-boxes.
    Custom(CustomShape, FaceTiles),
}

impl Geometry {
    /// Geometry for a block. Unknown ids are drawn as cubes with the
    /// missing-texture tile.
    #[must_use]
    pub fn of(block: BlockId) -> Self {
        if block.is_air() {
            return Self::Skip;
        }
        match registry::descriptor(block).map(|d| d.kind) {
            None | Some(BlockKind::Regular { .. }) => Self::Cube,
            Some(BlockKind::Cross { tile }) => Self::Cross(tile),
            Some(BlockKind::Custom { shape, tiles }) => Self::Custom(shape, tiles),
            Some(BlockKind::Air | BlockKind::Item { .. }) => Self::Skip,
        }
    }
}

/// True if a cube face of `block` is visible against `neighbour`.
///
/// The neighbour must be transparent, and two cells of the same
/// transparent block hide the face between them.
#[inline]
#[must_use]
pub fn face_visible(block: BlockId, neighbour: BlockId) -> bool {
    neighbour.is_transparent() && !(block == neighbour && block.is_transparent())
}
