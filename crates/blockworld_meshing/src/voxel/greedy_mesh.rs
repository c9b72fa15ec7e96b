//! Greedy meshing.
//!
//! Reduces quad count by merging co-planar visible faces of the same block
//! into maximal rectangles.
//!
//! ## Algorithm
//!
//! 1. For each of the six face directions:
//! 2. Sweep through slices perpendicular to the face normal
//! 3. Build a 2D mask of visible cube faces, keyed by block id
//! 4. Grow each rectangle along `u`, then along `v`, and clear it
//! 5. Emit one quad per rectangle
//!
//! Cross-shape and sub-box blocks never enter the mask; the caller emits
//! them in a separate pass.

use blockworld_core::registry;
use blockworld_core::{BlockId, Face};

use super::{face_visible, ChunkView, Geometry, FACE_BRIGHTNESS, FACE_CORNERS};
use crate::atlas::UvRect;
use crate::mesh::ChunkMesh;

/// Slice axes `(depth, u, v)` for a face.
#[must_use]
pub const fn face_axes(face: Face) -> (usize, usize, usize) {
    match face.axis() {
        0 => (0, 2, 1),
        1 => (1, 0, 2),
        _ => (2, 0, 1),
    }
}

/// Greedy meshing engine.
///
/// Keeps its slice mask between calls; reuse one per thread.
#[derive(Debug, Default)]
pub struct GreedyMesher {
    /// Working mask indexed `[v * N + u]`; air marks an empty cell.
    mask: Vec<BlockId>,
}

impl GreedyMesher {
    /// Creates a mesher with an empty mask.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the merged cube faces of a chunk cell to `mesh`.
    pub fn mesh(&mut self, view: &ChunkView<'_>, mesh: &mut ChunkMesh) {
        let n = view.size() as usize;
        self.mask.clear();
        self.mask.resize(n * n, BlockId::AIR);

        for face in Face::ALL {
            for d in 0..n {
                if self.build_mask(view, face, d) {
                    self.extract(face, d, n, mesh);
                }
            }
        }
    }

    /// Fills the mask for slice `d`. Returns false if nothing is visible.
    fn build_mask(&mut self, view: &ChunkView<'_>, face: Face, d: usize) -> bool {
        let n = view.size() as usize;
        let (d_axis, u_axis, v_axis) = face_axes(face);
        let mut any = false;

        for v in 0..n {
            for u in 0..n {
                let mut pos = [0i32; 3];
                pos[d_axis] = d as i32;
                pos[u_axis] = u as i32;
                pos[v_axis] = v as i32;

                let block = view.get(pos[0], pos[1], pos[2]);
                let visible = Geometry::of(block) == Geometry::Cube && face_visible(block, view.neighbour(pos, face));
                self.mask[v * n + u] = if visible {
                    any = true;
                    block
                } else {
                    BlockId::AIR
                };
            }
        }
        any
    }

    /// Sweeps the mask row by row, emitting and clearing rectangles.
    fn extract(&mut self, face: Face, d: usize, n: usize, mesh: &mut ChunkMesh) {
        for v in 0..n {
            let mut u = 0;
            while u < n {
                let block = self.mask[v * n + u];
                if block.is_air() {
                    u += 1;
                    continue;
                }

                let mut width = 1;
                while u + width < n && self.mask[v * n + u + width] == block {
                    width += 1;
                }

                let mut height = 1;
                'height: while v + height < n {
                    let row = (v + height) * n;
                    for du in 0..width {
                        if self.mask[row + u + du] != block {
                            break 'height;
                        }
                    }
                    height += 1;
                }

                emit_rect(mesh, face, block, [d, u, v], width, height);

                for dv in 0..height {
                    let row = (v + dv) * n;
                    self.mask[row + u..row + u + width].fill(BlockId::AIR);
                }
                u += width;
            }
        }
    }
}

/// Emits a `width x height` rectangle of `face` at slice position `[d, u, v]`.
fn emit_rect(mesh: &mut ChunkMesh, face: Face, block: BlockId, [d, u, v]: [usize; 3], width: usize, height: usize) {
    let (d_axis, u_axis, v_axis) = face_axes(face);
    let corners = FACE_CORNERS[face.index()].map(|c| {
        let mut p = [0.0; 3];
        p[d_axis] = d as f32 + c[d_axis];
        p[u_axis] = u as f32 + c[u_axis] * width as f32;
        p[v_axis] = v as f32 + c[v_axis] * height as f32;
        p
    });
    mesh.push_quad(
        corners,
        face.normal(),
        UvRect::for_tile(registry::texture_coords(block, face)),
        FACE_BRIGHTNESS[face.index()],
    );
}
