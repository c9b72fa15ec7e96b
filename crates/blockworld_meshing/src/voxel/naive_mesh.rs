//! Naive meshing: one quad per visible cube face.

use blockworld_core::registry;
use blockworld_core::{BlockId, Face};

use super::shapes::{emit_cross, emit_custom};
use super::{face_visible, ChunkView, Geometry, FACE_BRIGHTNESS, FACE_CORNERS};
use crate::atlas::UvRect;
use crate::mesh::ChunkMesh;

/// Cube faces within this many blocks of the column top stay lit.
const SURFACE_DEPTH: i32 = 3;
/// Darkening per block below the sky level.
const DARKENING_PER_BLOCK: f32 = 0.015;
/// Darkest factor.
const MIN_DARKENING: f32 = 0.25;

/// Brightness scale for underground cube faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaveDarkening {
    /// World Y at and above which faces are never darkened.
    pub sky_level: i32,
}

impl CaveDarkening {
    /// Factor for a voxel at world `y` in a column whose top solid voxel
    /// is at world `column_top`.
    #[must_use]
    pub fn factor(&self, y: i32, column_top: Option<i32>) -> f32 {
        let Some(top) = column_top else {
            return 1.0;
        };
        if y >= self.sky_level || top - y <= SURFACE_DEPTH {
            return 1.0;
        }
        (1.0 - (self.sky_level - y) as f32 * DARKENING_PER_BLOCK).max(MIN_DARKENING)
    }
}

/// Meshes every block of a chunk cell, visiting voxels in `y, z, x` order.
pub fn mesh_naive(view: &ChunkView<'_>, darkening: Option<CaveDarkening>, mesh: &mut ChunkMesh) {
    let n = view.size();
    let tops = darkening.map(|_| column_tops(view));
    let origin_y = view.origin()[1];

    for y in 0..n {
        for z in 0..n {
            for x in 0..n {
                let block = view.get(x, y, z);
                match Geometry::of(block) {
                    Geometry::Skip => {}
                    Geometry::Cross(tile) => emit_cross(mesh, [x, y, z], tile),
                    Geometry::Custom(shape, tiles) => emit_custom(mesh, view, [x, y, z], shape, &tiles),
                    Geometry::Cube => {
                        let scale = match (darkening, &tops) {
                            (Some(d), Some(tops)) => d.factor(origin_y + y, tops[(z * n + x) as usize]),
                            _ => 1.0,
                        };
                        emit_cube(mesh, view, block, [x, y, z], scale);
                    }
                }
            }
        }
    }
}

/// Emits the cross-shape and sub-box blocks of a chunk cell only.
pub fn mesh_special(view: &ChunkView<'_>, mesh: &mut ChunkMesh) {
    let n = view.size();
    for y in 0..n {
        for z in 0..n {
            for x in 0..n {
                match Geometry::of(view.get(x, y, z)) {
                    Geometry::Cross(tile) => emit_cross(mesh, [x, y, z], tile),
                    Geometry::Custom(shape, tiles) => emit_custom(mesh, view, [x, y, z], shape, &tiles),
                    Geometry::Skip | Geometry::Cube => {}
                }
            }
        }
    }
}

/// World Y of the highest non-air, non-water voxel of each `(x, z)` column
/// of the cell, indexed `[z * N + x]`.
fn column_tops(view: &ChunkView<'_>) -> Vec<Option<i32>> {
    let n = view.size();
    let origin_y = view.origin()[1];
    let mut tops = vec![None; (n * n) as usize];
    for z in 0..n {
        for x in 0..n {
            tops[(z * n + x) as usize] = (0..n).rev().find_map(|y| {
                let block = view.get(x, y, z);
                (!block.is_air() && block != BlockId::WATER).then_some(origin_y + y)
            });
        }
    }
    tops
}

fn emit_cube(mesh: &mut ChunkMesh, view: &ChunkView<'_>, block: BlockId, pos: [i32; 3], scale: f32) {
    let origin = pos.map(|c| c as f32);
    for face in Face::ALL {
        if !face_visible(block, view.neighbour(pos, face)) {
            continue;
        }
        let corners = FACE_CORNERS[face.index()].map(|c| [origin[0] + c[0], origin[1] + c[1], origin[2] + c[2]]);
        mesh.push_quad(
            corners,
            face.normal(),
            UvRect::for_tile(registry::texture_coords(block, face)),
            FACE_BRIGHTNESS[face.index()] * scale,
        );
    }
}
