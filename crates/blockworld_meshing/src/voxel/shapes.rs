//! Cross-shaped plants and sub-box geometry.
//!
//! Sub-boxes are given in sixteenths of a block. Box faces lying on the
//! cell boundary are culled against opaque neighbours; inset faces are
//! always drawn. Every box face shows its whole atlas tile.

use std::f32::consts::FRAC_1_SQRT_2;

use blockworld_core::registry::{CustomShape, FaceTiles, TileCoord};
use blockworld_core::{BlockId, Face};

use super::{ChunkView, FACE_BRIGHTNESS, FACE_CORNERS};
use crate::atlas::UvRect;
use crate::mesh::ChunkMesh;

/// Brightness of cross-shaped plants.
const CROSS_BRIGHTNESS: f32 = 1.0;

/// Axis-aligned box in sixteenths, `min` inclusive to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubBox {
    /// Lower corner.
    pub min: [u8; 3],
    /// Upper corner.
    pub max: [u8; 3],
}

const fn sub(min: [u8; 3], max: [u8; 3]) -> SubBox {
    SubBox { min, max }
}

const FULL: u8 = 16;

const TORCH: [SubBox; 1] = [sub([7, 0, 7], [9, 10, 9])];
const LANTERN: [SubBox; 2] = [sub([5, 0, 5], [11, 7, 11]), sub([6, 7, 6], [10, 9, 10])];
const CACTUS: [SubBox; 1] = [sub([1, 0, 1], [15, 16, 15])];
const DOOR: [SubBox; 1] = [sub([0, 0, 13], [16, 16, 16])];
const LADDER: [SubBox; 1] = [sub([0, 0, 15], [16, 16, 16])];
const SLAB: [SubBox; 1] = [sub([0, 0, 0], [16, 8, 16])];
const STAIRS: [SubBox; 2] = [sub([0, 0, 0], [16, 8, 16]), sub([0, 8, 8], [16, 16, 16])];
const SIGN: [SubBox; 2] = [sub([7, 0, 7], [9, 9, 9]), sub([0, 9, 7], [16, 16, 9])];
const TRAPDOOR: [SubBox; 1] = [sub([0, 0, 0], [16, 3, 16])];
const BED: [SubBox; 1] = [sub([0, 0, 0], [16, 9, 16])];
const LILY_PAD: [SubBox; 1] = [sub([0, 0, 0], [16, 1, 16])];

const FENCE_POST: SubBox = sub([6, 0, 6], [10, 16, 10]);
/// Fence arms toward -X, +X, -Z, +Z.
const FENCE_ARMS: [(Face, SubBox); 4] = [
    (Face::NegX, sub([0, 6, 7], [6, 13, 9])),
    (Face::PosX, sub([10, 6, 7], [16, 13, 9])),
    (Face::NegZ, sub([7, 6, 0], [9, 13, 6])),
    (Face::PosZ, sub([7, 6, 10], [9, 13, 16])),
];

const CHEST: SubBox = sub([1, 0, 1], [15, 14, 15]);
const DOUBLE_CHEST_X: SubBox = sub([1, 0, 1], [31, 14, 15]);
const DOUBLE_CHEST_Z: SubBox = sub([1, 0, 1], [15, 14, 31]);

/// Fixed boxes of a shape; empty for shapes that depend on neighbours.
#[must_use]
pub const fn static_boxes(shape: CustomShape) -> &'static [SubBox] {
    match shape {
        CustomShape::Torch => &TORCH,
        CustomShape::Lantern => &LANTERN,
        CustomShape::Cactus => &CACTUS,
        CustomShape::Door => &DOOR,
        CustomShape::Ladder => &LADDER,
        CustomShape::Slab => &SLAB,
        CustomShape::Stairs => &STAIRS,
        CustomShape::Sign => &SIGN,
        CustomShape::Trapdoor => &TRAPDOOR,
        CustomShape::Bed => &BED,
        CustomShape::LilyPad => &LILY_PAD,
        CustomShape::Fence | CustomShape::Chest => &[],
    }
}

/// Emits two crossed diagonal quads, each in both windings.
pub fn emit_cross(mesh: &mut ChunkMesh, [x, y, z]: [i32; 3], tile: TileCoord) {
    let (x, y, z) = (x as f32, y as f32, z as f32);
    let uv = UvRect::for_tile(tile);

    let diagonal = [[x, y, z], [x + 1.0, y, z + 1.0], [x, y + 1.0, z], [x + 1.0, y + 1.0, z + 1.0]];
    let anti = [[x + 1.0, y, z], [x, y, z + 1.0], [x + 1.0, y + 1.0, z], [x, y + 1.0, z + 1.0]];

    for (quad, normal) in [
        (diagonal, [-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2]),
        (anti, [-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2]),
    ] {
        let [bl, br, tl, tr] = quad;
        mesh.push_quad(quad, normal, uv, CROSS_BRIGHTNESS);
        mesh.push_quad([br, bl, tr, tl], [-normal[0], 0.0, -normal[2]], uv, CROSS_BRIGHTNESS);
    }
}

/// Emits a sub-box block at a local position.
pub fn emit_custom(mesh: &mut ChunkMesh, view: &ChunkView<'_>, pos: [i32; 3], shape: CustomShape, tiles: &FaceTiles) {
    match shape {
        CustomShape::Fence => {
            emit_box(mesh, view, pos, FENCE_POST, tiles);
            for (face, arm) in FENCE_ARMS {
                let neighbour = view.neighbour(pos, face);
                if neighbour == BlockId::FENCE || !neighbour.is_transparent() {
                    emit_box(mesh, view, pos, arm, tiles);
                }
            }
        }
        CustomShape::Chest => match chest_role(view, pos) {
            ChestRole::Single => emit_box(mesh, view, pos, CHEST, tiles),
            ChestRole::PrimaryX => emit_box(mesh, view, pos, DOUBLE_CHEST_X, tiles),
            ChestRole::PrimaryZ => emit_box(mesh, view, pos, DOUBLE_CHEST_Z, tiles),
            ChestRole::Secondary => {}
        },
        _ => {
            for &b in static_boxes(shape) {
                emit_box(mesh, view, pos, b, tiles);
            }
        }
    }
}

/// Emits the six faces of one box.
fn emit_box(mesh: &mut ChunkMesh, view: &ChunkView<'_>, pos: [i32; 3], b: SubBox, tiles: &FaceTiles) {
    let origin = pos.map(|c| c as f32);
    let min = b.min.map(|c| f32::from(c) / 16.0);
    let max = b.max.map(|c| f32::from(c) / 16.0);

    for face in Face::ALL {
        let axis = face.axis();
        let flush = if face.is_positive() { b.max[axis] == FULL } else { b.min[axis] == 0 };
        if flush && !view.neighbour(pos, face).is_transparent() {
            continue;
        }

        let corners = FACE_CORNERS[face.index()].map(|corner| {
            let mut p = [0.0; 3];
            for i in 0..3 {
                p[i] = origin[i] + min[i] + corner[i] * (max[i] - min[i]);
            }
            p
        });
        mesh.push_quad(
            corners,
            face.normal(),
            UvRect::for_tile(tiles.get(face)),
            FACE_BRIGHTNESS[face.index()],
        );
    }
}

/// Part a chest plays in a double chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestRole {
    /// Unpaired.
    Single,
    /// Draws the double chest toward +X.
    PrimaryX,
    /// Draws the double chest toward +Z.
    PrimaryZ,
    /// Covered by its partner; draws nothing.
    Secondary,
}

/// Pairing inside a straight run of chests: the chest at an even position
/// pairs with the next one. `None` if the chest stays unpaired on `axis`.
fn pair_on_axis(view: &ChunkView<'_>, pos: [i32; 3], axis: usize, eligible: impl Fn([i32; 3]) -> bool) -> Option<bool> {
    let step = |p: [i32; 3], delta: i32| {
        let mut q = p;
        q[axis] += delta;
        q
    };
    let is_chest = |p: [i32; 3]| view.contains(p[0], p[1], p[2]) && view.get(p[0], p[1], p[2]) == BlockId::CHEST && eligible(p);

    let mut before = 0;
    let mut p = step(pos, -1);
    while is_chest(p) {
        before += 1;
        p = step(p, -1);
    }

    if before % 2 == 1 {
        Some(false)
    } else if is_chest(step(pos, 1)) {
        Some(true)
    } else {
        None
    }
}

/// Chests pair along X first; chests left unpaired on X then pair along Z.
/// Only chests inside the same chunk cell pair.
#[must_use]
pub fn chest_role(view: &ChunkView<'_>, pos: [i32; 3]) -> ChestRole {
    match pair_on_axis(view, pos, 0, |_| true) {
        Some(true) => return ChestRole::PrimaryX,
        Some(false) => return ChestRole::Secondary,
        None => {}
    }
    let unpaired_on_x = |p: [i32; 3]| pair_on_axis(view, p, 0, |_| true).is_none();
    match pair_on_axis(view, pos, 2, unpaired_on_x) {
        Some(true) => ChestRole::PrimaryZ,
        Some(false) => ChestRole::Secondary,
        None => ChestRole::Single,
    }
}
