//! Tree species.
//!
//! Trunks overwrite whatever is in the way; leaves only fill air, so
//! overlapping canopies never eat each other's trunks.

use blockworld_core::{BlockId, StoreResult, VoxelStore};

use super::{put, put_if_air};
use crate::biome::Biome;
use crate::noise::Mulberry32;

/// Tree shapes, chosen per biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Species {
    /// 1x1 trunk, round crown.
    Oak,
    /// Short trunk, wide flat crown.
    Swamp,
    /// Tall forest trees: 2x2 giants or 1x1 with layered crowns.
    Jungle,
}

impl Species {
    /// Species growing in `biome`.
    #[must_use]
    pub const fn for_biome(biome: Biome, rich_trees: bool) -> Self {
        match biome {
            Biome::Swamp => Self::Swamp,
            Biome::Forest if rich_trees => Self::Jungle,
            _ => Self::Oak,
        }
    }
}

/// Grows a tree whose trunk starts at `(x, y, z)`.
pub(crate) fn grow(
    store: &mut VoxelStore,
    rng: &mut Mulberry32,
    species: Species,
    x: i32,
    y: i32,
    z: i32,
) -> StoreResult<()> {
    match species {
        Species::Oak => oak(store, rng, x, y, z),
        Species::Swamp => swamp(store, rng, x, y, z),
        Species::Jungle => {
            if rng.next_f64() < 0.35 {
                giant_jungle(store, rng, x, y, z)
            } else {
                tall_jungle(store, rng, x, y, z)
            }
        }
    }
}

/// Draws an integer in `[min, min + span)`.
fn range(rng: &mut Mulberry32, min: i32, span: i32) -> i32 {
    min + (rng.next_f64() * f64::from(span)) as i32
}

fn trunk(store: &mut VoxelStore, x: i32, y: i32, z: i32, height: i32) -> StoreResult<()> {
    for dy in 0..height {
        put(store, x, y + dy, z, BlockId::LOG)?;
    }
    Ok(())
}

fn oak(store: &mut VoxelStore, rng: &mut Mulberry32, x: i32, y: i32, z: i32) -> StoreResult<()> {
    let height = range(rng, 4, 3);
    trunk(store, x, y, z, height)?;

    let top = y + height - 1;
    for dy in -2..=2 {
        for dz in -2..=2 {
            for dx in -2..=2 {
                if dx * dx + dy * dy + dz * dz <= 2 * 2 + 1 {
                    put_if_air(store, x + dx, top + dy, z + dz, BlockId::LEAVES)?;
                }
            }
        }
    }
    Ok(())
}

fn swamp(store: &mut VoxelStore, rng: &mut Mulberry32, x: i32, y: i32, z: i32) -> StoreResult<()> {
    let height = range(rng, 3, 2);
    trunk(store, x, y, z, height)?;

    let top = y + height - 1;
    for dy in [-1, 0] {
        for dz in -3..=3 {
            for dx in -3..=3 {
                if dx * dx + dz * dz <= 3 * 3 {
                    put_if_air(store, x + dx, top + dy, z + dz, BlockId::LEAVES)?;
                }
            }
        }
    }
    put_if_air(store, x, top + 1, z, BlockId::LEAVES)
}

/// 2x2 trunk with a mushroom crown and vines hanging off the rim.
fn giant_jungle(store: &mut VoxelStore, rng: &mut Mulberry32, x: i32, y: i32, z: i32) -> StoreResult<()> {
    let height = range(rng, 12, 7);
    for (ox, oz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        trunk(store, x + ox, y, z + oz, height)?;
    }

    let top = y + height - 1;
    // The crown is centred between the four trunk columns.
    let dist2 = |dx: i32, dz: i32| {
        let fx = f64::from(dx) - 0.5;
        let fz = f64::from(dz) - 0.5;
        fx * fx + fz * fz
    };

    for dz in -5..=6 {
        for dx in -5..=6 {
            let d2 = dist2(dx, dz);
            if d2 > 25.0 {
                continue;
            }
            put_if_air(store, x + dx, top, z + dz, BlockId::LEAVES)?;
            if d2 <= 9.0 {
                put_if_air(store, x + dx, top + 1, z + dz, BlockId::LEAVES)?;
            }
            if d2 > 16.0 && rng.next_f64() < 0.4 {
                let length = range(rng, 1, 3);
                for hang in 1..=length {
                    put_if_air(store, x + dx, top - hang, z + dz, BlockId::LEAVES)?;
                }
            }
        }
    }
    Ok(())
}

/// 1x1 trunk with a tapering layered crown.
fn tall_jungle(store: &mut VoxelStore, rng: &mut Mulberry32, x: i32, y: i32, z: i32) -> StoreResult<()> {
    let height = range(rng, 8, 7);
    trunk(store, x, y, z, height)?;

    let top = y + height - 1;
    for (dy, radius) in [(-2, 3), (-1, 3), (0, 2), (1, 1)] {
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let d2 = dx * dx + dz * dz;
                if d2 > radius * radius + 1 {
                    continue;
                }
                put_if_air(store, x + dx, top + dy, z + dz, BlockId::LEAVES)?;

                let rim = dy == -2 && d2 > (radius - 1) * (radius - 1) + 1;
                if rim && rng.next_f64() < 0.3 {
                    let length = range(rng, 1, 2);
                    for hang in 1..=length {
                        put_if_air(store, x + dx, top + dy - hang, z + dz, BlockId::LEAVES)?;
                    }
                }
            }
        }
    }
    Ok(())
}
