//! Surface and underwater decorators.
//!
//! Every column draws from the decorator stream in a fixed order. Plants
//! are placed immediately; trees, boulders and fallen logs are queued and
//! built after the whole column footprint is filled, so they can lean over
//! ground that was generated after them.

use blockworld_core::{BlockId, StoreResult, VoxelStore};

use super::trees::{self, Species};
use super::{put, put_if_air, ColumnSample};
use crate::biome::Biome;
use crate::noise::Mulberry32;

/// Decorations built after the column fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Feature {
    /// A tree rooted at the position.
    Tree {
        /// Root position.
        at: [i32; 3],
        /// Species to grow.
        species: Species,
    },
    /// Mossy cobblestone cluster.
    Boulder {
        /// Base position.
        at: [i32; 3],
    },
    /// Fallen log lying on the ground.
    Log {
        /// First log position.
        at: [i32; 3],
    },
}

/// Dry-land decorators for a column whose surface is at or above sea level.
pub(crate) fn decorate_surface(
    store: &mut VoxelStore,
    rng: &mut Mulberry32,
    features: &mut Vec<Feature>,
    column: &ColumnSample,
    x: i32,
    z: i32,
    rich_trees: bool,
) -> StoreResult<()> {
    let y = column.height + 1;
    if rng.next_f64() < column.tree_chance {
        features.push(Feature::Tree {
            at: [x, y, z],
            species: Species::for_biome(column.biome, rich_trees),
        });
        return Ok(());
    }

    let r = rng.next_f64();
    if column.surface == BlockId::GRASS && r < 0.06 {
        let plant = if r < 0.05 {
            BlockId::TALL_GRASS
        } else if rng.next_f64() < 0.5 {
            BlockId::FLOWER_RED
        } else {
            BlockId::FLOWER_YELLOW
        };
        put_if_air(store, x, y, z, plant)?;
    } else if matches!(column.biome, Biome::Forest | Biome::Plains) && r < 0.005 {
        // Only reached when the blended surface is not grass.
        let feature = if rng.next_f64() < 0.5 {
            Feature::Boulder { at: [x, y, z] }
        } else {
            Feature::Log { at: [x, y, z] }
        };
        features.push(feature);
    } else if column.biome == Biome::Desert && column.surface == BlockId::SAND && r < 0.01 {
        let height = 1 + (rng.next_f64() * 3.0) as i32;
        for dy in 0..height {
            put_if_air(store, x, y + dy, z, BlockId::CACTUS)?;
        }
    }
    Ok(())
}

/// Underwater decorators for a column whose surface is below sea level.
pub(crate) fn decorate_water(
    store: &mut VoxelStore,
    rng: &mut Mulberry32,
    column: &ColumnSample,
    x: i32,
    z: i32,
    sea_level: i32,
) -> StoreResult<()> {
    let depth = sea_level - column.height;
    let r = rng.next_f64();

    if depth > 3 && r < 0.05 {
        let height = 2 + (r * f64::from(depth - 2)) as i32;
        kelp(store, x, column.height + 1, z, height, sea_level)?;
    } else if column.biome == Biome::Swamp && depth > 0 && r < 0.1 {
        put_if_air(store, x, sea_level + 1, z, BlockId::LILY_PAD)?;
    } else if column.biome.is_ocean() && depth > 5 && r < 0.08 {
        let height = 4 + (rng.next_f64() * f64::from(depth - 4)) as i32;
        kelp(store, x, column.height + 1, z, height, sea_level)?;
    }
    Ok(())
}

/// Kelp column replacing water, never reaching the surface cell.
fn kelp(store: &mut VoxelStore, x: i32, bottom: i32, z: i32, height: i32, sea_level: i32) -> StoreResult<()> {
    let top = (bottom + height).min(sea_level);
    for y in bottom..top {
        if store.get_voxel(x, y, z) == BlockId::WATER {
            put(store, x, y, z, BlockId::KELP)?;
        }
    }
    Ok(())
}

/// Builds queued features in queue order.
pub(crate) fn build_features(
    store: &mut VoxelStore,
    rng: &mut Mulberry32,
    features: &[Feature],
) -> StoreResult<usize> {
    let mut trees = 0;
    for feature in features {
        match *feature {
            Feature::Tree { at: [x, y, z], species } => {
                trees::grow(store, rng, species, x, y, z)?;
                trees += 1;
            }
            Feature::Boulder { at: [x, y, z] } => {
                put_if_air(store, x, y, z, BlockId::MOSSY_COBBLESTONE)?;
                if rng.next_f64() < 0.5 {
                    put_if_air(store, x + 1, y, z, BlockId::MOSSY_COBBLESTONE)?;
                }
                if rng.next_f64() < 0.5 {
                    put_if_air(store, x, y + 1, z, BlockId::MOSSY_COBBLESTONE)?;
                }
            }
            Feature::Log { at: [x, y, z] } => {
                let length = 3 + (rng.next_f64() * 2.0) as i32;
                let along_x = rng.next_f64() < 0.5;
                let step = if rng.next_f64() < 0.5 { 1 } else { -1 };
                for i in 0..length {
                    let (lx, lz) = if along_x { (x + i * step, z) } else { (x, z + i * step) };
                    put_if_air(store, lx, y, lz, BlockId::LOG)?;
                }
            }
        }
    }
    Ok(trees)
}
