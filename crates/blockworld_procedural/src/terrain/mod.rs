//! # Terrain Generator
//!
//! Fills a chunk column of a [`VoxelStore`] from a seed.
//!
//! Generation runs on world columns `(x, *, z)` across the column's N×N
//! footprint, in five passes:
//!
//! 1. Biome and height from blended climate plus shape noise.
//! 2. Column fill: bedrock, stone with ores and caves, sub-surface,
//!    surface, water up to sea level.
//! 3. Surface decorators on dry columns.
//! 4. Underwater decorators on flooded columns.
//! 5. Queued trees, boulders and logs.
//!
//! Every noise field is a pure function of seed and position. Decorator
//! coin flips come from [`DecoratorStream`].

mod caves;
mod decorate;
pub mod trees;

use parking_lot::Mutex;
use tracing::debug;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use blockworld_core::{BlockId, ColumnCoord, StoreResult, VoxelStore, WriteOptions};

use crate::biome::{Biome, ClimateSampler};
use crate::config::{CaveScheme, DecoratorStream, TerrainConfig};
use crate::error::GenerationResult;
use crate::noise::{hash3, Fbm, Mulberry32, SimplexNoise2, SimplexNoise3, WorldSeed};

use caves::CaveNoise;
use decorate::Feature;

/// Offset between the noise seed and the shared decorator stream's seed.
const DECORATOR_SEED_OFFSET: u32 = 0x2545_F491;

/// Mountain surfaces above this Y are snow.
const SNOW_LINE: i32 = 120;

/// Writes a generated voxel.
pub(crate) fn put(store: &mut VoxelStore, x: i32, y: i32, z: i32, block: BlockId) -> StoreResult<()> {
    store.try_set_voxel(x, y, z, block, WriteOptions::GENERATE)?;
    Ok(())
}

/// Writes a generated voxel only where the store holds air.
pub(crate) fn put_if_air(store: &mut VoxelStore, x: i32, y: i32, z: i32, block: BlockId) -> StoreResult<()> {
    if store.get_voxel(x, y, z).is_air() {
        put(store, x, y, z, block)?;
    }
    Ok(())
}

/// Terrain shape at one world column, before any voxel is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSample {
    /// Y of the surface block.
    pub height: i32,
    /// Biome at the column.
    pub biome: Biome,
    /// Top block.
    pub surface: BlockId,
    /// The three blocks under the top.
    pub sub_surface: BlockId,
    /// Per-column tree probability.
    pub tree_chance: f64,
}

/// What [`TerrainGenerator::generate_column`] produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnReport {
    /// The generated column.
    pub column: ColumnCoord,
    /// Chunk edge length N.
    pub size: usize,
    /// Surface heights, indexed `[lz * N + lx]`.
    pub heights: Vec<i32>,
    /// Biomes, indexed like `heights`.
    pub biomes: Vec<Biome>,
    /// Trees grown.
    pub trees: usize,
}

impl ColumnReport {
    /// Surface height at a local position.
    #[must_use]
    pub fn height_at(&self, lx: usize, lz: usize) -> i32 {
        self.heights[lz * self.size + lx]
    }

    /// Biome at a local position.
    #[must_use]
    pub fn biome_at(&self, lx: usize, lz: usize) -> Biome {
        self.biomes[lz * self.size + lx]
    }
}

/// Every noise field, seeded in a fixed order from one stream.
#[derive(Clone)]
struct TerrainNoise {
    climate: ClimateSampler,
    elevation: SimplexNoise2,
    detail: SimplexNoise2,
    erosion: SimplexNoise2,
    ridges: SimplexNoise2,
    pools: SimplexNoise2,
    caves: CaveNoise,
    ores: SimplexNoise3,
}

impl TerrainNoise {
    const ELEVATION: Fbm = Fbm::new(4, 0.5, 2.0, 300.0);
    const DETAIL: Fbm = Fbm::new(3, 0.5, 2.0, 50.0);
    const EROSION: Fbm = Fbm::new(2, 0.5, 2.0, 500.0);
    const RIDGES: Fbm = Fbm::new(3, 0.5, 2.0, 250.0);
    const POOLS: Fbm = Fbm::new(1, 0.5, 2.0, 30.0);

    fn new(seed: WorldSeed, use_continentalness: bool) -> Self {
        let mut rng = Mulberry32::new(seed.as_u32());
        Self {
            climate: ClimateSampler::new(&mut rng, use_continentalness),
            elevation: SimplexNoise2::new(&mut rng),
            detail: SimplexNoise2::new(&mut rng),
            erosion: SimplexNoise2::new(&mut rng),
            ridges: SimplexNoise2::new(&mut rng),
            pools: SimplexNoise2::new(&mut rng),
            caves: CaveNoise::new(&mut rng),
            ores: SimplexNoise3::new(&mut rng),
        }
    }
}

/// Seeded terrain generator.
///
/// Shareable between threads; the only interior state is the optional
/// shared decorator stream.
pub struct TerrainGenerator {
    seed: WorldSeed,
    config: TerrainConfig,
    noise: TerrainNoise,
    global_stream: Mutex<Mulberry32>,
}

impl TerrainGenerator {
    /// Builds every noise field for `seed`.
    ///
    /// `config` is used as given; see [`TerrainConfig::validate`].
    #[must_use]
    pub fn new(seed: WorldSeed, config: TerrainConfig) -> Self {
        Self {
            seed,
            noise: TerrainNoise::new(seed, config.use_continentalness),
            global_stream: Mutex::new(Mulberry32::new(seed.as_u32().wrapping_add(DECORATOR_SEED_OFFSET))),
            config,
        }
    }

    /// World seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Generator settings.
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Biome and surface height at a world column.
    #[must_use]
    pub fn sample_column(&self, x: i32, z: i32) -> ColumnSample {
        let blended = self.noise.climate.blended(x, z);
        let (fx, fz) = (f64::from(x), f64::from(z));
        let scale = blended.height_scale;

        let elevation = TerrainNoise::ELEVATION.sample(&self.noise.elevation, fx, fz);
        let detail = TerrainNoise::DETAIL.sample(&self.noise.detail, fx, fz);

        let mut height = blended.base_height + (elevation + 1.0) / 2.0 * 30.0 * scale;
        if self.config.erosion {
            let erosion = TerrainNoise::EROSION.sample(&self.noise.erosion, fx, fz);
            // Eroded ground flattens small detail; uneroded ground roughens it.
            height += (1.0 - (erosion + 1.0) / 2.0) * detail * 4.0;
        }
        if self.config.ridges {
            let ridge = TerrainNoise::RIDGES.sample(&self.noise.ridges, fx, fz);
            height += ridge.abs() * self.config.ridge_strength * scale;
        }
        height += detail * 3.0 * scale;

        let mut sample = ColumnSample {
            height: (height.floor() as i32).max(1),
            biome: blended.biome,
            surface: blended.surface,
            sub_surface: blended.sub_surface,
            tree_chance: blended.tree_chance,
        };

        let sea = self.config.sea_level;
        if self.config.water_pools
            && sample.biome.is_land()
            && sample.height > sea
            && sample.height <= sea + 4
            && TerrainNoise::POOLS.sample(&self.noise.pools, fx, fz) > 0.6
        {
            sample.height = (sea - 2).max(1);
        }

        if !self.config.use_continentalness
            && matches!(sample.biome, Biome::Plains | Biome::Forest | Biome::Swamp)
            && (sea - 1..=sea + 1).contains(&sample.height)
        {
            let beach = Biome::Beach.params();
            sample.biome = Biome::Beach;
            sample.surface = beach.surface;
            sample.sub_surface = beach.sub_surface;
            sample.tree_chance = beach.tree_chance;
        }
        sample
    }

    /// Generates every chunk of `column` into `store`.
    ///
    /// Chunks of neighbouring columns may be created where trees overhang.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::Store`] if a chunk buffer cannot
    /// be allocated. The store may then hold a partial column; use
    /// [`crate::GeneratedColumn`] to keep a live store untouched.
    pub fn generate_column(&self, store: &mut VoxelStore, column: ColumnCoord) -> GenerationResult<ColumnReport> {
        self.generate(store, column, self.config.cave_scheme)
    }

    /// [`Self::generate_column`] with cave carving switched off.
    ///
    /// # Errors
    ///
    /// As [`Self::generate_column`].
    pub fn generate_column_without_caves(
        &self,
        store: &mut VoxelStore,
        column: ColumnCoord,
    ) -> GenerationResult<ColumnReport> {
        self.generate(store, column, CaveScheme::None)
    }

    fn generate(&self, store: &mut VoxelStore, column: ColumnCoord, scheme: CaveScheme) -> GenerationResult<ColumnReport> {
        let start = Instant::now();
        let n = store.shape().size_i32();
        let (x0, z0) = (column.x * n, column.z * n);

        let mut samples = Vec::with_capacity(store.shape().size() * store.shape().size());
        for lz in 0..n {
            for lx in 0..n {
                let (x, z) = (x0 + lx, z0 + lz);
                let sample = self.sample_column(x, z);
                self.fill_column(store, x, z, &sample, scheme)?;
                samples.push(sample);
            }
        }

        let trees = match self.config.decorator_stream {
            DecoratorStream::PerColumn => {
                let mut rng = Mulberry32::new(hash3(self.seed.value(), column.x, column.z));
                self.decorate(store, &mut rng, &samples, x0, z0, n)?
            }
            DecoratorStream::Global => {
                let mut rng = self.global_stream.lock();
                self.decorate(store, &mut rng, &samples, x0, z0, n)?
            }
        };

        debug!(
            "generated column [{},{}]: {} trees in {:?}",
            column.x,
            column.z,
            trees,
            start.elapsed()
        );

        Ok(ColumnReport {
            column,
            size: store.shape().size(),
            heights: samples.iter().map(|s| s.height).collect(),
            biomes: samples.iter().map(|s| s.biome).collect(),
            trees,
        })
    }

    fn fill_column(
        &self,
        store: &mut VoxelStore,
        x: i32,
        z: i32,
        sample: &ColumnSample,
        scheme: CaveScheme,
    ) -> StoreResult<()> {
        let sea = self.config.sea_level;
        let height = sample.height;
        let mut below = BlockId::AIR;

        for y in 0..=height.max(sea) {
            let block = if y == 0 {
                BlockId::BEDROCK
            } else if y <= height {
                self.solid_block(store, x, y, z, sample, scheme, below)?
            } else {
                if y == height + 1 {
                    self.water_floor(store, x, z, sample)?;
                }
                BlockId::WATER
            };
            put(store, x, y, z, block)?;
            below = block;
        }
        Ok(())
    }

    /// Block at or below the surface, after ores and caves.
    #[allow(clippy::too_many_arguments)]
    fn solid_block(
        &self,
        store: &mut VoxelStore,
        x: i32,
        y: i32,
        z: i32,
        sample: &ColumnSample,
        scheme: CaveScheme,
        below: BlockId,
    ) -> StoreResult<BlockId> {
        let height = sample.height;
        let block = if y == height {
            if sample.biome == Biome::Mountains && y > SNOW_LINE {
                BlockId::SNOW
            } else {
                sample.surface
            }
        } else if y > height - 4 {
            sample.sub_surface
        } else {
            self.ore_or_stone(x, y, z)
        };

        if y > 3 && y < height - 3 && self.noise.caves.is_cave(scheme, &self.config.caves, x, y, z, height) {
            return self.cave_block(store, x, y, z, below);
        }
        Ok(block)
    }

    fn ore_or_stone(&self, x: i32, y: i32, z: i32) -> BlockId {
        if y.unsigned_abs().checked_rem(self.config.ore_stride) != Some(0) {
            return BlockId::STONE;
        }
        let ore = self
            .noise
            .ores
            .sample(f64::from(x) / 15.0, f64::from(y) / 15.0, f64::from(z) / 15.0);
        if ore <= 0.88 {
            return BlockId::STONE;
        }

        let fraction = (ore * 10.0).rem_euclid(1.0);
        if y < 20 && fraction >= 0.5 {
            BlockId::DIAMOND_ORE
        } else if y < 40 && fraction >= 0.3 {
            BlockId::GOLD_ORE
        } else if y < 70 {
            BlockId::IRON_ORE
        } else {
            BlockId::COAL_ORE
        }
    }

    fn cave_block(&self, store: &mut VoxelStore, x: i32, y: i32, z: i32, below: BlockId) -> StoreResult<BlockId> {
        let limits = &self.config.caves;
        if y < limits.lava_level {
            return Ok(BlockId::LAVA);
        }
        if y < limits.lava_band && hash3(x, y, z) % 100 < limits.lava_band_chance {
            return Ok(BlockId::LAVA);
        }
        if below == BlockId::STONE && hash3(x, y - 1, z) % 100 < limits.gravel_floor_chance {
            put(store, x, y - 1, z, BlockId::GRAVEL)?;
        }
        Ok(BlockId::AIR)
    }

    /// Varies the floor under the first water cell.
    fn water_floor(&self, store: &mut VoxelStore, x: i32, z: i32, sample: &ColumnSample) -> StoreResult<()> {
        let floor = match hash3(x, sample.height, z) % 100 {
            0..=9 => BlockId::CLAY,
            10..=14 => BlockId::GRAVEL,
            _ if sample.biome != Biome::Swamp => BlockId::SAND,
            _ => return Ok(()),
        };
        put(store, x, sample.height, z, floor)
    }

    #[allow(clippy::too_many_arguments)]
    fn decorate(
        &self,
        store: &mut VoxelStore,
        rng: &mut Mulberry32,
        samples: &[ColumnSample],
        x0: i32,
        z0: i32,
        n: i32,
    ) -> StoreResult<usize> {
        let sea = self.config.sea_level;
        let mut features: Vec<Feature> = Vec::new();

        for (sample, i) in samples.iter().zip(0..) {
            let (x, z) = (x0 + i % n, z0 + i / n);
            if sample.height >= sea {
                decorate::decorate_surface(store, rng, &mut features, sample, x, z, self.config.rich_trees)?;
            } else {
                decorate::decorate_water(store, rng, sample, x, z, sea)?;
            }
        }

        decorate::build_features(store, rng, &features)
    }
}
