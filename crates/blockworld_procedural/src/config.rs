//! Terrain generator configuration (`[terrain]` section).

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationResult};

/// Which cave carver runs during column fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaveScheme {
    /// No caves.
    None,
    /// Two fields: thin tunnels or blobby caverns.
    Simple,
    /// Spaghetti tunnels, deep cheese caverns and noodle passages.
    #[default]
    Layered,
}

/// Where decorator coin flips come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoratorStream {
    /// One stream per column, seeded from `hash(seed, cx, cz)`. Columns are
    /// reproducible in any generation order.
    #[default]
    PerColumn,
    /// One sequential stream shared by every column. Results depend on the
    /// order columns are generated in.
    Global,
}

/// Cave carving thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveThresholds {
    /// Simple scheme: `|caves1| <` this carves a tunnel.
    pub simple_tunnel: f64,
    /// Simple scheme: `caves2 >` this carves a cavern.
    pub simple_cavern: f64,
    /// Layered scheme: `|spaghetti1| <` this ...
    pub spaghetti: f64,
    /// ... and `|spaghetti2| <` this carves a tunnel.
    pub spaghetti_width: f64,
    /// Layered scheme: depth-biased cheese value above this carves a cavern.
    pub cheese: f64,
    /// Highest Y where cheese caverns may open.
    pub cheese_max_y: i32,
    /// Layered scheme: `|noodle| <` this carves a passage.
    pub noodle: f64,
    /// Cave cells below this Y are lava.
    pub lava_level: i32,
    /// Cave cells below this Y are lava with `lava_band_chance` percent.
    pub lava_band: i32,
    /// Percent chance of lava inside the band.
    pub lava_band_chance: u32,
    /// Percent chance of a gravel floor under a cave cell.
    pub gravel_floor_chance: u32,
}

impl Default for CaveThresholds {
    fn default() -> Self {
        Self {
            simple_tunnel: 0.05,
            simple_cavern: 0.55,
            spaghetti: 0.05,
            spaghetti_width: 0.25,
            cheese: 0.6,
            cheese_max_y: 55,
            noodle: 0.03,
            lava_level: 10,
            lava_band: 22,
            lava_band_chance: 30,
            gravel_floor_chance: 15,
        }
    }
}

/// Terrain generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Water fills up to and including this Y.
    pub sea_level: i32,
    /// Cave carver.
    pub cave_scheme: CaveScheme,
    /// Cave carver thresholds.
    pub caves: CaveThresholds,
    /// Ores are only tested on every `ore_stride`-th Y.
    pub ore_stride: u32,
    /// Decorator coin-flip source.
    pub decorator_stream: DecoratorStream,
    /// Jungle trees in forests.
    pub rich_trees: bool,
    /// Oceans and beaches from the continentalness field. When off, every
    /// column is inland and beaches come from a sea-level height band.
    pub use_continentalness: bool,
    /// Carve small lakes into land near sea level.
    pub water_pools: bool,
    /// Erosion field flattens or roughens detail.
    pub erosion: bool,
    /// Ridge field adds sharp crests.
    pub ridges: bool,
    /// Height added by a full-strength ridge, before the biome height scale.
    pub ridge_strength: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            sea_level: 80,
            cave_scheme: CaveScheme::default(),
            caves: CaveThresholds::default(),
            ore_stride: 1,
            decorator_stream: DecoratorStream::default(),
            rich_trees: true,
            use_continentalness: true,
            water_pools: true,
            erosion: true,
            ridges: true,
            ridge_strength: 12.0,
        }
    }
}

impl TerrainConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`GenerationError::InvalidConfig`] naming the first invalid value.
    pub fn validate(&self) -> GenerationResult<()> {
        if self.sea_level < 1 {
            return Err(invalid(format!("sea_level must be >= 1, got {}", self.sea_level)));
        }
        if self.ore_stride == 0 {
            return Err(invalid("ore_stride must be >= 1".to_string()));
        }
        if !self.ridge_strength.is_finite() || self.ridge_strength < 0.0 {
            return Err(invalid(format!("ridge_strength must be >= 0, got {}", self.ridge_strength)));
        }
        if self.caves.lava_band_chance > 100 || self.caves.gravel_floor_chance > 100 {
            return Err(invalid("caves chances are percentages (0-100)".to_string()));
        }
        Ok(())
    }

    /// Copy of this configuration with caves switched off.
    #[must_use]
    pub fn without_caves(&self) -> Self {
        Self {
            cave_scheme: CaveScheme::None,
            ..self.clone()
        }
    }
}

fn invalid(reason: String) -> GenerationError {
    GenerationError::InvalidConfig { reason }
}
