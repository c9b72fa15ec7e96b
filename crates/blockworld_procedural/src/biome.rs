//! # Biome Classification
//!
//! Maps a climate sample (temperature, moisture, continentalness) to a
//! biome, and blends terrain profiles across neighbouring biomes.
//!
//! Blending averages the numeric profile (base height, height scale, tree
//! chance) over a disk of samples but keeps the materials of the centre
//! sample, so slopes are smooth while surfaces stay discrete.

use blockworld_core::BlockId;

use crate::noise::{Fbm, Mulberry32, SimplexNoise2};

/// Biome types in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Biome {
    /// Grassland.
    Plains = 0,
    /// Sand, cacti, no trees.
    Desert = 1,
    /// Dense trees.
    Forest = 2,
    /// High, rough stone terrain.
    Mountains = 3,
    /// Cold, snow-covered.
    Tundra = 4,
    /// Low, wet, flat.
    Swamp = 5,
    /// Sand strip at the coast.
    Beach = 6,
    /// Shallow sea.
    Ocean = 7,
    /// Deep sea with a gravel floor.
    DeepOcean = 8,
}

/// Per-biome terrain profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeParams {
    /// Top block of a dry column.
    pub surface: BlockId,
    /// The three blocks under the surface.
    pub sub_surface: BlockId,
    /// Terrain height before noise.
    pub base_height: f64,
    /// Multiplier on every height noise term.
    pub height_scale: f64,
    /// Chance per surface column of growing a tree.
    pub tree_chance: f64,
}

impl BiomeParams {
    const fn new(surface: BlockId, sub_surface: BlockId, base_height: f64, height_scale: f64, tree_chance: f64) -> Self {
        Self {
            surface,
            sub_surface,
            base_height,
            height_scale,
            tree_chance,
        }
    }
}

impl Biome {
    /// Every biome.
    pub const ALL: [Self; 9] = [
        Self::Plains,
        Self::Desert,
        Self::Forest,
        Self::Mountains,
        Self::Tundra,
        Self::Swamp,
        Self::Beach,
        Self::Ocean,
        Self::DeepOcean,
    ];

    /// Terrain profile of this biome.
    #[must_use]
    pub const fn params(self) -> BiomeParams {
        match self {
            Self::Plains => BiomeParams::new(BlockId::GRASS, BlockId::DIRT, 82.0, 0.4, 0.005),
            Self::Desert => BiomeParams::new(BlockId::SAND, BlockId::SAND, 82.0, 0.3, 0.0),
            Self::Forest => BiomeParams::new(BlockId::GRASS, BlockId::DIRT, 84.0, 0.6, 0.03),
            Self::Mountains => BiomeParams::new(BlockId::STONE, BlockId::STONE, 90.0, 2.5, 0.002),
            Self::Tundra => BiomeParams::new(BlockId::SNOW, BlockId::DIRT, 82.0, 0.5, 0.002),
            Self::Swamp => BiomeParams::new(BlockId::GRASS, BlockId::DIRT, 79.0, 0.15, 0.02),
            Self::Beach => BiomeParams::new(BlockId::SAND, BlockId::SAND, 78.0, 0.1, 0.0),
            Self::Ocean => BiomeParams::new(BlockId::SAND, BlockId::SAND, 62.0, 0.4, 0.0),
            Self::DeepOcean => BiomeParams::new(BlockId::GRAVEL, BlockId::GRAVEL, 45.0, 0.5, 0.0),
        }
    }

    /// True for the sea biomes.
    #[must_use]
    pub const fn is_ocean(self) -> bool {
        matches!(self, Self::Ocean | Self::DeepOcean)
    }

    /// True for biomes that get water pools and land decorators.
    #[must_use]
    pub const fn is_land(self) -> bool {
        !matches!(self, Self::Ocean | Self::DeepOcean | Self::Beach)
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plains => "plains",
            Self::Desert => "desert",
            Self::Forest => "forest",
            Self::Mountains => "mountains",
            Self::Tundra => "tundra",
            Self::Swamp => "swamp",
            Self::Beach => "beach",
            Self::Ocean => "ocean",
            Self::DeepOcean => "deep_ocean",
        }
    }
}

/// Normalised climate signals, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Climate {
    /// Cold (0) to hot (1).
    pub temperature: f64,
    /// Dry (0) to wet (1).
    pub moisture: f64,
    /// Deep sea (0) to inland (1).
    pub continentalness: f64,
}

/// Picks the biome for one climate sample.
#[must_use]
pub fn classify(climate: Climate) -> Biome {
    let Climate {
        temperature: temp,
        moisture: moist,
        continentalness: cont,
    } = climate;

    if cont < 0.25 {
        Biome::DeepOcean
    } else if cont < 0.38 {
        Biome::Ocean
    } else if cont < 0.42 {
        Biome::Beach
    } else if temp < 0.3 {
        Biome::Tundra
    } else if temp > 0.7 && moist < 0.4 {
        Biome::Desert
    } else if temp > 0.4 && moist > 0.7 {
        Biome::Swamp
    } else if temp > 0.3 && temp < 0.7 && moist > 0.5 {
        Biome::Forest
    } else if temp < 0.5 && moist < 0.5 {
        Biome::Mountains
    } else {
        Biome::Plains
    }
}

/// Result of blending: centre materials, averaged profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendedBiome {
    /// Biome at the centre sample.
    pub biome: Biome,
    /// Surface block of the centre biome.
    pub surface: BlockId,
    /// Sub-surface block of the centre biome.
    pub sub_surface: BlockId,
    /// Weighted mean base height.
    pub base_height: f64,
    /// Weighted mean height scale.
    pub height_scale: f64,
    /// Weighted mean tree chance.
    pub tree_chance: f64,
}

/// Spacing between blend samples, in blocks.
pub const BLEND_SPACING: i32 = 8;
/// Blend disk radius, in samples.
pub const BLEND_RADIUS: i32 = 4;

/// Blends biome profiles around `(x, z)`.
///
/// Samples a radius-4 disk of points 8 blocks apart, each weighted by
/// `1 / (1 + dx^2 + dz^2)` where `dx, dz` count samples from the centre.
pub fn blend(x: i32, z: i32, mut sampler: impl FnMut(i32, i32) -> Climate) -> BlendedBiome {
    let center_biome = classify(sampler(x, z));
    let center = center_biome.params();

    let mut total_weight = 0.0;
    let mut base_height = 0.0;
    let mut height_scale = 0.0;
    let mut tree_chance = 0.0;

    for dz in -BLEND_RADIUS..=BLEND_RADIUS {
        for dx in -BLEND_RADIUS..=BLEND_RADIUS {
            let d2 = dx * dx + dz * dz;
            if d2 > BLEND_RADIUS * BLEND_RADIUS {
                continue;
            }
            let weight = 1.0 / f64::from(1 + d2);
            let params = classify(sampler(x + dx * BLEND_SPACING, z + dz * BLEND_SPACING)).params();
            total_weight += weight;
            base_height += params.base_height * weight;
            height_scale += params.height_scale * weight;
            tree_chance += params.tree_chance * weight;
        }
    }

    BlendedBiome {
        biome: center_biome,
        surface: center.surface,
        sub_surface: center.sub_surface,
        base_height: base_height / total_weight,
        height_scale: height_scale / total_weight,
        tree_chance: tree_chance / total_weight,
    }
}

/// Continentalness used when the continent field is switched off: always
/// inland, so no ocean or beach biomes are classified.
pub const INLAND: f64 = 0.5;

/// Climate noise fields.
#[derive(Clone)]
pub struct ClimateSampler {
    temperature: SimplexNoise2,
    moisture: SimplexNoise2,
    continentalness: SimplexNoise2,
    use_continentalness: bool,
}

impl ClimateSampler {
    const TEMPERATURE: Fbm = Fbm::new(3, 0.5, 2.0, 800.0);
    const MOISTURE: Fbm = Fbm::new(3, 0.5, 2.0, 800.0);
    const CONTINENTALNESS: Fbm = Fbm::new(4, 0.5, 2.0, 600.0);

    /// Builds the three climate fields, in order temperature, moisture,
    /// continentalness.
    #[must_use]
    pub fn new(rng: &mut Mulberry32, use_continentalness: bool) -> Self {
        Self {
            temperature: SimplexNoise2::new(rng),
            moisture: SimplexNoise2::new(rng),
            continentalness: SimplexNoise2::new(rng),
            use_continentalness,
        }
    }

    /// Climate at a world column.
    #[must_use]
    pub fn sample(&self, x: i32, z: i32) -> Climate {
        let (fx, fz) = (f64::from(x), f64::from(z));
        let continentalness = if self.use_continentalness {
            (Self::CONTINENTALNESS.sample(&self.continentalness, fx, fz) + 1.0) / 2.0
        } else {
            INLAND
        };
        Climate {
            temperature: (Self::TEMPERATURE.sample(&self.temperature, fx, fz) + 1.0) / 2.0,
            moisture: (Self::MOISTURE.sample(&self.moisture, fx, fz) + 1.0) / 2.0,
            continentalness,
        }
    }

    /// Blended biome at a world column.
    #[must_use]
    pub fn blended(&self, x: i32, z: i32) -> BlendedBiome {
        blend(x, z, |sx, sz| self.sample(sx, sz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn climate(temperature: f64, moisture: f64, continentalness: f64) -> Climate {
        Climate {
            temperature,
            moisture,
            continentalness,
        }
    }

    #[test]
    fn test_ocean_bands() {
        assert_eq!(classify(climate(0.5, 0.5, 0.1)), Biome::DeepOcean);
        assert_eq!(classify(climate(0.5, 0.5, 0.3)), Biome::Ocean);
        assert_eq!(classify(climate(0.5, 0.5, 0.4)), Biome::Beach);
    }

    #[test]
    fn test_land_biomes() {
        assert_eq!(classify(climate(0.2, 0.9, 0.8)), Biome::Tundra);
        assert_eq!(classify(climate(0.8, 0.2, 0.8)), Biome::Desert);
        assert_eq!(classify(climate(0.8, 0.8, 0.8)), Biome::Swamp);
        assert_eq!(classify(climate(0.5, 0.6, 0.8)), Biome::Forest);
        assert_eq!(classify(climate(0.35, 0.3, 0.8)), Biome::Mountains);
        assert_eq!(classify(climate(0.6, 0.45, 0.8)), Biome::Plains);
        // Hot and moderately dry falls through to plains.
        assert_eq!(classify(climate(0.8, 0.45, 0.8)), Biome::Plains);
    }

    #[test]
    fn test_uniform_blend_is_identity() {
        let blended = blend(0, 0, |_, _| climate(0.5, 0.6, 0.8));
        let forest = Biome::Forest.params();
        assert_eq!(blended.biome, Biome::Forest);
        assert!((blended.base_height - forest.base_height).abs() < 1e-9);
        assert!((blended.height_scale - forest.height_scale).abs() < 1e-9);
        assert!((blended.tree_chance - forest.tree_chance).abs() < 1e-9);
    }

    #[test]
    fn test_blend_keeps_center_materials() {
        // Desert to the east of x = 4, plains elsewhere.
        let blended = blend(0, 0, |x, _| {
            if x > 4 {
                climate(0.8, 0.2, 0.8)
            } else {
                climate(0.6, 0.45, 0.8)
            }
        });
        assert_eq!(blended.biome, Biome::Plains);
        assert_eq!(blended.surface, BlockId::GRASS);
        let plains = Biome::Plains.params();
        let desert = Biome::Desert.params();
        assert!(blended.height_scale < plains.height_scale);
        assert!(blended.height_scale > desert.height_scale);
    }

    #[test]
    fn test_blend_sample_disk() {
        let mut samples = Vec::new();
        blend(100, -100, |x, z| {
            samples.push((x, z));
            climate(0.5, 0.5, 0.5)
        });
        // Centre, then 49 disk points.
        assert_eq!(samples.len(), 50);
        assert!(samples.contains(&(100 + 32, -100)));
        assert!(!samples.contains(&(100 + 32, -100 + 8)));
    }

    #[test]
    fn test_sampler_range() {
        let sampler = ClimateSampler::new(&mut Mulberry32::new(42), true);
        for i in -50..50 {
            let c = sampler.sample(i * 97, i * -61);
            for v in [c.temperature, c.moisture, c.continentalness] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
        let inland = ClimateSampler::new(&mut Mulberry32::new(42), false);
        assert_eq!(inland.sample(5, 5).continentalness, INLAND);
        assert!(inland.blended(5, 5).biome.is_land());
    }
}
