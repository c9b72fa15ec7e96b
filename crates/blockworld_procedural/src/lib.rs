//! # Blockworld Procedural Generation
//!
//! Deterministic terrain for infinite, reproducible worlds.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same seed produces the same bytes, in any
//!    generation order, when columns are merged with
//!    [`GeneratedColumn::install`] and the default per-column decorator
//!    stream is used
//! 2. **Column-based**: the generator fills one N×N chunk column at a time
//! 3. **Off-thread**: [`GenerationWorkers`] generate into private stores and
//!    hand the chunk buffers back
//!
//! ## Core Components
//!
//! - [`noise`]: seeds, Mulberry32, simplex noise, fBm, `hash3`
//! - [`biome`]: climate classification and blending
//! - [`terrain`]: [`TerrainGenerator`]
//! - [`worker`]: [`GenerationWorkers`]
//!
//! ## Example
//!
//! ```rust
//! use blockworld_core::{BlockId, ColumnCoord, VoxelStore};
//! use blockworld_procedural::{TerrainConfig, TerrainGenerator, WorldSeed};
//!
//! let generator = TerrainGenerator::new(WorldSeed::parse("hello"), TerrainConfig::default());
//! let mut store = VoxelStore::default();
//! generator.generate_column(&mut store, ColumnCoord::new(0, 0)).unwrap();
//! assert_eq!(store.get_voxel(0, 0, 0), BlockId::BEDROCK);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod config;
pub mod error;
pub mod noise;
pub mod terrain;
pub mod worker;

pub use biome::{Biome, BiomeParams, BlendedBiome, Climate, ClimateSampler};
pub use config::{CaveScheme, CaveThresholds, DecoratorStream, TerrainConfig};
pub use error::{GenerationError, GenerationResult};
pub use noise::{hash3, Fbm, Mulberry32, SimplexNoise2, SimplexNoise3, WorldSeed};
pub use terrain::trees::Species;
pub use terrain::{ColumnReport, ColumnSample, TerrainGenerator};
pub use worker::{GeneratedColumn, GenerationWorkers, WorkerPoolConfig, WorkerStats};
