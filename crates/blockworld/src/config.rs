//! # Engine Configuration
//!
//! One TOML document, one section per subsystem. Every key is optional.
//!
//! ```toml
//! seed = "hello world"
//!
//! [store]
//! chunk_size = 32
//!
//! [terrain]
//! sea_level = 80
//! cave_scheme = "layered"
//! decorator_stream = "per_column"
//!
//! [mesh]
//! algorithm = "greedy"
//!
//! [workers]
//! threads = 2
//! queue_capacity = 256
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use blockworld_core::StoreConfig;
use blockworld_meshing::MeshConfig;
use blockworld_procedural::{TerrainConfig, WorkerPoolConfig, WorldSeed};

/// Errors while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// `[workers]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of generation threads.
    pub threads: usize,
    /// Requests that may wait in the queue.
    pub queue_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: 2,
            queue_capacity: 256,
        }
    }
}

impl From<WorkerConfig> for WorkerPoolConfig {
    fn from(config: WorkerConfig) -> Self {
        Self {
            threads: config.threads,
            queue_capacity: config.queue_capacity,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World seed: an integer, or any text to be hashed.
    pub seed: String,
    /// Chunk dimensions.
    pub store: StoreConfig,
    /// Terrain generator.
    pub terrain: TerrainConfig,
    /// Mesher.
    pub mesh: MeshConfig,
    /// Background generation.
    pub workers: WorkerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: "0".to_string(),
            store: StoreConfig::default(),
            terrain: TerrainConfig::default(),
            mesh: MeshConfig::default(),
            workers: WorkerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with another seed.
    #[must_use]
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed documents, [`ConfigError::Invalid`]
    /// for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// As [`Self::from_toml_str`], plus [`ConfigError::Io`] if the file
    /// cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store
            .shape()
            .map_err(|err| ConfigError::Invalid(format!("store.chunk_size: {err}")))?;
        self.terrain
            .validate()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if self.workers.threads == 0 {
            return Err(ConfigError::Invalid("workers.threads must be >= 1".to_string()));
        }
        if self.workers.queue_capacity == 0 {
            return Err(ConfigError::Invalid("workers.queue_capacity must be >= 1".to_string()));
        }
        Ok(())
    }

    /// The parsed world seed.
    #[must_use]
    pub fn world_seed(&self) -> WorldSeed {
        WorldSeed::parse(&self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockworld_meshing::MeshAlgorithm;
    use blockworld_procedural::CaveScheme;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.world_seed(), WorldSeed::new(0));
    }

    #[test]
    fn test_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = "hello"

            [terrain]
            cave_scheme = "none"

            [mesh]
            algorithm = "naive"

            [workers]
            threads = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.world_seed(), WorldSeed::from_text("hello"));
        assert_eq!(config.terrain.cave_scheme, CaveScheme::None);
        assert_eq!(config.terrain.sea_level, 80);
        assert_eq!(config.mesh.algorithm, MeshAlgorithm::Naive);
        assert_eq!(config.workers.threads, 4);
        assert_eq!(config.workers.queue_capacity, 256);
        assert_eq!(config.store.chunk_size, 32);
    }

    #[test]
    fn test_numeric_seed() {
        let config = EngineConfig::with_seed("-17");
        assert_eq!(config.world_seed(), WorldSeed::new(-17));
    }

    #[test]
    fn test_invalid_values() {
        for text in [
            "[store]\nchunk_size = 0",
            "[terrain]\nsea_level = 0",
            "[workers]\nthreads = 0",
            "[workers]\nqueue_capacity = 0",
        ] {
            assert!(
                matches!(EngineConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            EngineConfig::from_toml_str("[workers\nthreads = 2"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[mesh]\nalgorithm = \"marching\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("blockworld-config-that-does-not-exist.toml");
        assert!(matches!(EngineConfig::load(path), Err(ConfigError::Io(_))));
    }
}
