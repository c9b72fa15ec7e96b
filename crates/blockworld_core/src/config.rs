//! Store configuration section.

use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkShape, DEFAULT_CHUNK_SIZE};
use crate::error::StoreResult;

/// `[store]` section of the engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Chunk edge length `N`.
    pub chunk_size: usize,
}

impl StoreConfig {
    /// Validates the section and returns the chunk shape it describes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::InvalidChunkSize`] for sizes outside `1..=256`.
    pub const fn shape(&self) -> StoreResult<ChunkShape> {
        ChunkShape::new(self.chunk_size)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_section() {
        let config: StoreConfig = toml::from_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.shape().unwrap().size(), 32);
    }

    #[test]
    fn test_invalid_size() {
        let config: StoreConfig = toml::from_str("chunk_size = 0").unwrap();
        assert!(config.shape().is_err());
    }
}
