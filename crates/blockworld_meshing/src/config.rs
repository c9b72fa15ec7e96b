//! Mesher configuration (`[mesh]` section).

use serde::{Deserialize, Serialize};

use crate::voxel::naive_mesh::CaveDarkening;

/// Mesh construction algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshAlgorithm {
    /// One quad per visible face, with cave darkening.
    Naive,
    /// Merged rectangles of visible faces.
    #[default]
    Greedy,
}

/// Mesher settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Mesh construction algorithm.
    pub algorithm: MeshAlgorithm,
    /// Faces at or above this world Y are never darkened.
    pub sky_level: i32,
    /// Darken buried cube faces (naive algorithm only).
    pub cave_darkening: bool,
    /// Chunk builds slower than this are logged as warnings.
    pub slow_mesh_warn_ms: u64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            algorithm: MeshAlgorithm::default(),
            sky_level: 80,
            cave_darkening: true,
            slow_mesh_warn_ms: 10,
        }
    }
}

impl MeshConfig {
    /// Same settings with another algorithm.
    #[must_use]
    pub const fn with_algorithm(self, algorithm: MeshAlgorithm) -> Self {
        Self { algorithm, ..self }
    }

    /// Darkening applied by the naive mesher, if enabled.
    #[must_use]
    pub const fn darkening(&self) -> Option<CaveDarkening> {
        if self.cave_darkening {
            Some(CaveDarkening { sky_level: self.sky_level })
        } else {
            None
        }
    }
}
