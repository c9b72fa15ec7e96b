//! Mesh output buffers.
//!
//! A [`ChunkMesh`] holds five parallel arrays in chunk-local space. Every
//! quad is four vertices ordered bottom-left, bottom-right, top-left,
//! top-right, and two triangles `(0, 1, 2)` and `(2, 1, 3)` wound outward.

use bytemuck::{Pod, Zeroable};

use crate::atlas::UvRect;

/// Interleaved vertex for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Position in chunk-local space [x, y, z]
    pub position: [f32; 3],
    /// Normal direction [nx, ny, nz]
    pub normal: [f32; 3],
    /// Atlas UV [u, v]
    pub uv: [f32; 2],
    /// Baked brightness, same value in all three channels
    pub color: [f32; 3],
}

/// Geometry for one chunk cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions, 3 floats each.
    pub positions: Vec<f32>,
    /// Vertex normals, 3 floats each.
    pub normals: Vec<f32>,
    /// Atlas UVs, 2 floats each.
    pub uvs: Vec<f32>,
    /// Vertex brightness, 3 equal floats each.
    pub colors: Vec<f32>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Check if mesh is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of quads.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Appends one quad.
    ///
    /// `corners` are in vertex order bottom-left, bottom-right, top-left,
    /// top-right.
    pub fn push_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3], uv: UvRect, brightness: f32) {
        let base = self.vertex_count() as u32;
        for (position, tex) in corners.iter().zip(uv.corners()) {
            self.positions.extend_from_slice(position);
            self.normals.extend_from_slice(&normal);
            self.uvs.extend_from_slice(&tex);
            self.colors.extend_from_slice(&[brightness; 3]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }

    /// Appends another mesh, shifting its indices.
    pub fn append(&mut self, other: &Self) {
        let base = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.colors.extend_from_slice(&other.colors);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Vertices as one interleaved array.
    #[must_use]
    pub fn interleaved(&self) -> Vec<TerrainVertex> {
        (0..self.vertex_count())
            .map(|i| TerrainVertex {
                position: [self.positions[i * 3], self.positions[i * 3 + 1], self.positions[i * 3 + 2]],
                normal: [self.normals[i * 3], self.normals[i * 3 + 1], self.normals[i * 3 + 2]],
                uv: [self.uvs[i * 2], self.uvs[i * 2 + 1]],
                color: [self.colors[i * 3], self.colors[i * 3 + 1], self.colors[i * 3 + 2]],
            })
            .collect()
    }

    /// Index buffer bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Vertex buffer bytes for an interleaved array.
#[must_use]
pub fn vertex_bytes(vertices: &[TerrainVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
