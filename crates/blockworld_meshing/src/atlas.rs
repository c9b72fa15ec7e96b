//! Texture atlas UV mapping.
//!
//! The atlas is a 256×256 image of 16×16 tiles. Tile rows count from the
//! top of the image; UV `v` counts from the bottom, hence the flip.

use blockworld_core::registry::TileCoord;

/// Atlas edge length in pixels.
pub const ATLAS_SIZE: f32 = 256.0;
/// Tile edge length in pixels.
pub const TILE_SIZE: f32 = 16.0;

const HALF_PIXEL: f32 = 0.5 / ATLAS_SIZE;

/// UV rectangle of one tile, inset by half a pixel to stop bilinear bleed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Left.
    pub u0: f32,
    /// Right.
    pub u1: f32,
    /// Bottom.
    pub v0: f32,
    /// Top.
    pub v1: f32,
}

impl UvRect {
    /// UVs for a tile.
    #[must_use]
    pub fn for_tile(tile: TileCoord) -> Self {
        let tu = f32::from(tile.u);
        let tv = f32::from(tile.v);
        Self {
            u0: tu * TILE_SIZE / ATLAS_SIZE + HALF_PIXEL,
            u1: (tu + 1.0) * TILE_SIZE / ATLAS_SIZE - HALF_PIXEL,
            v0: 1.0 - (tv + 1.0) * TILE_SIZE / ATLAS_SIZE + HALF_PIXEL,
            v1: 1.0 - tv * TILE_SIZE / ATLAS_SIZE - HALF_PIXEL,
        }
    }

    /// Corner UVs in quad vertex order: bottom-left, bottom-right,
    /// top-left, top-right.
    #[must_use]
    pub const fn corners(&self) -> [[f32; 2]; 4] {
        [[self.u0, self.v0], [self.u1, self.v0], [self.u0, self.v1], [self.u1, self.v1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tile() {
        let uv = UvRect::for_tile(TileCoord::new(0, 0));
        assert!((uv.u0 - 0.5 / 256.0).abs() < 1e-6);
        assert!((uv.u1 - (16.0 / 256.0 - 0.5 / 256.0)).abs() < 1e-6);
        // Row 0 is the top of the image.
        assert!((uv.v1 - (1.0 - 0.5 / 256.0)).abs() < 1e-6);
        assert!((uv.v0 - (1.0 - 16.0 / 256.0 + 0.5 / 256.0)).abs() < 1e-6);
    }

    #[test]
    fn test_uvs_stay_in_unit_square() {
        for u in 0..16 {
            for v in 0..16 {
                let uv = UvRect::for_tile(TileCoord::new(u, v));
                for [s, t] in uv.corners() {
                    assert!((0.0..=1.0).contains(&s));
                    assert!((0.0..=1.0).contains(&t));
                }
                assert!(uv.u0 < uv.u1 && uv.v0 < uv.v1);
            }
        }
    }
}
