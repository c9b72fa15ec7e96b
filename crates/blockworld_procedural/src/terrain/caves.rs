//! Cave carving fields.

use crate::config::{CaveScheme, CaveThresholds};
use crate::noise::{Mulberry32, SimplexNoise3};

/// The 3D fields behind both cave schemes.
///
/// Both schemes' fields are always built so switching schemes never shifts
/// the seeding of later fields.
#[derive(Clone)]
pub(crate) struct CaveNoise {
    tunnels: SimplexNoise3,
    caverns: SimplexNoise3,
    spaghetti_a: SimplexNoise3,
    spaghetti_b: SimplexNoise3,
    cheese: SimplexNoise3,
    noodle: SimplexNoise3,
}

impl CaveNoise {
    pub(crate) fn new(rng: &mut Mulberry32) -> Self {
        Self {
            tunnels: SimplexNoise3::new(rng),
            caverns: SimplexNoise3::new(rng),
            spaghetti_a: SimplexNoise3::new(rng),
            spaghetti_b: SimplexNoise3::new(rng),
            cheese: SimplexNoise3::new(rng),
            noodle: SimplexNoise3::new(rng),
        }
    }

    /// True if `(x, y, z)` is hollow. `height` is the column's terrain height.
    ///
    /// Callers only ask inside the carvable band `3 < y < height - 3`.
    pub(crate) fn is_cave(
        &self,
        scheme: CaveScheme,
        limits: &CaveThresholds,
        x: i32,
        y: i32,
        z: i32,
        height: i32,
    ) -> bool {
        let (fx, fy, fz) = (f64::from(x), f64::from(y), f64::from(z));
        match scheme {
            CaveScheme::None => false,
            CaveScheme::Simple => {
                self.tunnels.sample(fx / 40.0, fy / 40.0, fz / 40.0).abs() < limits.simple_tunnel
                    || self.caverns.sample(fx / 25.0, fy / 25.0, fz / 25.0) > limits.simple_cavern
            }
            CaveScheme::Layered => {
                let spaghetti = self.spaghetti_a.sample(fx / 40.0, fy / 40.0, fz / 40.0).abs() < limits.spaghetti
                    && self.spaghetti_b.sample(fx / 40.0, fy / 40.0, fz / 40.0).abs() < limits.spaghetti_width;
                if spaghetti {
                    return true;
                }

                if y < limits.cheese_max_y && y < height - 12 {
                    let depth_bias = f64::from(limits.cheese_max_y - y) / f64::from(limits.cheese_max_y) * 0.2;
                    if self.cheese.sample(fx / 60.0, fy / 30.0, fz / 60.0) + depth_bias > limits.cheese {
                        return true;
                    }
                }

                y < height - 8 && self.noodle.sample(fx / 20.0, fy / 20.0, fz / 20.0).abs() < limits.noodle
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cave_fraction(scheme: CaveScheme) -> f64 {
        let caves = CaveNoise::new(&mut Mulberry32::new(42));
        let limits = CaveThresholds::default();
        let mut hollow = 0;
        let mut total = 0;
        for x in (0..256).step_by(3) {
            for z in (0..256).step_by(3) {
                for y in (4..60).step_by(2) {
                    total += 1;
                    if caves.is_cave(scheme, &limits, x, y, z, 90) {
                        hollow += 1;
                    }
                }
            }
        }
        f64::from(hollow) / f64::from(total)
    }

    #[test]
    fn test_no_caves() {
        assert!(cave_fraction(CaveScheme::None) == 0.0);
    }

    #[test]
    fn test_caves_are_sparse() {
        for scheme in [CaveScheme::Simple, CaveScheme::Layered] {
            let fraction = cave_fraction(scheme);
            assert!(fraction > 0.001, "{scheme:?} carved nothing");
            assert!(fraction < 0.4, "{scheme:?} carved {fraction}");
        }
    }
}
