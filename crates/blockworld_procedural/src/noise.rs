//! # Seeds, PRNG and Simplex Noise
//!
//! Deterministic randomness for world generation.
//!
//! ## Determinism Guarantee
//!
//! Every value here is a pure function of the [`WorldSeed`] and its inputs,
//! computed with 32-bit wrapping integer math and IEEE doubles. The same
//! seed yields the same world on every platform and in every thread order.
//!
//! ## Seeding Order
//!
//! Simplex tables are shuffled from one [`Mulberry32`] stream. The order in
//! which noise fields are built from that stream is part of the world
//! format: reordering them changes every world.

/// World seed.
///
/// Seeds are 32-bit signed integers; text seeds are hashed down to one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldSeed(i32);

impl WorldSeed {
    /// Creates a seed from an integer.
    #[inline]
    #[must_use]
    pub const fn new(seed: i32) -> Self {
        Self(seed)
    }

    /// Hashes a text seed: `h = (h << 5) - h + c` over UTF-16 code units,
    /// with 32-bit wraparound.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let hash = text
            .encode_utf16()
            .fold(0i32, |h, c| (h << 5).wrapping_sub(h).wrapping_add(i32::from(c)));
        Self(hash)
    }

    /// Parses user input: an integer if it is one, otherwise hashed text.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        trimmed
            .parse::<i32>()
            .map_or_else(|_| Self::from_text(trimmed), WorldSeed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Seed reinterpreted as PRNG state.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0 as u32
    }
}

impl From<i32> for WorldSeed {
    fn from(seed: i32) -> Self {
        Self(seed)
    }
}

/// Mulberry32 pseudo-random generator.
///
/// 32 bits of state stepped by a fixed odd increment. Output is a double in
/// `[0, 1)` with 32 bits of entropy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Creates a generator.
    #[inline]
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Next uniform double in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Integer hash for cheap per-voxel decisions.
///
/// All arithmetic wraps at 32 bits, so the result is identical everywhere.
#[inline]
#[must_use]
pub const fn hash3(x: i32, y: i32, z: i32) -> u32 {
    let mut h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263))
        .wrapping_add((z as u32).wrapping_mul(1_274_126_177));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

/// 512-entry permutation table (256 shuffled entries, doubled).
#[derive(Clone)]
struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    /// Shuffles the identity permutation with draws from `rng`.
    fn new(rng: &mut Mulberry32) -> Self {
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as u8;
        }
        for i in 0..255 {
            let r = i + (rng.next_f64() * (256 - i) as f64) as usize;
            perm.swap(i, r);
        }
        for i in 0..256 {
            perm[256 + i] = perm[i];
        }
        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> usize {
        usize::from(self.perm[index])
    }
}

const GRAD2: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// 2D simplex noise in `[-1, 1]`.
///
/// # Example
///
/// ```rust
/// use blockworld_procedural::noise::{Mulberry32, SimplexNoise2};
///
/// let mut rng = Mulberry32::new(42);
/// let noise = SimplexNoise2::new(&mut rng);
/// let value = noise.sample(100.5, 200.3);
/// assert!((-1.0..=1.0).contains(&value));
/// ```
#[derive(Clone)]
pub struct SimplexNoise2 {
    table: PermutationTable,
}

impl SimplexNoise2 {
    /// Skewing factor, `(sqrt(3) - 1) / 2`.
    const F2: f64 = 0.366_025_403_784_438_6;
    /// Unskewing factor, `(3 - sqrt(3)) / 6`.
    const G2: f64 = 0.211_324_865_405_187_1;

    /// Builds a noise field, consuming 255 draws from `rng`.
    #[must_use]
    pub fn new(rng: &mut Mulberry32) -> Self {
        Self {
            table: PermutationTable::new(rng),
        }
    }

    /// Samples the field.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);
        let unskew = f64::from(i + j) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };
        let x1 = x0 - as_f64(i1) + Self::G2;
        let y1 = y0 - as_f64(j1) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let p = &self.table;

        let n0 = Self::corner(x0, y0, p.get(ii + p.get(jj)));
        let n1 = Self::corner(x1, y1, p.get(ii + i1 + p.get(jj + j1)));
        let n2 = Self::corner(x2, y2, p.get(ii + 1 + p.get(jj + 1)));

        70.0 * (n0 + n1 + n2)
    }

    #[inline]
    fn corner(x: f64, y: f64, hash: usize) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            return 0.0;
        }
        let g = GRAD2[hash % 12];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y)
    }
}

/// 3D simplex noise in `[-1, 1]`.
#[derive(Clone)]
pub struct SimplexNoise3 {
    table: PermutationTable,
}

impl SimplexNoise3 {
    const F3: f64 = 1.0 / 3.0;
    const G3: f64 = 1.0 / 6.0;

    /// Builds a noise field, consuming 255 draws from `rng`.
    #[must_use]
    pub fn new(rng: &mut Mulberry32) -> Self {
        Self {
            table: PermutationTable::new(rng),
        }
    }

    /// Samples the field.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let skew = (x + y + z) * Self::F3;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);
        let k = fast_floor(z + skew);
        let unskew = f64::from(i + j + k) * Self::G3;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);
        let z0 = z - (f64::from(k) - unskew);

        // Offsets of the second and third simplex corners.
        let ([i1, j1, k1], [i2, j2, k2]) = if x0 >= y0 {
            if y0 >= z0 {
                ([1, 0, 0], [1, 1, 0])
            } else if x0 >= z0 {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if y0 < z0 {
            ([0, 0, 1], [0, 1, 1])
        } else if x0 < z0 {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        let g = Self::G3;
        let corners = [
            (x0, y0, z0),
            (x0 - as_f64(i1) + g, y0 - as_f64(j1) + g, z0 - as_f64(k1) + g),
            (x0 - as_f64(i2) + 2.0 * g, y0 - as_f64(j2) + 2.0 * g, z0 - as_f64(k2) + 2.0 * g),
            (x0 - 1.0 + 3.0 * g, y0 - 1.0 + 3.0 * g, z0 - 1.0 + 3.0 * g),
        ];

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;
        let p = &self.table;
        let hashes = [
            p.get(ii + p.get(jj + p.get(kk))),
            p.get(ii + i1 + p.get(jj + j1 + p.get(kk + k1))),
            p.get(ii + i2 + p.get(jj + j2 + p.get(kk + k2))),
            p.get(ii + 1 + p.get(jj + 1 + p.get(kk + 1))),
        ];

        let mut sum = 0.0;
        for ((cx, cy, cz), hash) in corners.into_iter().zip(hashes) {
            let t = 0.6 - cx * cx - cy * cy - cz * cz;
            if t >= 0.0 {
                let grad = GRAD3[hash % 12];
                let t2 = t * t;
                sum += t2 * t2 * (grad[0] * cx + grad[1] * cy + grad[2] * cz);
            }
        }
        32.0 * sum
    }
}

#[inline]
fn as_f64(offset: usize) -> f64 {
    if offset == 0 {
        0.0
    } else {
        1.0
    }
}

/// Fractional Brownian motion parameters.
///
/// Construction checks the parameters, so invalid constant parameter sets
/// fail to compile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fbm {
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    scale: f64,
}

impl Fbm {
    /// Creates a parameter set.
    ///
    /// # Panics
    ///
    /// Panics if `octaves == 0` or `scale` is not a positive finite number.
    #[must_use]
    pub const fn new(octaves: u32, persistence: f64, lacunarity: f64, scale: f64) -> Self {
        assert!(octaves > 0, "fBm needs at least one octave");
        assert!(scale > 0.0 && scale < f64::INFINITY, "fBm scale must be positive and finite");
        Self {
            octaves,
            persistence,
            lacunarity,
            scale,
        }
    }

    /// Number of octaves.
    #[must_use]
    pub const fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Sums octaves of `noise`, normalised by total amplitude.
    ///
    /// Starts at frequency `1 / scale` and amplitude 1.
    #[must_use]
    pub fn sample(&self, noise: &SimplexNoise2, x: f64, z: f64) -> f64 {
        let mut frequency = 1.0 / self.scale;
        let mut amplitude = 1.0;
        let mut total = 0.0;
        let mut max = 0.0;
        for _ in 0..self.octaves {
            total += noise.sample(x * frequency, z * frequency) * amplitude;
            max += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        total / max
    }
}

/// Floor to `i32`.
#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) {
        xi - 1
    } else {
        xi
    }
}
