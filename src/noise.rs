//! Seeded fractal Brownian motion over Perlin gradient noise.

use crate::error::NoiseError;
use ::noise::{Fbm, MultiFractal, NoiseFn, Perlin};

pub const MAX_OCTAVES: u32 = 16;

pub fn check_octaves(octaves: u32) -> Result<(), NoiseError> {
    if octaves == 0 || octaves > MAX_OCTAVES {
        return Err(NoiseError::InvalidOctaves(octaves));
    }
    Ok(())
}

/// Layered Perlin noise: each octave doubles the frequency and halves the
/// amplitude of the one before. Values vary smoothly and sit in `[-1, 1]`.
#[derive(Clone)]
pub struct NoiseField {
    octaves: u32,
    fbm: Fbm<Perlin>,
}

impl NoiseField {
    pub fn new(octaves: u32, seed: u64) -> Result<Self, NoiseError> {
        check_octaves(octaves)?;
        let fbm = Fbm::<Perlin>::new(fold_seed(seed))
            .set_octaves(octaves as usize)
            .set_frequency(1.0)
            .set_lacunarity(2.0)
            .set_persistence(0.5);
        Ok(Self { octaves, fbm })
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn sample(&self, x: f32, y: f32) -> f32 {
        self.fbm.get([x as f64, y as f64]) as f32
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("octaves", &self.octaves)
            .finish_non_exhaustive()
    }
}

/// Perlin seeds are 32 bits wide; both halves of the u64 contribute.
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octave_range() {
        assert_eq!(NoiseField::new(0, 1).unwrap_err(), NoiseError::InvalidOctaves(0));
        assert_eq!(NoiseField::new(17, 1).unwrap_err(), NoiseError::InvalidOctaves(17));
        assert_eq!(NoiseField::new(16, 1).unwrap().octaves(), 16);
        assert!(check_octaves(8).is_ok());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = NoiseField::new(8, 42).unwrap();
        let b = NoiseField::new(8, 42).unwrap();
        for i in 0..200 {
            let (x, y) = (i as f32 * 0.037, i as f32 * 0.051 + 3.0);
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseField::new(4, 1).unwrap();
        let b = NoiseField::new(4, 2).unwrap();
        let differing = (0..100)
            .filter(|&i| {
                let (x, y) = (i as f32 * 0.13 + 0.5, i as f32 * 0.07 + 0.25);
                a.sample(x, y) != b.sample(x, y)
            })
            .count();
        assert!(differing > 50);
    }

    #[test]
    fn test_high_seed_bits_matter() {
        assert_ne!(fold_seed(1), fold_seed(1 | (1 << 40)));
    }

    #[test]
    fn test_field_is_smooth_and_bounded() {
        let field = NoiseField::new(1, 5).unwrap();
        let mut prev = field.sample(0.0, 0.3);
        for i in 1..1000 {
            let next = field.sample(i as f32 * 0.01, 0.3);
            assert!((-1.0..=1.0).contains(&next));
            assert!((next - prev).abs() < 0.1, "jump at step {}", i);
            prev = next;
        }
    }
}
