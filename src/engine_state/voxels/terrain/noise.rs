//! # Noise Module
//!
//! Seeded 2D value noise and its fractal (multi-octave) sum.
//!
//! Lattice values come from an integer hash of `(x, z, seed)`, so the noise
//! has no tables and no global state: the same inputs always give the same
//! output. Between lattice points values are blended bilinearly with
//! smoothstep easing.

/// Hashes a lattice point into 32 well-mixed bits.
#[inline]
fn hash(x: i32, z: i32, seed: u32) -> u32 {
    let mut h = seed.wrapping_mul(0x9E37_79B9)
        ^ (x as u32).wrapping_mul(0x85EB_CA6B)
        ^ (z as u32).wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    h
}

/// Value at a lattice point, in `[-1, 1]`.
#[inline]
fn lattice_value(x: i32, z: i32, seed: u32) -> f64 {
    hash(x, z, seed) as f64 / u32::MAX as f64 * 2.0 - 1.0
}

#[inline]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Single-octave value noise at `(x, z)`, in `[-1, 1]`.
pub fn value_noise_2d(x: f64, z: f64, seed: u32) -> f64 {
    let x0 = x.floor();
    let z0 = z.floor();
    let tx = smoothstep(x - x0);
    let tz = smoothstep(z - z0);
    let (xi, zi) = (x0 as i32, z0 as i32);

    let v00 = lattice_value(xi, zi, seed);
    let v10 = lattice_value(xi.wrapping_add(1), zi, seed);
    let v01 = lattice_value(xi, zi.wrapping_add(1), seed);
    let v11 = lattice_value(xi.wrapping_add(1), zi.wrapping_add(1), seed);

    lerp(lerp(v00, v10, tx), lerp(v01, v11, tx), tz)
}

/// Fractal sum of value-noise octaves.
///
/// Each octave multiplies frequency by `lacunarity` and amplitude by
/// `persistence`; the sum is divided by the total absolute amplitude so the
/// result stays in `[-1, 1]` for any octave count.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalNoise {
    pub seed: u32,
    pub octaves: u32,
    pub frequency: f64,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl FractalNoise {
    /// Samples the fractal noise at a world position.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut total_amplitude = 0.0;

        for octave in 0..self.octaves {
            let octave_seed = self.seed.wrapping_add(octave.wrapping_mul(0x27D4_EB2F));
            total += value_noise_2d(x * frequency, z * frequency, octave_seed) * amplitude;
            total_amplitude += f64::abs(amplitude);
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        if total_amplitude > 0.0 {
            total / total_amplitude
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_noise_matches_lattice_at_integers() {
        for (x, z) in [(0, 0), (5, -3), (-100, 42)] {
            let sampled = value_noise_2d(x as f64, z as f64, 7);
            assert_eq!(sampled, lattice_value(x, z, 7));
        }
    }

    #[test]
    fn fractal_noise_is_bounded_and_deterministic() {
        let noise = FractalNoise {
            seed: 12345,
            octaves: 6,
            frequency: 0.03,
            persistence: 0.5,
            lacunarity: 2.0,
        };
        let mut rng = fastrand::Rng::with_seed(9);
        for _ in 0..1000 {
            let x = rng.f64() * 4000.0 - 2000.0;
            let z = rng.f64() * 4000.0 - 2000.0;
            let value = noise.sample(x, z);
            assert!((-1.0..=1.0).contains(&value), "{value} out of range");
            assert_eq!(value, noise.sample(x, z));
        }
    }

    #[test]
    fn alternating_amplitudes_stay_bounded() {
        let noise = FractalNoise {
            seed: 5,
            octaves: 3,
            frequency: 0.01,
            persistence: -1.0,
            lacunarity: 2.0,
        };
        let mut rng = fastrand::Rng::with_seed(21);
        for _ in 0..2000 {
            let x = rng.f64() * 4000.0 - 2000.0;
            let z = rng.f64() * 4000.0 - 2000.0;
            let value = noise.sample(x, z);
            assert!((-1.0..=1.0).contains(&value), "{value} out of range");
        }
    }

    #[test]
    fn seeds_change_the_field() {
        let a = value_noise_2d(10.5, 20.25, 1);
        let b = value_noise_2d(10.5, 20.25, 2);
        assert_ne!(a, b);
    }
}
