//! Bounded random perturbation sources.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A source of bounded uniform noise.
///
/// The generator and the forecast engine draw all of their randomness
/// through this trait, so tests can swap in a seeded [`StdRng`] or
/// [`NoJitter`].
pub trait Jitter {
    /// Returns a value drawn uniformly from `[-amplitude, amplitude]`.
    ///
    /// Non-positive or non-finite amplitudes yield 0.
    fn draw(&mut self, amplitude: f64) -> f64;
}

impl Jitter for StdRng {
    fn draw(&mut self, amplitude: f64) -> f64 {
        if !(amplitude.is_finite() && amplitude > 0.0) {
            return 0.0;
        }
        self.random_range(-amplitude..=amplitude)
    }
}

/// Jitter source that always returns 0, for deterministic runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn draw(&mut self, _amplitude: f64) -> f64 {
        0.0
    }
}

/// Builds the production random source: seeded when `seed` is set, from OS
/// entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_within_amplitude() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = rng.draw(50.0);
            assert!((-50.0..=50.0).contains(&v), "draw {v} out of bounds");
        }
    }

    #[test]
    fn zero_and_invalid_amplitude_yield_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(rng.draw(0.0), 0.0);
        assert_eq!(rng.draw(-3.0), 0.0);
        assert_eq!(rng.draw(f64::NAN), 0.0);
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = rng_from_seed(Some(42));
        let mut b = rng_from_seed(Some(42));
        for _ in 0..32 {
            assert_eq!(a.draw(200.0), b.draw(200.0));
        }
    }

    #[test]
    fn no_jitter_is_silent() {
        assert_eq!(NoJitter.draw(1e9), 0.0);
    }
}
