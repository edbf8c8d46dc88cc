//! Randomness source for all procedural generation.
//!
//! Every generator draws through [`GeometryRng`] rather than an ambient
//! source, so tests can pin a seed and get reproducible geometry while
//! production stays non-deterministic.

/// Thin wrapper around `fastrand::Rng` with the handful of draw shapes the
/// generators actually use.
pub struct GeometryRng {
    inner: fastrand::Rng,
}

impl GeometryRng {
    /// Entropy-seeded source for production use.
    pub fn from_entropy() -> Self {
        Self {
            inner: fastrand::Rng::new(),
        }
    }

    /// Fixed-seed source for reproducible generation in tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.f64()
    }

    /// Uniform draw in `[base, base + spread)`.
    pub fn jitter(&mut self, base: f64, spread: f64) -> f64 {
        base + self.unit() * spread
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform index in `[0, n)`.
    pub fn below(&mut self, n: usize) -> usize {
        self.inner.usize(..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_replay_identically() {
        let mut a = GeometryRng::seeded(7);
        let mut b = GeometryRng::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.unit(), b.unit());
            assert_eq!(a.below(13), b.below(13));
        }
    }

    #[test]
    fn unit_stays_in_half_open_range() {
        let mut rng = GeometryRng::seeded(42);
        for _ in 0..1000 {
            let v = rng.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
