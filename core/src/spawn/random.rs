use rand::Rng;
use rand::rngs::SmallRng;

use super::*;

/// Seedable source used by sessions and tests.
pub type SeededSource = RngSource<SmallRng>;

/// [`TileSource`] backed by any `rand` generator.
#[derive(Clone, Debug, PartialEq)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<SmallRng> {
    /// Deterministic source, the same seed always spawns the same tiles.
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(SmallRng::seed_from_u64(seed))
    }

    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> TileSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            log::warn!("NaN spawn probability, treating as 0");
            return false;
        }
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}
