use rand::prelude::*;
use rand::rngs::StdRng;

/// Hard ceiling on node height, and the height of the sentinel head.
pub const MAX_LEVEL: usize = 32;

/// Draws node heights from a geometric distribution.
///
/// Each generator owns its rng, so two lists never share height state and a
/// list built from a fixed seed always lays out the same towers.
pub(crate) struct LevelGenerator {
    max_level: usize,
    p: f64,
    rng: StdRng,
}

impl LevelGenerator {
    pub(crate) fn new(max_level: usize, p: f64, seed: Option<u64>) -> Self {
        debug_assert!((1..=MAX_LEVEL).contains(&max_level));
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { max_level, p, rng }
    }

    /// Returns a height in `[1, max_level]`, with P(h = k) = (1 - p) * p^(k - 1)
    /// below the ceiling.
    pub(crate) fn random_level(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_level && self.rng.gen_bool(self.p) {
            height += 1;
        }
        height
    }

    pub(crate) fn max_level(&self) -> usize {
        self.max_level
    }
}
