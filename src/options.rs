use crate::error::{Error, Result};
use crate::level::{LevelGenerator, MAX_LEVEL};
use crate::SkipList;

/// Builder for a [`SkipList`] with non-default tower shape or a fixed seed.
///
/// ```
/// use scored_skiplist::SkipListOptions;
///
/// let mut sk = SkipListOptions::new()
///     .max_level(12)
///     .seed(7)
///     .build()
///     .unwrap();
/// sk.add(1, "one");
/// assert_eq!(sk.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SkipListOptions {
    max_level: usize,
    probability: f64,
    seed: Option<u64>,
}

impl Default for SkipListOptions {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            probability: 0.5,
            seed: None,
        }
    }
}

impl SkipListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallest tower a node may get. Must be in `1..=32`.
    pub fn max_level(&mut self, max_level: usize) -> &mut Self {
        self.max_level = max_level;
        self
    }

    /// Chance of promoting a node one more level. Must be in `(0, 1)`.
    pub fn probability(&mut self, p: f64) -> &mut Self {
        self.probability = p;
        self
    }

    /// Seed the height rng, making the layout reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_LEVEL).contains(&self.max_level) {
            return Err(Error::InvalidMaxLevel {
                got: self.max_level,
                max: MAX_LEVEL,
            });
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidProbability(self.probability));
        }
        Ok(())
    }

    pub fn build<V>(&self) -> Result<SkipList<V>> {
        self.validate()?;
        tracing::debug!("build skiplist from options: {:?}", self);
        Ok(SkipList::with_levels(LevelGenerator::new(
            self.max_level,
            self.probability,
            self.seed,
        )))
    }
}
