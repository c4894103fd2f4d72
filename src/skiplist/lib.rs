use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{SKIP_LIST_MAX_LEVEL, SKIP_LIST_P};

/// Draws node heights from a geometric distribution. Every skip list owns
/// one, so a seeded generator makes the list shape reproducible.
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    max_level: usize,
    p: f32,
    rng: StdRng,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new(SKIP_LIST_MAX_LEVEL, SKIP_LIST_P, None)
    }
}

impl LevelGenerator {
    /// `max_level` is clamped into `1..=SKIP_LIST_MAX_LEVEL`. Without a seed
    /// the generator is seeded from the operating system.
    pub fn new(max_level: usize, p: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            max_level: max_level.clamp(1, SKIP_LIST_MAX_LEVEL),
            p,
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SKIP_LIST_MAX_LEVEL, SKIP_LIST_P, Some(seed))
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && self.rng.random::<f32>() < self.p {
            level += 1;
        }
        level
    }
}
