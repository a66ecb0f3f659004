//! Configuration for a play session.

use tw_dice::{RngSource, StdSource};

/// Configuration for a play session.
#[derive(Debug, Clone, Default)]
pub struct PlayConfig {
    /// RNG seed for reproducible dice rolls. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl PlayConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the randomness source this configuration describes.
    pub fn random_source(&self) -> StdSource {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_os_rng(),
        }
    }
}
