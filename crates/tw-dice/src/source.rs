//! Sources of randomness for dice rolls.
//!
//! Everything that rolls dice goes through [`RandomSource`], so sessions can
//! be driven by OS entropy, a fixed seed, or a scripted sequence in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces uniformly distributed die faces.
pub trait RandomSource {
    /// Roll a single die, returning a value in `1..=sides`.
    ///
    /// `sides` is always at least 1.
    fn roll_range(&mut self, sides: u32) -> u32;
}

/// The generator used for real play sessions.
pub type StdSource = RngSource<StdRng>;

/// A [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// A deterministic source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from operating system entropy.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn roll_range(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}

/// A [`RandomSource`] that replays a fixed cycle of values.
///
/// Each value is clamped into `1..=sides` of the die being rolled. An empty
/// script always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRolls {
    /// Create a source that yields `values` in order, wrapping around.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of dice rolled so far.
    pub fn rolls_made(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn roll_range(&mut self, sides: u32) -> u32 {
        let value = if self.values.is_empty() {
            1
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        value.clamp(1, sides.max(1))
    }
}
