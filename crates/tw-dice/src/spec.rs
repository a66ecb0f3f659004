//! The `[count]d<sides>` dice grammar.

use std::str::FromStr;

use crate::error::{DiceError, DiceResult};
use crate::roll::RollResult;
use crate::source::RandomSource;

/// Largest number of dice a single specification may roll.
pub const MAX_DICE: u32 = 100;

/// A parsed dice specification such as `d6` or `3d8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceSpec {
    /// Number of dice to roll. Between 1 and [`MAX_DICE`].
    pub count: u32,
    /// Number of sides on each die. Always at least 1.
    pub sides: u32,
}

impl DiceSpec {
    /// Create a spec, rejecting zero counts or sides and counts above
    /// [`MAX_DICE`].
    pub fn new(count: u32, sides: u32) -> DiceResult<Self> {
        if count == 0 || count > MAX_DICE || sides == 0 {
            return Err(DiceError::InvalidDiceFormat(format!("{count}d{sides}")));
        }
        Ok(Self { count, sides })
    }

    /// Smallest possible total (every die shows 1).
    pub fn min(&self) -> u64 {
        u64::from(self.count)
    }

    /// Largest possible total (every die shows its highest face).
    pub fn max(&self) -> u64 {
        u64::from(self.count) * u64::from(self.sides)
    }

    /// Roll every die using `rng`.
    pub fn roll(&self, rng: &mut dyn RandomSource) -> RollResult {
        let values = (0..self.count).map(|_| rng.roll_range(self.sides)).collect();
        RollResult { values }
    }
}

impl FromStr for DiceSpec {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DiceError::InvalidDiceFormat(s.to_string());
        let spec = s.trim().to_lowercase();

        let (count, sides) = match spec.strip_prefix('d') {
            Some(sides) => (1, parse_positive(sides).ok_or_else(invalid)?),
            None => {
                let parts: Vec<&str> = spec.split('d').collect();
                if parts.len() != 2 {
                    return Err(invalid());
                }
                let count = parse_positive(parts[0])
                    .filter(|&n| n <= MAX_DICE)
                    .ok_or_else(invalid)?;
                let sides = parse_positive(parts[1]).ok_or_else(invalid)?;
                (count, sides)
            }
        };

        Ok(Self { count, sides })
    }
}

impl std::fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Parse and roll a dice specification, returning the sum of the dice.
pub fn roll_dice(spec: &str, rng: &mut dyn RandomSource) -> DiceResult<u64> {
    let spec: DiceSpec = spec.parse()?;
    Ok(spec.roll(rng).total())
}

/// Digits only, no sign, strictly positive.
fn parse_positive(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&n| n > 0)
}
