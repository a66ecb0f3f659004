//! Dice notation and randomness for the Taleweaver story player.
//!
//! Parses compact dice specifications such as `d6` or `2d6`, rolls them
//! against an injectable [`RandomSource`], and reports the individual die
//! values alongside their sum.

pub mod error;
pub mod roll;
pub mod source;
pub mod spec;

pub use error::{DiceError, DiceResult};
pub use roll::RollResult;
pub use source::{RandomSource, RngSource, ScriptedRolls, StdSource};
pub use spec::{DiceSpec, MAX_DICE, roll_dice};
