//! Error types for dice parsing.

/// Errors that can occur while working with dice.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// The dice specification does not follow the `[count]d<sides>` grammar.
    #[error("invalid dice format: {0}")]
    InvalidDiceFormat(String),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
