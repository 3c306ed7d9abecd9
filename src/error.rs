use thiserror::Error;

/// Conditions that abort a run before any generation is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The rule number has no 8-bit Wolfram encoding.
    #[error("rule number {0} is out of range, expected a value between 0 and 255")]
    InvalidRuleNumber(i64),

    /// The row is too short for the seeded pattern to be meaningful.
    #[error("row size {size} is too small, expected at least {min} cells")]
    InsufficientSize { size: usize, min: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
