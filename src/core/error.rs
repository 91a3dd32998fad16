//! Error types for the puzzle engine.
//!
//! None of these are fatal. Every failure path leaves state untouched and
//! reports back to the caller, which decides how to signal it (shake, sound,
//! notification).

use thiserror::Error;

/// Engine error taxonomy.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The pour `from -> to` is not legal on the current board.
    #[error("illegal move from tube {from} to tube {to}")]
    IllegalMove { from: usize, to: usize },

    /// A hint was requested with an empty budget.
    #[error("no hints remaining")]
    ExhaustedHints,

    /// Hint search found no legal move in any tier.
    #[error("no logical move available")]
    NoLogicalMove,

    /// A bonus hint was requested while the budget is already full.
    #[error("hint budget already at maximum ({0})")]
    HintsAtMaximum(u32),

    /// Push onto a tube that is already at capacity.
    #[error("tube is full")]
    TubeFull,

    /// Pop from an empty tube.
    #[error("tube is empty")]
    TubeEmpty,

    /// A tube was built from more colors than it can hold.
    #[error("tube holds {len} colors, capacity is {capacity}")]
    TubeOverCapacity { len: usize, capacity: usize },

    /// Persisted or externally supplied state failed validation.
    #[error("corrupted state: {0}")]
    CorruptedState(String),

    /// The session is paused and ignores gameplay commands.
    #[error("session is paused")]
    Paused,

    /// The level is solved and waits for the next one to start.
    #[error("level already complete")]
    LevelComplete,

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EngineError::IllegalMove { from: 1, to: 3 };
        assert_eq!(err.to_string(), "illegal move from tube 1 to tube 3");

        let err = EngineError::TubeOverCapacity { len: 5, capacity: 4 };
        assert_eq!(err.to_string(), "tube holds 5 colors, capacity is 4");

        assert_eq!(EngineError::HintsAtMaximum(7).to_string(), "hint budget already at maximum (7)");
    }
}
