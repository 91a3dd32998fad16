//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Default cap on the hint budget.
pub const MAX_HINTS: u32 = 7;

/// Default time needed to regenerate one hint.
pub const HINT_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on `hints_remaining`.
    pub max_hints: u32,

    /// Elapsed time that earns one hint.
    pub hint_interval: Duration,

    /// Budget given to a fresh session. Every level start also raises the
    /// budget to at least this value (never lowers it).
    pub starting_hints: u32,

    /// Run the solver on generated boards and reject unsolvable ones.
    /// Off by default: generation stays a single shuffle.
    pub verify_solvable: bool,

    /// Maximum distinct states the solver visits before giving up.
    pub solver_node_limit: usize,

    /// Candidates tried per level when `verify_solvable` is set.
    pub max_generation_attempts: u32,

    /// Seed for level generation. Same seed produces the same boards.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_hints: MAX_HINTS,
            hint_interval: HINT_INTERVAL,
            starting_hints: 3,
            verify_solvable: false,
            solver_node_limit: 200_000,
            max_generation_attempts: 32,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom hint cap.
    #[must_use]
    pub fn with_max_hints(mut self, max: u32) -> Self {
        self.max_hints = max;
        self
    }

    /// Create a new config with custom regeneration interval.
    #[must_use]
    pub fn with_hint_interval(mut self, interval: Duration) -> Self {
        self.hint_interval = interval;
        self
    }

    /// Create a new config with custom starting hint budget.
    #[must_use]
    pub fn with_starting_hints(mut self, hints: u32) -> Self {
        self.starting_hints = hints;
        self
    }

    /// Enable or disable the solvability gate.
    #[must_use]
    pub fn with_verify_solvable(mut self, verify: bool) -> Self {
        self.verify_solvable = verify;
        self
    }

    /// Create a new config with custom solver node limit.
    #[must_use]
    pub fn with_solver_node_limit(mut self, limit: usize) -> Self {
        self.solver_node_limit = limit;
        self
    }

    /// Check that the values are usable together.
    pub fn validate(&self) -> Result<()> {
        if self.hint_interval.is_zero() {
            return Err(EngineError::InvalidConfig("hint_interval must be non-zero".into()));
        }
        if self.starting_hints > self.max_hints {
            return Err(EngineError::InvalidConfig(format!(
                "starting_hints ({}) exceeds max_hints ({})",
                self.starting_hints, self.max_hints
            )));
        }
        if self.verify_solvable && self.max_generation_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "max_generation_attempts must be positive when verify_solvable is set".into(),
            ));
        }
        Ok(())
    }
}
