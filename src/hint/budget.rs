//! Hint budget and time-based regeneration.
//!
//! The budget is a bounded counter. Hosts poll [`HintBudget::regenerate`]
//! on level load, on a timer, and on resume; the engine never schedules
//! anything itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, Result};
use crate::session::clock::Timestamp;

/// Limits that govern the budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintPolicy {
    pub max_hints: u32,
    pub interval: Duration,
}

impl HintPolicy {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_hints: config.max_hints,
            interval: config.hint_interval,
        }
    }
}

/// Whole intervals contained in `elapsed`. Zero for a zero interval.
#[must_use]
pub fn hints_earned(elapsed: Duration, interval: Duration) -> u32 {
    if interval.is_zero() {
        return 0;
    }
    let earned = elapsed.as_millis() / interval.as_millis().max(1);
    u32::try_from(earned).unwrap_or(u32::MAX)
}

/// Remaining hints and the time of the last regeneration grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintBudget {
    remaining: u32,
    last_grant: Option<Timestamp>,
}

impl HintBudget {
    #[must_use]
    pub fn new(remaining: u32, last_grant: Option<Timestamp>) -> Self {
        Self {
            remaining,
            last_grant,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn last_grant(&self) -> Option<Timestamp> {
        self.last_grant
    }

    /// Spend one hint.
    pub fn consume(&mut self) -> Result<()> {
        if self.remaining == 0 {
            return Err(EngineError::ExhaustedHints);
        }
        self.remaining -= 1;
        Ok(())
    }

    /// Add one hint outside the regeneration schedule.
    pub fn grant_bonus(&mut self, policy: &HintPolicy) -> Result<()> {
        if self.remaining >= policy.max_hints {
            return Err(EngineError::HintsAtMaximum(policy.max_hints));
        }
        self.remaining += 1;
        Ok(())
    }

    /// Raise the budget to at least `floor`, capped at the maximum.
    pub fn raise_to(&mut self, floor: u32, policy: &HintPolicy) {
        self.remaining = self.remaining.max(floor.min(policy.max_hints));
    }

    /// Clamp to the policy's maximum, e.g. after restoring a record.
    pub fn clamp(&mut self, policy: &HintPolicy) {
        self.remaining = self.remaining.min(policy.max_hints);
    }

    /// Grant hints for whole intervals elapsed since the last grant.
    ///
    /// - No previous grant: start the clock at `now`, grant nothing.
    /// - Budget already full, or less than one interval elapsed: no change.
    /// - Otherwise add `floor(elapsed / interval)` capped at the maximum, and
    ///   move the grant time to `now`. Leftover partial progress is dropped.
    ///
    /// Returns the number of hints actually added. Calling it again with the
    /// same `now` changes nothing.
    pub fn regenerate(&mut self, now: Timestamp, policy: &HintPolicy) -> u32 {
        let Some(last) = self.last_grant else {
            self.last_grant = Some(now);
            return 0;
        };
        if self.remaining >= policy.max_hints {
            return 0;
        }

        let earned = hints_earned(now.saturating_since(last), policy.interval);
        if earned == 0 {
            return 0;
        }

        let before = self.remaining;
        self.remaining = self.remaining.saturating_add(earned).min(policy.max_hints);
        self.last_grant = Some(now);
        self.remaining - before
    }
}
