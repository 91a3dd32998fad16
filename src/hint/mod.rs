//! Hints: tiered move suggestion and the time-regenerated hint budget.

pub mod budget;
pub mod search;

pub use budget::{hints_earned, HintBudget, HintPolicy};
pub use search::{completes_tube, find_hint, Hint, HintTier};
