//! Commands a host sends to a session, and the outcomes it gets back.
//!
//! The host renders, plays sounds, and persists in response to an
//! `Outcome`; the session itself never does any of that.

use serde::{Deserialize, Serialize};

use crate::hint::Hint;
use crate::rules::PourResult;

/// Player or host intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A click or tap on tube `i`: selects it, or pours the current
    /// selection into it.
    Tap(usize),
    /// Select tube `i` if it is non-empty.
    SelectTube(usize),
    /// Pour `from` into `to`, clearing any selection.
    AttemptPour { from: usize, to: usize },
    /// Spend a hint and play the suggested move.
    UseHint,
    /// Add one hint outside the regeneration schedule.
    BonusHint,
    /// Poll hint regeneration against the session clock.
    RegenerateHints,
    /// Deal a fresh board for the current level.
    Restart,
    /// Start the level unlocked by the last win.
    NextLevel,
    TogglePause,
    /// Back to level 1 with a fresh hint budget.
    ResetProgress,
}

/// Result of applying a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Selected(usize),
    /// Tap on an empty or missing tube with nothing selected.
    SelectionIgnored,
    Poured { result: PourResult, won: bool },
    /// Illegal pour. Nothing changed; the host signals a rejection.
    Rejected { from: usize, to: usize },
    HintApplied { hint: Hint, result: PourResult, won: bool },
    HintsExhausted,
    NoLogicalMove,
    BonusGranted { remaining: u32 },
    HintsAtMaximum,
    HintsRegenerated { granted: u32 },
    LevelStarted { level: u32, resumed: bool },
    /// `NextLevel` before the current level is won.
    LevelNotWon,
    /// Gameplay command after the level was won.
    LevelComplete,
    PauseToggled { paused: bool },
    /// Gameplay command while paused.
    Paused,
}

impl Outcome {
    /// True if the board changed.
    #[must_use]
    pub fn board_changed(&self) -> bool {
        matches!(
            self,
            Outcome::Poured { .. } | Outcome::HintApplied { .. } | Outcome::LevelStarted { .. }
        )
    }

    /// True if this outcome completed the level.
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(
            self,
            Outcome::Poured { won: true, .. } | Outcome::HintApplied { won: true, .. }
        )
    }
}
