//! Tiered hint search.
//!
//! Tiers are tried in priority order and the first match wins. Within a
//! tier, pairs are scanned in ascending `(from, to)` order.
//!
//! 1. **Completing**: the destination would become full and single-colored
//!    after receiving one more token of the source's top color.
//! 2. **Unsticking**: the source tube holds more than one distinct color.
//! 3. **Any legal**: the first legal move.

use serde::{Deserialize, Serialize};

use crate::core::{Board, COLORS_PER_TUBE};
use crate::rules::{can_move, legal_moves, Move};

/// Which tier produced a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintTier {
    Completing,
    Unsticking,
    AnyLegal,
}

/// A suggested move and the reason it was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub mv: Move,
    pub tier: HintTier,
}

/// Find the best hint for `board`, or `None` if no legal move exists.
#[must_use]
pub fn find_hint(board: &Board) -> Option<Hint> {
    let moves = legal_moves(board);

    if let Some(&mv) = moves.iter().find(|mv| completes_tube(board, mv)) {
        return Some(Hint {
            mv,
            tier: HintTier::Completing,
        });
    }

    if let Some(&mv) = moves
        .iter()
        .find(|mv| board.tube(mv.from).is_some_and(|t| t.distinct_colors() > 1))
    {
        return Some(Hint {
            mv,
            tier: HintTier::Unsticking,
        });
    }

    moves.first().map(|&mv| Hint {
        mv,
        tier: HintTier::AnyLegal,
    })
}

/// Would appending the source's top token make the destination complete?
///
/// Only one token is simulated, not the whole run a pour would move.
#[must_use]
pub fn completes_tube(board: &Board, mv: &Move) -> bool {
    if !can_move(board, mv.from, mv.to) {
        return false;
    }
    let (Some(source), Some(dest)) = (board.tube(mv.from), board.tube(mv.to)) else {
        return false;
    };
    let Some(color) = source.top() else {
        return false;
    };
    dest.len() + 1 == COLORS_PER_TUBE && dest.colors().iter().all(|&c| c == color)
}
