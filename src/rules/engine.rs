//! Move engine: legality and pour execution.
//!
//! `pour` is the only operation that mutates a board after generation. It
//! checks legality itself and refuses illegal pairs without touching state,
//! so a caller that skips `can_move` cannot corrupt a board.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Color, EngineError, Result};

/// A pour from one tube to another, by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// What a successful pour did. Callers use it to trigger sound or animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PourResult {
    pub from: usize,
    pub to: usize,
    /// The color that moved.
    pub color: Color,
    /// Number of tokens moved (at least 1).
    pub moved: usize,
}

/// Can the top of tube `from` be poured into tube `to`?
///
/// False for `from == to`, out-of-range indices, an empty source, a full
/// destination, or a non-empty destination whose top differs from the
/// source's top.
#[must_use]
pub fn can_move(board: &Board, from: usize, to: usize) -> bool {
    if from == to {
        return false;
    }
    let (Some(source), Some(dest)) = (board.tube(from), board.tube(to)) else {
        return false;
    };
    let Some(color) = source.top() else {
        return false;
    };
    if dest.is_full() {
        return false;
    }
    match dest.top() {
        Some(top) => top == color,
        None => true,
    }
}

/// Pour the maximal run of equal colors from the top of `from` into `to`,
/// stopping when the run ends or `to` is full.
///
/// Returns `IllegalMove` and leaves the board untouched if
/// `can_move(board, from, to)` does not hold.
pub fn pour(board: &mut Board, from: usize, to: usize) -> Result<PourResult> {
    if !can_move(board, from, to) {
        return Err(EngineError::IllegalMove { from, to });
    }

    let (color, run) = {
        let source = board.tube(from).ok_or(EngineError::IllegalMove { from, to })?;
        let color = source.top().ok_or(EngineError::IllegalMove { from, to })?;
        (color, source.top_run_len())
    };
    let space = board.tube(to).map_or(0, |t| t.space());
    let moved = run.min(space);

    // Both bounds were computed up front, so every pop/push below succeeds
    // and no partially poured board is ever left behind.
    for _ in 0..moved {
        let token = board
            .tube_mut(from)
            .ok_or(EngineError::IllegalMove { from, to })?
            .pop()?;
        board
            .tube_mut(to)
            .ok_or(EngineError::IllegalMove { from, to })?
            .push(token)?;
    }

    Ok(PourResult { from, to, color, moved })
}

/// All legal moves in ascending `(from, to)` order.
#[must_use]
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let n = board.len();
    let mut moves = Vec::new();
    for from in 0..n {
        for to in 0..n {
            if can_move(board, from, to) {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}
