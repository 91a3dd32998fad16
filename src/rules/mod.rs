//! Puzzle rules: move legality, pouring, and win detection.
//!
//! These are the only functions that decide what a move does. Hints,
//! the solver, and the session all go through them.

pub mod engine;
pub mod win;

pub use engine::{can_move, legal_moves, pour, Move, PourResult};
pub use win::{completed_tubes, is_won};
