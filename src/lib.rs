//! # liquid-sort
//!
//! Engine for the liquid-sorting tube puzzle: tubes hold stacked color
//! segments, and the player pours between tubes until every tube is empty or
//! holds a single color.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine manipulates abstract tube state.
//!    Rendering, sound, and storage I/O belong to the host.
//!
//! 2. **One Mutation Path**: Boards change only through `rules::pour`.
//!    Tube push/pop are crate-private.
//!
//! 3. **Explicit Session**: No globals. A `Session` owns level, board, and
//!    hint budget; commands go in, outcome values come out.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Boards use `im-rs` vectors so solver
//!   search and snapshots clone in O(1).
//!
//! - **Deterministic Generation**: Levels are dealt from a seeded ChaCha8
//!   stream with an unbiased shuffle.
//!
//! ## Modules
//!
//! - `core`: Colors, tubes, boards, RNG, configuration, errors
//! - `level`: Difficulty table and level generator
//! - `rules`: Move legality, pouring, win detection
//! - `hint`: Tiered hint search and the regenerating hint budget
//! - `solver`: Optional exhaustive solvability check
//! - `session`: Session state, commands, clock, persistence

pub mod core;
pub mod level;
pub mod rules;
pub mod hint;
pub mod solver;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, Tube, Board, GameRng, EngineConfig, EngineError, Result,
    COLORS_PER_TUBE, MAX_TUBES, MAX_HINTS, HINT_INTERVAL,
};

pub use crate::level::{Difficulty, LevelGenerator};

pub use crate::rules::{can_move, pour, is_won, legal_moves, Move, PourResult};

pub use crate::hint::{find_hint, Hint, HintTier, HintBudget, HintPolicy};

pub use crate::solver::{Solver, SolveOutcome};

pub use crate::session::{
    Session, Status, Command, Outcome,
    Clock, SystemClock, ManualClock, Timestamp,
    PersistenceStore, MemoryStore, SessionRecord,
};
