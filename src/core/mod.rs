//! Core engine types: colors, tubes, boards, RNG, configuration, errors.
//!
//! Everything here is presentation-agnostic. Renderers read boards through
//! the accessors; only the move engine mutates them.

pub mod color;
pub mod tube;
pub mod board;
pub mod rng;
pub mod config;
pub mod error;

pub use color::Color;
pub use tube::{Tube, COLORS_PER_TUBE};
pub use board::{Board, MAX_TUBES};
pub use rng::GameRng;
pub use config::{EngineConfig, HINT_INTERVAL, MAX_HINTS};
pub use error::{EngineError, Result};
