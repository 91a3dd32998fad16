//! Level generation and the difficulty table.

pub mod difficulty;
pub mod generator;

pub use difficulty::Difficulty;
pub use generator::{deal, generate, LevelGenerator};
