//! Tubes: bounded stacks of color tokens.
//!
//! A tube holds at most [`COLORS_PER_TUBE`] colors. The top of the stack is
//! the last element. Mutation (`push`/`pop`) is crate-private so that pours
//! through the move engine are the only way a board changes after it is
//! generated.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use super::error::{EngineError, Result};

/// Capacity of every tube.
pub const COLORS_PER_TUBE: usize = 4;

/// A bounded stack of colors.
///
/// SmallVec keeps all four slots inline, so cloning a tube never allocates.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Tube {
    colors: SmallVec<[Color; COLORS_PER_TUBE]>,
}

impl Tube {
    /// Create an empty tube.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tube from colors listed bottom-to-top.
    ///
    /// Fails if more than [`COLORS_PER_TUBE`] colors are given.
    pub fn from_colors(colors: &[Color]) -> Result<Self> {
        if colors.len() > COLORS_PER_TUBE {
            return Err(EngineError::TubeOverCapacity {
                len: colors.len(),
                capacity: COLORS_PER_TUBE,
            });
        }
        Ok(Self {
            colors: SmallVec::from_slice(colors),
        })
    }

    /// Top color, or `None` if the tube is empty.
    #[must_use]
    pub fn top(&self) -> Option<Color> {
        self.colors.last().copied()
    }

    /// Colors from bottom to top.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors in the tube.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.colors.len() >= COLORS_PER_TUBE
    }

    /// Free slots left.
    #[must_use]
    pub fn space(&self) -> usize {
        COLORS_PER_TUBE.saturating_sub(self.colors.len())
    }

    /// True if every color in the tube is the same. Vacuously true when empty.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        match self.colors.first() {
            Some(first) => self.colors.iter().all(|c| c == first),
            None => true,
        }
    }

    /// Full and uniform: a sorted tube.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_full() && self.is_uniform()
    }

    /// Length of the run of equal colors at the top.
    #[must_use]
    pub fn top_run_len(&self) -> usize {
        match self.top() {
            Some(top) => self.colors.iter().rev().take_while(|&&c| c == top).count(),
            None => 0,
        }
    }

    /// Number of distinct colors in the tube.
    #[must_use]
    pub fn distinct_colors(&self) -> usize {
        let mut seen: SmallVec<[Color; COLORS_PER_TUBE]> = SmallVec::new();
        for &c in &self.colors {
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen.len()
    }

    pub(crate) fn push(&mut self, color: Color) -> Result<()> {
        if self.is_full() {
            return Err(EngineError::TubeFull);
        }
        self.colors.push(color);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<Color> {
        self.colors.pop().ok_or(EngineError::TubeEmpty)
    }
}

impl TryFrom<Vec<Color>> for Tube {
    type Error = EngineError;

    fn try_from(colors: Vec<Color>) -> Result<Self> {
        Self::from_colors(&colors)
    }
}

impl From<Tube> for Vec<Color> {
    fn from(tube: Tube) -> Self {
        tube.colors.into_vec()
    }
}
