//! Difficulty tiers derived from the level number.

use serde::{Deserialize, Serialize};

use crate::core::MAX_TUBES;

/// Shape parameters for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Difficulty {
    /// Distinct colors, each filling exactly one tube's worth.
    pub colors: usize,
    /// Tubes that start empty.
    pub empty_tubes: usize,
    /// Shuffle passes over the color pool.
    pub shuffle_passes: usize,
}

impl Difficulty {
    /// Look up the tier for a level. Level 0 is treated as level 1.
    ///
    /// ```
    /// use liquid_sort::level::Difficulty;
    ///
    /// let d = Difficulty::for_level(30);
    /// assert_eq!((d.colors, d.empty_tubes), (5, 2));
    /// ```
    #[must_use]
    pub fn for_level(level: u32) -> Self {
        let (colors, empty_tubes, shuffle_passes) = match level {
            0..=10 => (3, 3, 1),
            11..=25 => (4, 3, 1),
            26..=50 => (5, 2, 2),
            51..=75 => (6, 2, 3),
            _ => (7, 2, 4),
        };
        Self {
            colors,
            empty_tubes,
            shuffle_passes,
        }
    }

    /// Total tubes on the board, capped at [`MAX_TUBES`].
    #[must_use]
    pub fn tube_count(&self) -> usize {
        (self.colors + self.empty_tubes).min(MAX_TUBES)
    }
}
