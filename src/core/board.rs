//! Board: the ordered set of tubes making up one level's puzzle state.
//!
//! Uses `im::Vector` so that cloning a board (solver search, hint
//! simulation, session snapshots) shares structure instead of copying.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{EngineError, Result};
use super::tube::{Tube, COLORS_PER_TUBE};

/// Maximum number of tubes on a board.
pub const MAX_TUBES: usize = 15;

/// An ordered sequence of tubes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    tubes: Vector<Tube>,
}

impl Board {
    /// Create a board from tubes in index order.
    pub fn new(tubes: impl IntoIterator<Item = Tube>) -> Self {
        Self {
            tubes: tubes.into_iter().collect(),
        }
    }

    /// Build a board from raw palette indices, one row per tube, bottom-to-top.
    ///
    /// ```
    /// use liquid_sort::core::Board;
    ///
    /// let board = Board::from_rows(&[&[0, 1], &[0], &[]]).unwrap();
    /// assert_eq!(board.len(), 3);
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let tubes = rows
            .iter()
            .map(|row| {
                let colors: Vec<Color> = row.iter().copied().map(Color).collect();
                Tube::from_colors(&colors)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(tubes))
    }

    /// Raw palette indices per tube, bottom-to-top.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.tubes
            .iter()
            .map(|t| t.colors().iter().map(|c| c.0).collect())
            .collect()
    }

    /// Number of tubes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tubes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tubes.is_empty()
    }

    /// Get a tube by index.
    #[must_use]
    pub fn tube(&self, index: usize) -> Option<&Tube> {
        self.tubes.get(index)
    }

    /// Iterate over tubes in index order.
    pub fn tubes(&self) -> impl Iterator<Item = &Tube> {
        self.tubes.iter()
    }

    pub(crate) fn tube_mut(&mut self, index: usize) -> Option<&mut Tube> {
        self.tubes.get_mut(index)
    }

    /// Total number of color tokens on the board.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tubes.iter().map(Tube::len).sum()
    }

    /// Count of each color across all tubes.
    #[must_use]
    pub fn color_counts(&self) -> FxHashMap<Color, usize> {
        let mut counts = FxHashMap::default();
        for tube in &self.tubes {
            for &c in tube.colors() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Verify the board has the shape of a level with `colors` distinct colors
    /// spread over `tube_count` tubes.
    ///
    /// Checks tube count, and that each of the colors `0..colors` appears
    /// exactly [`COLORS_PER_TUBE`] times with nothing else present. Tube
    /// capacity is enforced by `Tube` itself.
    pub fn check_shape(&self, colors: usize, tube_count: usize) -> Result<()> {
        if self.len() != tube_count || self.len() > MAX_TUBES {
            return Err(EngineError::CorruptedState(format!(
                "expected {} tubes, found {}",
                tube_count,
                self.len()
            )));
        }

        let counts = self.color_counts();
        if counts.len() != colors {
            return Err(EngineError::CorruptedState(format!(
                "expected {} colors, found {}",
                colors,
                counts.len()
            )));
        }
        for (color, count) in counts {
            if color.index() >= colors || count != COLORS_PER_TUBE {
                return Err(EngineError::CorruptedState(format!(
                    "{} appears {} times",
                    color, count
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, tube) in self.tubes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "[")?;
            for (j, c) in tube.colors().iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c.0)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let board = Board::from_rows(&[&[0, 1], &[0], &[]]).unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.tube(0).unwrap().top(), Some(Color(1)));
        assert!(board.tube(2).unwrap().is_empty());
        assert!(board.tube(3).is_none());
        assert_eq!(board.to_rows(), vec![vec![0, 1], vec![0], vec![]]);
    }

    #[test]
    fn test_from_rows_rejects_overfull_tube() {
        let result = Board::from_rows(&[&[2, 2], &[2, 2, 2, 2, 2], &[]]);
        assert!(matches!(result, Err(EngineError::TubeOverCapacity { .. })));
    }

    #[test]
    fn test_color_counts() {
        let board = Board::from_rows(&[&[0, 1, 1], &[0], &[]]).unwrap();
        let counts = board.color_counts();
        assert_eq!(counts[&Color(0)], 2);
        assert_eq!(counts[&Color(1)], 2);
        assert_eq!(board.token_count(), 4);
    }

    #[test]
    fn test_check_shape() {
        let board = Board::from_rows(&[&[0, 1, 0, 1], &[1, 0, 1, 0], &[], &[]]).unwrap();
        assert!(board.check_shape(2, 4).is_ok());
        assert!(board.check_shape(2, 5).is_err());
        assert!(board.check_shape(3, 4).is_err());

        let lopsided = Board::from_rows(&[&[0, 0, 0, 0], &[0, 1, 1, 1], &[], &[]]).unwrap();
        assert!(lopsided.check_shape(2, 4).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::from_rows(&[&[0], &[]]).unwrap();
        let mut copy = board.clone();
        copy.tube_mut(1).unwrap().push(Color(3)).unwrap();

        assert!(board.tube(1).unwrap().is_empty());
        assert_eq!(copy.tube(1).unwrap().top(), Some(Color(3)));
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&[&[0, 1], &[2], &[]]).unwrap();
        assert_eq!(board.to_string(), "[0 1] [2] []");
    }

    #[test]
    fn test_serde_round_trip() {
        let board = Board::from_rows(&[&[0, 1], &[0], &[]]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
    }
}
