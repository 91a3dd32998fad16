//! Win evaluation.

use crate::core::Board;

/// True iff every tube is either empty or complete (full of one color).
#[must_use]
pub fn is_won(board: &Board) -> bool {
    board.tubes().all(|t| t.is_empty() || t.is_complete())
}

/// Number of tubes that are complete.
#[must_use]
pub fn completed_tubes(board: &Board) -> usize {
    board.tubes().filter(|t| t.is_complete()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u8]]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_sorted_board_is_won() {
        assert!(is_won(&board(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[]])));
    }

    #[test]
    fn test_partial_uniform_tube_is_not_won() {
        // Uniform but not full: the other two tokens are elsewhere.
        assert!(!is_won(&board(&[&[0, 0], &[0, 0], &[1, 1, 1, 1]])));
    }

    #[test]
    fn test_mixed_board_is_not_won() {
        assert!(!is_won(&board(&[&[0, 1, 0, 1], &[1, 0, 1, 0], &[]])));
    }

    #[test]
    fn test_all_empty_is_won() {
        assert!(is_won(&board(&[&[], &[]])));
    }

    #[test]
    fn test_completed_tubes() {
        let b = board(&[&[0, 0, 0, 0], &[1, 1, 2], &[2, 2, 2, 1], &[1], &[]]);
        assert_eq!(completed_tubes(&b), 1);
    }
}
