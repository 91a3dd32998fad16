//! Exhaustive solvability search.
//!
//! Depth-first search over the pour graph with a visited set of canonical
//! states. Tube order does not affect solvability, so states are keyed by
//! their sorted tube list, which collapses boards that only differ by a
//! permutation of tubes.
//!
//! Used by the level generator when `EngineConfig::verify_solvable` is set,
//! and available to hosts that want a full solution path.

use rustc_hash::FxHashSet;

use crate::core::{Board, EngineConfig, Tube};
use crate::rules::{is_won, legal_moves, pour, Move};

/// Result of a solver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A winning sequence of moves. Empty if the board is already won.
    Solved(Vec<Move>),
    /// Every reachable state was explored without finding a win.
    Unsolvable,
    /// The node limit was hit before the search finished.
    LimitReached,
}

impl SolveOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }
}

/// Search node: a board and how we got there.
struct Node {
    board: Board,
    parent: Option<(usize, Move)>,
}

/// Depth-first solver bounded by a node limit.
#[derive(Clone, Copy, Debug)]
pub struct Solver {
    node_limit: usize,
}

impl Solver {
    /// Create a solver that visits at most `node_limit` distinct states.
    #[must_use]
    pub fn new(node_limit: usize) -> Self {
        Self { node_limit }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.solver_node_limit)
    }

    /// Search for a winning move sequence.
    #[must_use]
    pub fn solve(&self, board: &Board) -> SolveOutcome {
        if is_won(board) {
            return SolveOutcome::Solved(Vec::new());
        }

        let mut nodes = vec![Node {
            board: board.clone(),
            parent: None,
        }];
        let mut visited: FxHashSet<Vec<Tube>> = FxHashSet::default();
        visited.insert(canonical(board));
        let mut stack = vec![0usize];

        while let Some(idx) = stack.pop() {
            let current = nodes[idx].board.clone();

            // Reverse so the preferred move is popped first.
            for mv in candidate_moves(&current).into_iter().rev() {
                let mut next = current.clone();
                if pour(&mut next, mv.from, mv.to).is_err() {
                    continue;
                }
                if !visited.insert(canonical(&next)) {
                    continue;
                }
                if visited.len() > self.node_limit {
                    return SolveOutcome::LimitReached;
                }

                let won = is_won(&next);
                nodes.push(Node {
                    board: next,
                    parent: Some((idx, mv)),
                });
                let child = nodes.len() - 1;
                if won {
                    return SolveOutcome::Solved(path_to(&nodes, child));
                }
                stack.push(child);
            }
        }

        SolveOutcome::Unsolvable
    }
}

/// Legal moves worth exploring, best first.
///
/// Drops pours of a whole single-color tube into an empty tube: they only
/// relabel tubes. Moves onto a matching color come before moves into empty
/// tubes.
fn candidate_moves(board: &Board) -> Vec<Move> {
    let mut moves: Vec<(bool, Move)> = legal_moves(board)
        .into_iter()
        .filter_map(|mv| {
            let source = board.tube(mv.from)?;
            let dest = board.tube(mv.to)?;
            if dest.is_empty() && source.is_uniform() {
                return None;
            }
            Some((dest.is_empty(), mv))
        })
        .collect();
    moves.sort_by_key(|&(into_empty, _)| into_empty);
    moves.into_iter().map(|(_, mv)| mv).collect()
}

fn canonical(board: &Board) -> Vec<Tube> {
    let mut key: Vec<Tube> = board.tubes().cloned().collect();
    key.sort_unstable();
    key
}

fn path_to(nodes: &[Node], mut idx: usize) -> Vec<Move> {
    let mut path = Vec::new();
    while let Some((parent, mv)) = nodes[idx].parent {
        path.push(mv);
        idx = parent;
    }
    path.reverse();
    path
}
