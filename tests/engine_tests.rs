//! Engine integration tests: generation, pouring, win detection, hints.

use liquid_sort::core::{Board, Color, EngineConfig, GameRng, COLORS_PER_TUBE};
use liquid_sort::hint::{completes_tube, find_hint, HintTier};
use liquid_sort::level::{generate, Difficulty, LevelGenerator};
use liquid_sort::rules::{can_move, is_won, legal_moves, pour, Move};
use liquid_sort::solver::{SolveOutcome, Solver};
use liquid_sort::EngineError;

fn board(rows: &[&[u8]]) -> Board {
    Board::from_rows(rows).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_sorted_board_is_won() {
    assert!(is_won(&board(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[]])));
}

#[test]
fn test_mismatched_top_then_pour_into_empty() {
    let mut b = board(&[&[0, 1], &[0], &[]]);

    assert!(!can_move(&b, 0, 1));
    assert!(can_move(&b, 0, 2));

    let result = pour(&mut b, 0, 2).unwrap();
    assert_eq!(result.moved, 1);
    assert_eq!(result.color, Color(1));
    assert_eq!(b, board(&[&[0], &[0], &[1]]));
}

#[test]
fn test_overfull_board_cannot_be_built() {
    let result = Board::from_rows(&[&[2, 2], &[2, 2, 2, 2, 2], &[]]);
    assert!(matches!(result, Err(EngineError::TubeOverCapacity { len: 5, capacity: 4 })));
}

#[test]
fn test_illegal_pour_is_reported() {
    let mut b = board(&[&[0, 1], &[0], &[]]);
    assert_eq!(pour(&mut b, 0, 1), Err(EngineError::IllegalMove { from: 0, to: 1 }));
    assert_eq!(pour(&mut b, 2, 0), Err(EngineError::IllegalMove { from: 2, to: 0 }));
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generation_conserves_colors_for_many_seeds() {
    for seed in 0..50u64 {
        let config = EngineConfig::default().with_seed(seed);
        let level = (seed as u32) * 3 + 1;
        let d = Difficulty::for_level(level);
        let b = generate(level, &config);

        assert_eq!(b.len(), d.tube_count());
        assert_eq!(b.token_count(), COLORS_PER_TUBE * d.colors);
        let counts = b.color_counts();
        assert_eq!(counts.len(), d.colors);
        assert!(counts.values().all(|&n| n == COLORS_PER_TUBE));
        assert!(b.tubes().all(|t| t.len() <= COLORS_PER_TUBE));
    }
}

#[test]
fn test_generated_empty_tubes_come_last() {
    let mut rng = GameRng::new(11);
    let generator = LevelGenerator::new(&EngineConfig::default());
    let b = generator.generate(30, &mut rng);

    let rows = b.to_rows();
    assert_eq!(rows.len(), 7);
    assert!(rows[..5].iter().all(|r| r.len() == 4));
    assert!(rows[5..].iter().all(|r| r.is_empty()));
}

#[test]
fn test_early_levels_are_usually_solvable() {
    // No solvability guarantee without the gate, but three colors with
    // three spare tubes should always work out.
    let solver = Solver::new(100_000);
    for seed in 0..20u64 {
        let b = generate(1, &EngineConfig::default().with_seed(seed));
        assert!(solver.solve(&b).is_solved(), "seed {} produced {}", seed, b);
    }
}

// =============================================================================
// Hints
// =============================================================================

/// Every board of three tubes over two colors with up to four tokens each.
fn small_boards() -> Vec<Board> {
    let mut tubes: Vec<Vec<u8>> = vec![vec![]];
    for len in 1..=COLORS_PER_TUBE {
        for bits in 0..(1u32 << len) {
            tubes.push((0..len).map(|i| ((bits >> i) & 1) as u8).collect());
        }
    }

    let mut boards = Vec::new();
    for a in &tubes {
        for b in &tubes {
            for c in &tubes {
                boards.push(board(&[a.as_slice(), b.as_slice(), c.as_slice()]));
            }
        }
    }
    boards
}

#[test]
fn test_completing_tier_only_when_a_completion_exists() {
    for b in small_boards() {
        let any_completion = legal_moves(&b).iter().any(|mv| {
            let source = b.tube(mv.from).unwrap();
            let dest = b.tube(mv.to).unwrap();
            let mut future = dest.colors().to_vec();
            future.push(source.top().unwrap());
            future.len() == COLORS_PER_TUBE && future.iter().all(|&c| c == future[0])
        });

        match find_hint(&b) {
            Some(hint) if hint.tier == HintTier::Completing => {
                assert!(any_completion, "false completion on {}", b);
                assert!(completes_tube(&b, &hint.mv));
            }
            Some(_) => assert!(!any_completion, "missed completion on {}", b),
            None => assert!(legal_moves(&b).is_empty()),
        }
    }
}

#[test]
fn test_hint_is_always_legal() {
    for b in small_boards() {
        if let Some(hint) = find_hint(&b) {
            assert!(can_move(&b, hint.mv.from, hint.mv.to), "illegal hint on {}", b);
        }
    }
}

#[test]
fn test_following_hints_stays_legal() {
    let mut b = board(&[&[0, 1, 0, 1], &[1, 0, 1, 0], &[], &[]]);
    let mut steps = 0;
    while !is_won(&b) && steps < 50 {
        let hint = find_hint(&b).expect("board should never get stuck here");
        pour(&mut b, hint.mv.from, hint.mv.to).unwrap();
        steps += 1;
    }
    // Hints are a heuristic, not a solver. They may cycle.
    assert_eq!(b.token_count(), 8);
}

// =============================================================================
// Solver
// =============================================================================

#[test]
fn test_solver_path_wins() {
    let b = generate(20, &EngineConfig::default().with_seed(8));
    if let SolveOutcome::Solved(path) = Solver::new(200_000).solve(&b) {
        let mut replay = b.clone();
        for Move { from, to } in path {
            pour(&mut replay, from, to).unwrap();
        }
        assert!(is_won(&replay));
    }
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_board_json_shape() {
    let b = board(&[&[0, 1], &[2], &[]]);
    let json = serde_json::to_string(&b).unwrap();
    assert_eq!(json, r#"{"tubes":[[0,1],[2],[]]}"#);
}

#[test]
fn test_overfull_tube_rejected_on_deserialize() {
    let result = serde_json::from_str::<Board>(r#"{"tubes":[[0,0,0,0,0],[]]}"#);
    assert!(result.is_err());
}
