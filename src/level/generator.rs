//! Level generation.
//!
//! A level is a pool of `COLORS_PER_TUBE` copies of each color, shuffled and
//! dealt four at a time into the filled tubes, followed by the empty tubes.
//! There is no solvability guarantee unless `verify_solvable` is set, in
//! which case candidates the solver proves unsolvable are redrawn.

use tracing::{debug, warn};

use crate::core::{Board, Color, EngineConfig, GameRng, Tube, COLORS_PER_TUBE};
use crate::rules::is_won;
use crate::solver::{SolveOutcome, Solver};

use super::difficulty::Difficulty;

/// Builds boards for levels.
#[derive(Clone, Debug)]
pub struct LevelGenerator {
    verify_solvable: bool,
    max_attempts: u32,
    solver: Solver,
}

impl LevelGenerator {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            verify_solvable: config.verify_solvable,
            max_attempts: config.max_generation_attempts.max(1),
            solver: Solver::from_config(config),
        }
    }

    /// Generate the board for `level`.
    ///
    /// Each call forks `rng`, so the retry loop never shifts what later
    /// levels draw.
    pub fn generate(&self, level: u32, rng: &mut GameRng) -> Board {
        let difficulty = Difficulty::for_level(level);
        let mut level_rng = rng.fork();

        if !self.verify_solvable {
            return deal(&difficulty, &mut level_rng);
        }

        let mut board = deal(&difficulty, &mut level_rng);
        for attempt in 1..=self.max_attempts {
            if is_won(&board) {
                debug!(level, attempt, "rejecting pre-sorted board");
            } else {
                match self.solver.solve(&board) {
                    SolveOutcome::Unsolvable => {
                        debug!(level, attempt, "rejecting unsolvable board");
                    }
                    SolveOutcome::Solved(path) => {
                        debug!(level, attempt, moves = path.len(), "generated solvable board");
                        return board;
                    }
                    SolveOutcome::LimitReached => {
                        debug!(level, attempt, "solver limit reached, accepting board");
                        return board;
                    }
                }
            }
            if attempt < self.max_attempts {
                board = deal(&difficulty, &mut level_rng);
            }
        }

        warn!(level, attempts = self.max_attempts, "no verified board found, keeping last candidate");
        board
    }
}

/// Shuffle a fresh pool and deal it into tubes.
#[must_use]
pub fn deal(difficulty: &Difficulty, rng: &mut GameRng) -> Board {
    let mut pool: Vec<Color> = Color::all(difficulty.colors)
        .flat_map(|c| std::iter::repeat(c).take(COLORS_PER_TUBE))
        .collect();

    for _ in 0..difficulty.shuffle_passes.max(1) {
        rng.shuffle(&mut pool);
    }

    let filled = pool.chunks(COLORS_PER_TUBE).filter_map(|chunk| Tube::from_colors(chunk).ok());
    let tube_count = difficulty.tube_count();
    let empties = std::iter::repeat_with(Tube::new);

    Board::new(filled.chain(empties).take(tube_count))
}

/// Generate a single board from a seed, without a session.
///
/// ```
/// use liquid_sort::core::EngineConfig;
/// use liquid_sort::level::generate;
///
/// let config = EngineConfig::default().with_seed(7);
/// assert_eq!(generate(3, &config), generate(3, &config));
/// ```
#[must_use]
pub fn generate(level: u32, config: &EngineConfig) -> Board {
    let mut rng = GameRng::new(config.seed);
    LevelGenerator::new(config).generate(level, &mut rng)
}
