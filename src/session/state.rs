//! Session: the one owner of level, board, hint budget, and selection.
//!
//! All mutation goes through `&mut self`, so a pour always completes before
//! anything else can observe the board.

use tracing::{debug, info, warn};

use crate::core::{Board, EngineConfig, EngineError, GameRng, Result};
use crate::hint::{find_hint, Hint, HintBudget, HintPolicy};
use crate::level::LevelGenerator;
use crate::rules::{completed_tubes, is_won, pour, PourResult};

use super::clock::{Clock, SystemClock, Timestamp};
use super::command::{Command, Outcome};
use super::persist::{self, PersistenceStore, SessionRecord};

/// Where the current level stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    /// Solved. `level` already points at the next level.
    Won,
}

/// A single player's game.
pub struct Session<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    rng: GameRng,
    generator: LevelGenerator,
    policy: HintPolicy,

    level: u32,
    board: Board,
    hints: HintBudget,
    selected: Option<usize>,
    paused: bool,
    status: Status,
}

impl<C: Clock> Session<C> {
    /// Start a new session at level 1.
    pub fn new(config: EngineConfig, clock: C) -> Result<Self> {
        let mut session = Self::blank(config, clock)?;
        session.start_level(None);
        Ok(session)
    }

    /// Resume from whatever `store` holds.
    ///
    /// The saved board is used only if its record matches the saved level
    /// and validates against it; otherwise a fresh board is dealt. Hint
    /// budget and last grant time are kept whenever they can be read.
    pub fn resume(config: EngineConfig, clock: C, store: &impl PersistenceStore) -> Result<Self> {
        let mut session = Self::blank(config, clock)?;
        let record = persist::load_record(store);

        session.level = persist::load_level(store)
            .or_else(|| record.as_ref().map(|r| r.level))
            .unwrap_or(1)
            .max(1);

        let last_grant = record
            .as_ref()
            .and_then(|r| r.last_hint_grant)
            .or_else(|| persist::load_last_grant(store));
        let remaining = record
            .as_ref()
            .map_or(session.config.starting_hints, |r| r.hints_remaining);
        session.hints = HintBudget::new(remaining, last_grant);
        session.hints.clamp(&session.policy);

        session.start_level(record);
        Ok(session)
    }

    fn blank(config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let policy = HintPolicy::from_config(&config);
        Ok(Self {
            rng: GameRng::new(config.seed),
            generator: LevelGenerator::new(&config),
            hints: HintBudget::new(config.starting_hints, None),
            policy,
            config,
            clock,
            level: 1,
            board: Board::default(),
            selected: None,
            paused: false,
            status: Status::Playing,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current board snapshot for rendering.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.hints.remaining()
    }

    #[must_use]
    pub fn last_hint_grant(&self) -> Option<Timestamp> {
        self.hints.last_grant()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    // === Commands ===

    /// Apply a command. Never fails: every refusal is an `Outcome`.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Tap(index) => self.tap(index),
            Command::SelectTube(index) => self.select(index),
            Command::AttemptPour { from, to } => self.attempt_pour(from, to),
            Command::UseHint => self.use_hint(),
            Command::BonusHint => self.bonus_hint(),
            Command::RegenerateHints => Outcome::HintsRegenerated {
                granted: self.regenerate_hints(),
            },
            Command::Restart => self.restart(),
            Command::NextLevel => self.next_level(),
            Command::TogglePause => self.toggle_pause(),
            Command::ResetProgress => self.reset_progress(),
        }
    }

    /// Input dispatch for a tap on tube `index`.
    ///
    /// With nothing selected, selects a non-empty tube. With a selection,
    /// tries to pour into `index` and clears the selection either way.
    pub fn tap(&mut self, index: usize) -> Outcome {
        match self.selected {
            None => self.select(index),
            Some(from) => self.attempt_pour(from, index),
        }
    }

    pub fn select(&mut self, index: usize) -> Outcome {
        if let Err(e) = self.check_playable() {
            return refusal(e);
        }
        match self.board.tube(index) {
            Some(tube) if !tube.is_empty() => {
                self.selected = Some(index);
                Outcome::Selected(index)
            }
            _ => Outcome::SelectionIgnored,
        }
    }

    pub fn attempt_pour(&mut self, from: usize, to: usize) -> Outcome {
        if let Err(e) = self.check_playable() {
            return refusal(e);
        }
        self.selected = None;
        match pour(&mut self.board, from, to) {
            Ok(result) => {
                let won = self.after_pour(&result);
                Outcome::Poured { result, won }
            }
            Err(_) => {
                debug!(from, to, "rejected pour");
                Outcome::Rejected { from, to }
            }
        }
    }

    /// Spend a hint on the best available move and play it.
    pub fn use_hint(&mut self) -> Outcome {
        match self.try_hint() {
            Ok((hint, result, won)) => Outcome::HintApplied { hint, result, won },
            Err(e) => refusal(e),
        }
    }

    fn try_hint(&mut self) -> Result<(Hint, PourResult, bool)> {
        self.check_playable()?;
        if self.hints.remaining() == 0 {
            return Err(EngineError::ExhaustedHints);
        }
        let hint = find_hint(&self.board).ok_or(EngineError::NoLogicalMove)?;
        let result = pour(&mut self.board, hint.mv.from, hint.mv.to)?;
        self.hints.consume()?;
        self.selected = None;
        debug!(mv = %hint.mv, tier = ?hint.tier, remaining = self.hints.remaining(), "hint used");
        let won = self.after_pour(&result);
        Ok((hint, result, won))
    }

    pub fn bonus_hint(&mut self) -> Outcome {
        match self.hints.grant_bonus(&self.policy) {
            Ok(()) => Outcome::BonusGranted {
                remaining: self.hints.remaining(),
            },
            Err(_) => Outcome::HintsAtMaximum,
        }
    }

    /// Poll regeneration against the session clock. Returns hints added.
    pub fn regenerate_hints(&mut self) -> u32 {
        let granted = self.hints.regenerate(self.clock.now(), &self.policy);
        if granted > 0 {
            info!(granted, remaining = self.hints.remaining(), "hints regenerated");
        }
        granted
    }

    /// Deal a fresh board for the current level.
    pub fn restart(&mut self) -> Outcome {
        self.start_level(None)
    }

    /// Move on after a win.
    pub fn next_level(&mut self) -> Outcome {
        if self.status != Status::Won {
            return Outcome::LevelNotWon;
        }
        self.start_level(None)
    }

    pub fn toggle_pause(&mut self) -> Outcome {
        self.paused = !self.paused;
        Outcome::PauseToggled { paused: self.paused }
    }

    /// Back to level 1 with a fresh budget. The host should also clear its
    /// store (see [`persist::clear`]).
    pub fn reset_progress(&mut self) -> Outcome {
        info!("progress reset");
        self.level = 1;
        self.hints = HintBudget::new(self.config.starting_hints, None);
        self.start_level(None)
    }

    // === Persistence ===

    /// Snapshot for the persistence store.
    #[must_use]
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            level: self.level,
            board: self.board.clone(),
            hints_remaining: self.hints.remaining(),
            last_hint_grant: self.hints.last_grant(),
        }
    }

    /// Write the current record to `store`.
    pub fn save(&self, store: &mut impl PersistenceStore) -> Result<()> {
        persist::save_record(store, &self.record())
    }

    // === Internals ===

    fn check_playable(&self) -> Result<()> {
        if self.paused {
            return Err(EngineError::Paused);
        }
        if self.status == Status::Won {
            return Err(EngineError::LevelComplete);
        }
        Ok(())
    }

    /// Poll for a win after a pour. On a win the level counter advances.
    fn after_pour(&mut self, result: &PourResult) -> bool {
        debug!(
            from = result.from,
            to = result.to,
            moved = result.moved,
            completed = completed_tubes(&self.board),
            "poured"
        );
        if !is_won(&self.board) {
            return false;
        }
        info!(level = self.level, "level won");
        self.status = Status::Won;
        self.level += 1;
        true
    }

    /// Set up `self.level`, from `saved` if it fits, else from a fresh deal.
    fn start_level(&mut self, saved: Option<SessionRecord>) -> Outcome {
        self.selected = None;
        self.paused = false;
        self.status = Status::Playing;

        let resumed = match saved.map(|r| r.validate_for(self.level).map(|()| r)) {
            Some(Ok(record)) => {
                self.board = record.board;
                true
            }
            Some(Err(e)) => {
                warn!(level = self.level, error = %e, "discarding saved board");
                false
            }
            None => false,
        };
        if !resumed {
            self.board = self.generator.generate(self.level, &mut self.rng);
        }

        self.hints.raise_to(self.config.starting_hints, &self.policy);
        self.regenerate_hints();

        info!(level = self.level, resumed, board = %self.board, "level started");
        Outcome::LevelStarted {
            level: self.level,
            resumed,
        }
    }
}

/// Outcome reported for a gameplay command refused with `error`.
fn refusal(error: EngineError) -> Outcome {
    match error {
        EngineError::Paused => Outcome::Paused,
        EngineError::LevelComplete => Outcome::LevelComplete,
        EngineError::ExhaustedHints => Outcome::HintsExhausted,
        _ => Outcome::NoLogicalMove,
    }
}
