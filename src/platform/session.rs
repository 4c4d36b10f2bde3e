//! Session: one game state plus its score store
//!
//! Hosts drive a session instead of the raw engine so that the loss
//! side effect (persist the score, reload the leaderboard) happens exactly
//! once per run, right after the tick that ended it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::highscores::{HighScores, ScoreStore};
use crate::persistence::{KeyValueStore, StorageError};
use crate::platform::clock::Clock;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, MoveIntent, Snapshot, TickInput};

pub struct Session<S, C> {
    state: GameState,
    scores: ScoreStore<S, C>,
    leaderboard: HighScores,
    runs_finished: u32,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    pub fn new(settings: &Settings, storage: S, clock: C) -> Self {
        let scores = ScoreStore::new(storage, clock);
        let leaderboard = scores.load_leaderboard();
        Self {
            state: GameState::new(settings.arena(), settings.hit_policy),
            scores,
            leaderboard,
            runs_finished: 0,
        }
    }

    /// Start (or restart) a run and refresh the displayed leaderboard
    pub fn start_run(&mut self) {
        sim::start_run(&mut self.state);
        self.leaderboard = self.scores.load_leaderboard();
        self.state.drain_events();
    }

    pub fn apply_move(&mut self, intent: MoveIntent) {
        sim::apply_move(&mut self.state, intent);
    }

    pub fn fire(&mut self) {
        sim::fire(&mut self.state);
    }

    pub fn apply_input(&mut self, input: &TickInput) {
        sim::apply_input(&mut self.state, input);
    }

    pub fn advance_fast(&mut self) -> Result<(), StorageError> {
        sim::advance_fast(&mut self.state);
        self.process_events()
    }

    pub fn advance_slow(&mut self) -> Result<(), StorageError> {
        sim::advance_slow(&mut self.state);
        self.process_events()
    }

    /// Handle every drained event, then report the first storage failure
    fn process_events(&mut self) -> Result<(), StorageError> {
        let mut result = Ok(());
        for event in self.state.drain_events() {
            match event {
                GameEvent::RunEnded { score, level } => {
                    self.runs_finished += 1;
                    log::info!("Game over at level {}: {} points", level, score);
                    match self.scores.record_score(score) {
                        Ok(scores) => self.leaderboard = scores,
                        Err(e) if result.is_ok() => result = Err(e),
                        Err(e) => log::error!("Failed to save high score: {}", e),
                    }
                }
                GameEvent::WaveCleared { level } => log::debug!("Now on level {}", level),
                GameEvent::RunStarted | GameEvent::EnemyDestroyed { .. } => {}
            }
        }
        result
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Leaderboard as of the last run start or run end
    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    /// Runs that have ended in this session
    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn score_store(&self) -> &ScoreStore<S, C> {
        &self.scores
    }
}

/// A session behind a mutex: the single writer for every tick and input source
pub struct SharedSession<S, C> {
    inner: Arc<Mutex<Session<S, C>>>,
}

impl<S, C> Clone for SharedSession<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore, C: Clock> SharedSession<S, C> {
    pub fn new(session: Session<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Exclusive access. Every operation leaves the state well-formed, so a
    /// panic in another holder does not invalidate it.
    pub fn lock(&self) -> MutexGuard<'_, Session<S, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut Session<S, C>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn start_run(&self) {
        self.lock().start_run();
    }

    pub fn apply_input(&self, input: &TickInput) {
        self.lock().apply_input(input);
    }

    pub fn advance_fast(&self) -> Result<(), StorageError> {
        self.lock().advance_fast()
    }

    pub fn advance_slow(&self) -> Result<(), StorageError> {
        self.lock().advance_slow()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn leaderboard(&self) -> HighScores {
        self.lock().leaderboard().clone()
    }
}
