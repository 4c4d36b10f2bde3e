//! Paddle Strike - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Game-state simulation (entities, ticks, collisions, waves)
//! - `highscores`: Top-5 leaderboard and the score store
//! - `persistence`: Key-value storage backends (memory, file, LocalStorage)
//! - `platform`: Clock, session glue and tick drivers for the hosts
//! - `renderer`: Snapshot to draw-command translation
//! - `settings`: Tunable host configuration

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreEntry, HighScores, ScoreStore};
pub use platform::session::{Session, SharedSession};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default drawing surface size
    pub const ARENA_WIDTH: f32 = 480.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Distance between the player's top edge and the bottom of the arena
    pub const PLAYER_BOTTOM_OFFSET: f32 = 30.0;

    /// Player paddle
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 10.0;
    /// Horizontal shift per discrete left/right intent
    pub const PLAYER_STEP: f32 = 10.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 2.0;
    pub const BULLET_HEIGHT: f32 = 6.0;
    /// Upward travel per fast tick
    pub const BULLET_STEP: f32 = 4.0;
    /// Bullets at or above this y are gone
    pub const TOP_BOUND: f32 = 0.0;
    /// Where a bullet is parked once it has hit something
    pub const SPENT_BULLET_Y: f32 = -10.0;

    /// Enemies (square)
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_COLUMNS: u32 = 8;
    /// Rows in a wave are `ENEMY_BASE_ROWS + level`
    pub const ENEMY_BASE_ROWS: u32 = 3;
    pub const ENEMY_ORIGIN_X: f32 = 50.0;
    pub const ENEMY_ORIGIN_Y: f32 = 30.0;
    pub const ENEMY_SPACING_X: f32 = 50.0;
    pub const ENEMY_SPACING_Y: f32 = 30.0;
    /// Descent per slow tick is `ENEMY_BASE_DESCENT + level * ENEMY_LEVEL_DESCENT`
    pub const ENEMY_BASE_DESCENT: f32 = 0.2;
    pub const ENEMY_LEVEL_DESCENT: f32 = 0.05;

    /// Points per destroyed enemy
    pub const HIT_POINTS: u64 = 10;

    /// Default fixed interval of the slow (descent) tick
    pub const SLOW_TICK_MS: u64 = 20;
    /// Default fast tick interval for hosts without a display refresh
    pub const FAST_TICK_MS: u64 = 16;
}
