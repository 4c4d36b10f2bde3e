//! Game settings
//!
//! Persisted next to the leaderboard under the `"settings"` key. Every
//! field has a default matching the classic game, so partial or missing
//! files still load.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{self, KeyValueStore, StorageError};
use crate::sim::{Arena, HitPolicy};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Drawing surface width in pixels
    pub arena_width: f32,
    /// Drawing surface height in pixels
    pub arena_height: f32,
    /// What happens to a bullet after a hit
    pub hit_policy: HitPolicy,

    // === Timing ===
    /// Interval of the enemy-descent tick
    pub slow_tick_ms: u64,
    /// Interval of the movement/collision tick where no display refresh drives it
    pub fast_tick_ms: u64,

    // === Demo ===
    /// Autopilot seed
    pub autopilot_seed: u64,
    /// Runs the native demo plays before printing the leaderboard
    pub demo_runs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            hit_policy: HitPolicy::Consume,

            slow_tick_ms: SLOW_TICK_MS,
            fast_tick_ms: FAST_TICK_MS,

            autopilot_seed: 0x5EED,
            demo_runs: 1,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "settings";

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.arena_width,
            height: self.arena_height,
        }
    }

    /// Repair values that would stall or break the game loop
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            self.arena_width = defaults.arena_width;
        }
        if !(self.arena_height.is_finite() && self.arena_height > PLAYER_BOTTOM_OFFSET) {
            self.arena_height = defaults.arena_height;
        }
        if self.slow_tick_ms == 0 {
            self.slow_tick_ms = defaults.slow_tick_ms;
        }
        if self.fast_tick_ms == 0 {
            self.fast_tick_ms = defaults.fast_tick_ms;
        }
        self
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match persistence::load_json::<Settings>(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        persistence::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
