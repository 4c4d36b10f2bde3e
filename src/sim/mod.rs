//! Game-state simulation
//!
//! All gameplay logic lives here. This module has no rendering, timer or
//! storage dependencies:
//! - State is an owned value, never a global
//! - Operations are plain functions over `&mut GameState`
//! - Mutations outside a live run are silent no-ops

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod wave;

pub use autopilot::Autopilot;
pub use collision::{Rect, bullet_hits_enemy};
pub use state::{
    Arena, Bullet, Enemy, GameEvent, GameState, HitPolicy, Hue, Player, RunPhase, Snapshot,
};
pub use tick::{
    MoveIntent, TickInput, advance_fast, advance_slow, apply_input, apply_move, descent_step,
    fire, start_run,
};
pub use wave::{generate_wave, rows_for_level, row_hue, tier_for_level, wave_size};
