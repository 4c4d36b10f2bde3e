//! Game state and core simulation types
//!
//! Everything the engine mutates lives in [`GameState`]. There are no
//! globals; independent states can coexist side by side.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// An enemy reached the player's row
    Ended,
}

/// What happens to a bullet once it has hit an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitPolicy {
    /// Spent bullets leave the collection in the same fast tick
    #[default]
    Consume,
    /// Spent bullets are parked above the top bound and dropped on the
    /// next fast tick
    Parity,
}

/// Drawing surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    /// Player spawn point: horizontally centered, just above the bottom edge
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - PLAYER_WIDTH / 2.0,
            self.height - PLAYER_BOTTOM_OFFSET,
        )
    }
}

/// Enemy color tag: an HSL hue in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hue(pub u16);

impl Hue {
    /// CSS color string (fixed saturation and lightness)
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, 70%, 50%)", self.0)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Horizontal center of the paddle
    pub fn center_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH / 2.0
    }
}

/// A projectile travelling upward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
}

impl Bullet {
    /// Spawn a bullet centered on the paddle, level with its top edge
    pub fn from_player(player: &Player) -> Self {
        Self {
            pos: Vec2::new(player.center_x() - BULLET_WIDTH / 2.0, player.pos.y),
        }
    }
}

/// A grid enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub alive: bool,
    pub hue: Hue,
}

impl Enemy {
    /// Lower edge of the enemy square
    pub fn bottom(&self) -> f32 {
        self.pos.y + ENEMY_SIZE
    }
}

/// Things that happened during an operation, drained by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    EnemyDestroyed { points: u64 },
    WaveCleared { level: u32 },
    RunEnded { score: u64, level: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub hit_policy: HitPolicy,
    pub phase: RunPhase,
    /// Current wave (1-based)
    pub level: u32,
    pub score: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Fast ticks applied during the current run
    pub fast_ticks: u64,
    /// Slow ticks applied during the current run
    pub slow_ticks: u64,
    /// Pending events (not part of the persisted view)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Arena::default(), HitPolicy::default())
    }
}

impl GameState {
    /// Create an idle state; call `start_run` to begin playing
    pub fn new(arena: Arena, hit_policy: HitPolicy) -> Self {
        Self {
            arena,
            hit_policy,
            phase: RunPhase::Idle,
            level: 1,
            score: 0,
            player: Player::new(arena.player_spawn()),
            bullets: Vec::new(),
            enemies: Vec::new(),
            fast_ticks: 0,
            slow_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Number of enemies still alive in the current wave
    pub fn live_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned read-only view for renderers and HUDs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            arena: self.arena,
            player: self.player.clone(),
            bullets: self.bullets.clone(),
            enemies: self.enemies.clone(),
            score: self.score,
            level: self.level,
            running: self.is_running(),
        }
    }
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub arena: Arena,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub level: u32,
    pub running: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::default();
        assert_eq!(state.phase, RunPhase::Idle);
        assert!(!state.is_running());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos, Vec2::new(220.0, 570.0));
    }

    #[test]
    fn test_bullet_spawns_centered_on_player() {
        let player = Player::new(Vec2::new(100.0, 570.0));
        let bullet = Bullet::from_player(&player);
        assert_eq!(bullet.pos, Vec2::new(119.0, 570.0));
    }

    #[test]
    fn test_hue_css() {
        assert_eq!(Hue(60).to_css(), "hsl(60, 70%, 50%)");
    }

    #[test]
    fn test_hit_policy_serde_names() {
        let json = serde_json::to_string(&HitPolicy::Parity).unwrap();
        assert_eq!(json, "\"parity\"");
        let policy: HitPolicy = serde_json::from_str("\"consume\"").unwrap();
        assert_eq!(policy, HitPolicy::Consume);
    }
}
