//! Demo player
//!
//! Steers toward the lowest live enemy (the most dangerous one) and fires
//! when lined up. Seeded so demo runs replay identically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Snapshot;
use super::tick::{MoveIntent, TickInput};
use crate::consts::*;

/// Chance of firing when the paddle is under the target
const FIRE_CHANCE: f64 = 0.35;
/// Chance of a stray shot while still moving
const STRAY_FIRE_CHANCE: f64 = 0.02;

pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick the input for the next tick
    pub fn decide(&mut self, snapshot: &Snapshot) -> TickInput {
        if !snapshot.running {
            return TickInput::default();
        }

        // Most dangerous enemy: lowest on screen, leftmost on ties
        let target = snapshot
            .enemies
            .iter()
            .filter(|e| e.alive)
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(b.pos.x.partial_cmp(&a.pos.x).unwrap_or(std::cmp::Ordering::Equal))
            });

        let Some(target) = target else {
            return TickInput::default();
        };

        let target_x = target.pos.x + ENEMY_SIZE / 2.0;
        let offset = target_x - snapshot.player.center_x();

        if offset.abs() <= ENEMY_SIZE / 2.0 - BULLET_WIDTH {
            TickInput {
                movement: None,
                fire: self.rng.random_bool(FIRE_CHANCE),
            }
        } else {
            let movement = if offset < 0.0 {
                MoveIntent::Left
            } else {
                MoveIntent::Right
            };
            TickInput {
                movement: Some(movement),
                fire: self.rng.random_bool(STRAY_FIRE_CHANCE),
            }
        }
    }
}
