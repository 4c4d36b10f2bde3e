//! Axis-aligned rectangle overlap
//!
//! The only physics in the game: a bullet hits an enemy when their
//! rectangles overlap with strictly positive area.

use glam::Vec2;

use super::state::{Bullet, Enemy};
use crate::consts::*;

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(ENEMY_SIZE))
    }
}

/// Does this bullet hit this enemy? Dead enemies never collide.
pub fn bullet_hits_enemy(bullet: &Bullet, enemy: &Enemy) -> bool {
    enemy.alive && bullet.rect().overlaps(&enemy.rect())
}
