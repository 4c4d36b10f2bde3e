//! Draw commands for the game's rectangles

use serde::Serialize;

use crate::consts::*;
use crate::sim::Snapshot;

pub const PLAYER_COLOR: &str = "#FFFFFF";
pub const BULLET_COLOR: &str = "#FF0000";

/// A single drawing instruction in canvas pixel space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Wipe the whole surface
    Clear { width: f32, height: f32 },
    /// Solid rectangle from its top-left corner
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
}

impl DrawCommand {
    fn rect(x: f32, y: f32, width: f32, height: f32, color: impl Into<String>) -> Self {
        DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color: color.into(),
        }
    }
}

/// Everything needed to paint one frame: clear, player, bullets, live enemies
pub fn build_frame(snapshot: &Snapshot) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2 + snapshot.bullets.len() + snapshot.enemies.len());

    commands.push(DrawCommand::Clear {
        width: snapshot.arena.width,
        height: snapshot.arena.height,
    });

    let player = &snapshot.player;
    commands.push(DrawCommand::rect(
        player.pos.x,
        player.pos.y,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
        PLAYER_COLOR,
    ));

    for bullet in &snapshot.bullets {
        commands.push(DrawCommand::rect(
            bullet.pos.x,
            bullet.pos.y,
            BULLET_WIDTH,
            BULLET_HEIGHT,
            BULLET_COLOR,
        ));
    }

    for enemy in snapshot.enemies.iter().filter(|e| e.alive) {
        commands.push(DrawCommand::rect(
            enemy.pos.x,
            enemy.pos.y,
            ENEMY_SIZE,
            ENEMY_SIZE,
            enemy.hue.to_css(),
        ));
    }

    commands
}
