//! Rendering module
//!
//! Turns a [`Snapshot`] into a flat list of draw commands. The browser host
//! replays them on a 2D canvas; anything else can inspect them directly.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

pub use shapes::{DrawCommand, build_frame};

use crate::highscores::{HighScoreEntry, HighScores};

/// Label used for points in the HUD and on the leaderboard
pub const POINTS_LABEL: &str = "Punkte";

/// HUD score line
pub fn score_text(score: u64) -> String {
    format!("{}: {}", POINTS_LABEL, score)
}

/// One leaderboard line
pub fn leaderboard_line(entry: &HighScoreEntry) -> String {
    format!("{} {} ({})", entry.score, POINTS_LABEL, entry.date)
}

/// All leaderboard lines, best first
pub fn leaderboard_lines(scores: &HighScores) -> Vec<String> {
    scores.entries.iter().map(leaderboard_line).collect()
}
