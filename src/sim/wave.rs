//! Enemy wave generation
//!
//! Waves are a fixed 8-column grid that gains one row per cleared wave.
//! The grid tier trails the level counter by one, so level 1 opens with
//! three rows and every clear adds a row.

use glam::Vec2;

use super::state::{Enemy, Hue};
use crate::consts::*;

/// Rows in the wave for `level`
pub fn rows_for_level(level: u32) -> u32 {
    ENEMY_BASE_ROWS + level
}

/// Enemy count for `level`
pub fn wave_size(level: u32) -> usize {
    (rows_for_level(level) * ENEMY_COLUMNS) as usize
}

/// Color tag for a row; neighbouring rows are 20 degrees apart
pub fn row_hue(level: u32, row: u32) -> Hue {
    let degrees = (u64::from(level) * 40 + u64::from(row) * 20) % 360;
    Hue(degrees as u16)
}

/// Grid tier used to build the wave shown while playing `level`
pub fn tier_for_level(level: u32) -> u32 {
    level.saturating_sub(1)
}

/// Build a fresh, fully alive wave for `level`
pub fn generate_wave(level: u32) -> Vec<Enemy> {
    let rows = rows_for_level(level);
    let mut enemies = Vec::with_capacity(wave_size(level));

    for row in 0..rows {
        let hue = row_hue(level, row);
        let y = ENEMY_ORIGIN_Y + row as f32 * ENEMY_SPACING_Y;
        for col in 0..ENEMY_COLUMNS {
            enemies.push(Enemy {
                pos: Vec2::new(ENEMY_ORIGIN_X + col as f32 * ENEMY_SPACING_X, y),
                alive: true,
                hue,
            });
        }
    }

    log::debug!("Generated wave for level {}: {} enemies", level, enemies.len());
    enemies
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_wave_layout() {
        let wave = generate_wave(1);
        assert_eq!(wave.len(), 32);
        assert_eq!(wave[0].pos, Vec2::new(50.0, 30.0));
        assert_eq!(wave[7].pos, Vec2::new(400.0, 30.0));
        assert_eq!(wave[8].pos, Vec2::new(50.0, 60.0));
        assert_eq!(wave[0].hue, Hue(40));
        assert_eq!(wave[8].hue, Hue(60));
    }

    #[test]
    fn test_level_one_plays_tier_zero() {
        assert_eq!(tier_for_level(1), 0);
        assert_eq!(generate_wave(tier_for_level(1)).len(), 24);
        assert_eq!(generate_wave(tier_for_level(2)).len(), 32);
    }

    #[test]
    fn test_hue_wraps() {
        // 8 * 40 + 3 * 20 = 380
        assert_eq!(row_hue(8, 3), Hue(20));
    }

    proptest! {
        #[test]
        fn wave_size_matches_formula(level in 1u32..40) {
            let wave = generate_wave(level);
            prop_assert_eq!(wave.len(), ((3 + level) * 8) as usize);
            prop_assert!(wave.iter().all(|e| e.alive));
        }

        #[test]
        fn adjacent_rows_have_distinct_hues(level in 1u32..200, row in 0u32..17) {
            prop_assert_ne!(row_hue(level, row), row_hue(level, row + 1));
        }
    }
}
