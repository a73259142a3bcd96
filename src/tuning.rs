//! Data-driven game balance
//!
//! Everything a designer might want to tweak without touching the
//! simulation code. Loaded as part of [`crate::Settings`].

use serde::{Deserialize, Serialize};

/// Gameplay balance numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run
    pub starting_lives: u32,
    /// Number of levels in the sequence (the last one ends the run with a win)
    pub max_levels: u32,
    /// Paddle horizontal speed (units/s)
    pub paddle_speed: f32,
    /// Per-axis ball speed on level 1
    pub ball_speed: f32,
    /// Extra per-axis ball speed for each level after the first
    pub ball_speed_per_level: f32,
    /// Chance a destroyed brick drops a power-up
    pub powerup_drop_chance: f64,
    /// Power-up fall speed (units/s)
    pub powerup_fall_speed: f32,
    /// Seconds a combo survives without another hit
    pub combo_window: f32,
    /// Seconds the laser stays armed
    pub laser_duration: f32,
    /// Horizontal offset given to multi-ball clones
    pub multiball_spread: f32,
    /// Velocity multiplier applied by the slow-ball power-up
    pub slow_factor: f32,
    /// Width added to the paddle target by the wide-paddle power-up
    pub wide_paddle_bonus: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            max_levels: 10,
            paddle_speed: 600.0,
            ball_speed: 380.0,
            ball_speed_per_level: 25.0,
            powerup_drop_chance: 0.25,
            powerup_fall_speed: 150.0,
            combo_window: 2.0,
            laser_duration: 8.0,
            multiball_spread: 150.0,
            slow_factor: 0.7,
            wide_paddle_bonus: 60.0,
        }
    }
}

impl Tuning {
    /// Per-axis launch speed for a level (1-based)
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        self.ball_speed + level.saturating_sub(1) as f32 * self.ball_speed_per_level
    }

    /// Brick rows for a level: one more row every two levels
    pub fn rows_for_level(&self, level: u32) -> u32 {
        crate::consts::BASE_BRICK_ROWS + level.saturating_sub(1) / 2
    }

    /// Whether `level` is the last one in the sequence
    pub fn is_final_level(&self, level: u32) -> bool {
        level >= self.max_levels
    }
}
