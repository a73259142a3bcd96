//! Screen layout for the menus
//!
//! Button rectangles are shared by hit-testing in [`crate::game`] and by the
//! scene drawing, so what the player sees is what they can click.

use glam::Vec2;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::Rect;

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
const LEVEL_BUTTON_WIDTH: f32 = 150.0;
const LEVEL_BUTTON_HEIGHT: f32 = 50.0;
const LEVEL_BUTTON_TOP: f32 = 150.0;
const LEVEL_BUTTON_STEP: f32 = 70.0;
/// Level buttons per column
const LEVELS_PER_COLUMN: u32 = 5;
const LEVEL_COLUMN_GAP: f32 = 50.0;

/// Main menu "Play"
pub fn play_button() -> Rect {
    Rect::new(
        PLAYFIELD_WIDTH / 2.0 - BUTTON_WIDTH / 2.0,
        PLAYFIELD_HEIGHT / 2.0 - 60.0,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// Main menu "Levels"
pub fn levels_button() -> Rect {
    Rect::new(
        PLAYFIELD_WIDTH / 2.0 - BUTTON_WIDTH / 2.0,
        PLAYFIELD_HEIGHT / 2.0 + 10.0,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// Level select "Back"
pub fn back_button() -> Rect {
    Rect::new(20.0, 20.0, 100.0, 40.0)
}

/// Win screen "Menu"
pub fn continue_button() -> Rect {
    Rect::new(
        PLAYFIELD_WIDTH / 2.0 - BUTTON_WIDTH / 2.0,
        PLAYFIELD_HEIGHT / 2.0 - 25.0,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

/// Button for `level` (1-based) out of `max_levels`
///
/// A single centered column for up to five levels, otherwise two columns.
pub fn level_button(level: u32, max_levels: u32) -> Rect {
    let index = level.saturating_sub(1);
    let row = index % LEVELS_PER_COLUMN;
    let y = LEVEL_BUTTON_TOP + (row + 1) as f32 * LEVEL_BUTTON_STEP;

    let x = if max_levels <= LEVELS_PER_COLUMN {
        PLAYFIELD_WIDTH / 2.0 - LEVEL_BUTTON_WIDTH / 2.0
    } else {
        let column = (index / LEVELS_PER_COLUMN) as f32;
        let grid_width = 2.0 * LEVEL_BUTTON_WIDTH + LEVEL_COLUMN_GAP;
        PLAYFIELD_WIDTH / 2.0 - grid_width / 2.0
            + column * (LEVEL_BUTTON_WIDTH + LEVEL_COLUMN_GAP)
    };

    Rect::new(x, y, LEVEL_BUTTON_WIDTH, LEVEL_BUTTON_HEIGHT)
}

/// Which level button, if any, sits under `point`
pub fn level_at(point: Vec2, max_levels: u32) -> Option<u32> {
    (1..=max_levels).find(|&level| level_button(level, max_levels).contains(point))
}
