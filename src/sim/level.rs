//! Brick layout generation
//!
//! Gaps are fixed per level; only hit points and rune decorations are
//! rolled from the random source.

use rand::Rng;

use super::rect::Rect;
use super::state::Brick;
use crate::consts::{BRICK_HEIGHT, BRICK_PADDING, BRICK_TOP_OFFSET, RUNE_COUNT};

/// Whether the cell at (row, col) is deliberately left empty on `level`
pub fn is_skipped(row: u32, col: u32, rows: u32, cols: u32, level: u32) -> bool {
    let pattern_gap = match level {
        2 => row % 2 == 1 && col % 2 == 0,
        3 => (row + col) % 3 == 0,
        _ => false,
    };
    let center_gap = level >= 8 && row == rows / 2 && col == cols / 2;
    pattern_gap || center_gap
}

/// Roll hit points for one brick
///
/// Level 3+ gives a 1-in-4 chance of 2 hits. Level 6+ then rolls an
/// independent 1-in-6 chance of 3 hits, which overrides the first roll.
pub fn roll_max_hits(level: u32, rng: &mut impl Rng) -> u8 {
    let mut hits = 1;
    if level >= 3 && rng.random_range(0..4) == 0 {
        hits = 2;
    }
    if level >= 6 && rng.random_range(0..6) == 0 {
        hits = 3;
    }
    hits
}

/// Generate the brick grid for a level
pub fn generate_level(
    rows: u32,
    cols: u32,
    playfield_width: f32,
    level: u32,
    rng: &mut impl Rng,
) -> Vec<Brick> {
    let cols = cols.max(1);
    let total_padding = (cols + 1) as f32 * BRICK_PADDING;
    let brick_width = (playfield_width - total_padding) / cols as f32;

    let mut bricks = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            if is_skipped(row, col, rows, cols, level) {
                continue;
            }

            let x = BRICK_PADDING + col as f32 * (brick_width + BRICK_PADDING);
            let y = BRICK_TOP_OFFSET + row as f32 * (BRICK_HEIGHT + BRICK_PADDING);
            let max_hits = roll_max_hits(level, rng);
            let rune = rng.random_range(0..RUNE_COUNT);
            // Diagonal wave across the grid
            let glow_phase = (row + col) as f32 * 0.35;

            bricks.push(Brick::new(
                Rect::new(x, y, brick_width, BRICK_HEIGHT),
                max_hits,
                rune,
                glow_phase,
            ));
        }
    }
    bricks
}
