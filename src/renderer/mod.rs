//! Rendering boundary
//!
//! The game never talks to a graphics API. It issues rectangles and text to
//! a [`Renderer`]; a platform backend (or the [`DrawList`] recorder used by
//! tests and the headless driver) turns them into pixels.

pub mod draw_list;
pub mod particles;
pub mod scene;

use glam::Vec2;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::Rect;

pub use draw_list::{DrawCommand, DrawList};
pub use particles::{Particle, ParticleSystem};

/// Linear RGBA, each channel in 0..=1
pub type Color = [f32; 4];

/// Something that can put rectangles and text on screen
pub trait Renderer {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Text with its top-left corner at `pos`; `scale` 1.0 is the HUD size
    fn draw_text(&mut self, text: &str, pos: Vec2, scale: f32, color: Color);

    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let t = thickness.min(rect.w() / 2.0).min(rect.h() / 2.0);
        self.fill_rect(Rect::new(rect.x(), rect.y(), rect.w(), t), color);
        self.fill_rect(Rect::new(rect.x(), rect.bottom() - t, rect.w(), t), color);
        self.fill_rect(Rect::new(rect.x(), rect.y() + t, t, rect.h() - 2.0 * t), color);
        self.fill_rect(
            Rect::new(rect.right() - t, rect.y() + t, t, rect.h() - 2.0 * t),
            color,
        );
    }

    /// Fill the whole playfield
    fn clear(&mut self, color: Color) {
        self.fill_rect(Rect::new(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT), color);
    }
}

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Scale the RGB channels, leaving alpha alone
pub fn shade(color: Color, factor: f32) -> Color {
    [
        (color[0] * factor).clamp(0.0, 1.0),
        (color[1] * factor).clamp(0.0, 1.0),
        (color[2] * factor).clamp(0.0, 1.0),
        color[3],
    ]
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.08, 0.08, 0.12, 1.0];
    pub const BORDER: [f32; 4] = [0.3, 0.3, 0.4, 1.0];
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PADDLE_STICKY: [f32; 4] = [0.6, 1.0, 0.6, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LASER: [f32; 4] = [1.0, 0.3, 0.3, 1.0];

    /// One-hit bricks
    pub const BRICK_TIER0: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
    /// Multi-hit bricks at full health
    pub const BRICK_TIER1: [f32; 4] = [0.7, 0.3, 0.9, 1.0];
    /// Multi-hit bricks that have taken damage
    pub const BRICK_DAMAGED: [f32; 4] = [1.0, 0.5, 0.2, 1.0];
    pub const RUNE: [f32; 4] = [1.0, 1.0, 0.85, 0.7];

    pub const POWERUP_MULTI_BALL: [f32; 4] = [0.2, 0.9, 1.0, 1.0];
    pub const POWERUP_WIDE_PADDLE: [f32; 4] = [0.3, 1.0, 0.4, 1.0];
    pub const POWERUP_SLOW_BALL: [f32; 4] = [0.4, 0.5, 1.0, 1.0];
    pub const POWERUP_EXTRA_LIFE: [f32; 4] = [1.0, 0.3, 0.4, 1.0];
    pub const POWERUP_LASER: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    pub const POWERUP_STICKY: [f32; 4] = [0.9, 0.9, 0.2, 1.0];

    pub const BUTTON_PLAY: [f32; 4] = [0.0, 0.7, 1.0, 1.0];
    pub const BUTTON_LEVELS: [f32; 4] = [0.0, 1.0, 0.4, 1.0];
    pub const BUTTON_BACK: [f32; 4] = [1.0, 0.31, 0.31, 1.0];
    pub const LEVEL_UNLOCKED: [f32; 4] = [0.0, 0.78, 1.0, 1.0];
    pub const LEVEL_LOCKED: [f32; 4] = [0.4, 0.4, 0.4, 1.0];

    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT_DIM: [f32; 4] = [0.7, 0.7, 0.75, 1.0];
    pub const SCORE_BAR: [f32; 4] = [0.0, 1.0, 0.4, 1.0];
    pub const HEART: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
}
