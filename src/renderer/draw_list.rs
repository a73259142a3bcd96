//! Recording renderer
//!
//! Stores every draw call for later inspection. Tests assert on it and the
//! headless driver uses it to exercise the full render path without a
//! window.

use glam::Vec2;

use super::{Color, Renderer};
use crate::sim::Rect;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        scale: f32,
        color: Color,
    },
}

/// Draw calls for one frame, in submission order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { rect, color } => Some((rect, color)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Rect { .. } => None,
        })
    }

    /// Whether any text command contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Number of rectangles drawn in exactly `color`
    pub fn count_color(&self, color: Color) -> usize {
        self.rects().filter(|(_, c)| **c == color).count()
    }
}

impl Renderer for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, scale: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            scale,
            color,
        });
    }
}
