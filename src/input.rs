//! Keyboard and pointer input
//!
//! A platform layer feeds raw key and pointer events into [`InputState`];
//! once per frame the game takes a [`FrameInput`] snapshot. Held keys
//! persist across frames, momentary presses are consumed by the snapshot.

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
    Enter,
    Escape,
    P,
    F,
    R,
    I,
}

impl Key {
    /// Map a platform key name (DOM `KeyboardEvent.key` style) to a key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            " " | "Space" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "p" | "P" => Some(Key::P),
            "f" | "F" => Some(Key::F),
            "r" | "R" => Some(Key::R),
            "i" | "I" => Some(Key::I),
            _ => None,
        }
    }
}

/// Everything the game needs to know about input for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Launch / release / fire (momentary)
    pub launch: bool,
    /// Debug: destroy every brick on the current level
    pub skip_level: bool,
    /// Start the current level over with a fresh run
    pub restart: bool,
    /// Pause toggle
    pub pause: bool,
    /// Back out of the current screen
    pub back: bool,
    /// Pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Primary button pressed this frame
    pub click: bool,
    /// Demo mode: the paddle plays itself
    pub autoplay: bool,
}

impl FrameInput {
    /// A click at `pos`
    pub fn click_at(pos: Vec2) -> Self {
        Self {
            pointer: pos,
            click: true,
            ..Default::default()
        }
    }

    /// The part of the snapshot the simulation consumes
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
            launch: self.launch,
            idle_mode: self.autoplay,
        }
    }
}

/// Accumulates raw events between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_held: bool,
    a_held: bool,
    right_held: bool,
    d_held: bool,
    autoplay: bool,
    pending: FrameInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = true,
            Key::A => self.a_held = true,
            Key::Right => self.right_held = true,
            Key::D => self.d_held = true,
            Key::Space | Key::Enter => self.pending.launch = true,
            Key::Escape => self.pending.back = true,
            Key::P => self.pending.pause = true,
            Key::F => self.pending.skip_level = true,
            Key::R => self.pending.restart = true,
            Key::I => {
                self.autoplay = !self.autoplay;
                log::info!("Autoplay: {}", self.autoplay);
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = false,
            Key::A => self.a_held = false,
            Key::Right => self.right_held = false,
            Key::D => self.d_held = false,
            _ => {}
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pending.pointer = pos;
    }

    pub fn pointer_pressed(&mut self, pos: Vec2) {
        self.pending.pointer = pos;
        self.pending.click = true;
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.autoplay = on;
    }

    /// Snapshot for this frame; clears one-shot inputs
    pub fn take_frame(&mut self) -> FrameInput {
        let pointer = self.pending.pointer;
        let mut frame = std::mem::take(&mut self.pending);
        self.pending.pointer = pointer;

        frame.left = self.left_held || self.a_held;
        frame.right = self.right_held || self.d_held;
        frame.autoplay = self.autoplay;
        frame
    }
}
