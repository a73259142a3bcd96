//! Rune Breaker - an arcade brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, level generation, per-frame step)
//! - `game`: Top-level mode state machine (menu, level select, play, pause, win)
//! - `renderer`: Abstract draw boundary, draw-list recorder and particles
//! - `highscore`: Single-integer high score persistence
//! - `settings` / `tuning`: Player preferences and data-driven game balance

pub mod error;
pub mod game;
pub mod highscore;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::PersistError;
pub use game::{Flow, Game, GameMode, RunSummary};
pub use highscore::{FileStorage, HighScore, MemoryStorage, ScoreStorage};
pub use input::FrameInput;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest time step a single frame may simulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (the window)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 16.0;
    pub const PADDLE_DEFAULT_WIDTH: f32 = 120.0;
    pub const PADDLE_MAX_WIDTH: f32 = 240.0;
    /// Distance from the paddle's top edge to the playfield bottom
    pub const PADDLE_BOTTOM_GAP: f32 = 50.0;
    /// Width easing rate toward the target width (units/s)
    pub const PADDLE_RESIZE_RATE: f32 = 200.0;
    /// Horizontal ball speed at the very edge of the paddle
    pub const PADDLE_BOUNCE_MAX_VX: f32 = 400.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    /// Gap between a pinned ball and the paddle top
    pub const BALL_REST_GAP: f32 = 2.0;

    /// Brick layout
    pub const BRICK_PADDING: f32 = 4.0;
    pub const BRICK_TOP_OFFSET: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_COLUMNS: u32 = 10;
    pub const BASE_BRICK_ROWS: u32 = 5;
    /// Number of rune decorations a brick can carry
    pub const RUNE_COUNT: u8 = 8;
    /// Glow animation speed (radians/s)
    pub const BRICK_GLOW_SPEED: f32 = 2.5;

    /// Power-up capsule size
    pub const POWERUP_WIDTH: f32 = 24.0;
    pub const POWERUP_HEIGHT: f32 = 12.0;

    /// Laser beams
    pub const LASER_WIDTH: f32 = 4.0;
    pub const LASER_HEIGHT: f32 = 14.0;
    pub const LASER_SPEED: f32 = 520.0;
    pub const MAX_LASERS: usize = 3;

    /// Scoring
    pub const BRICK_HIT_SCORE: u64 = 10;
    pub const LASER_HIT_SCORE: u64 = 10;
}
