//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Every entity is an axis-aligned rectangle
//! - Seeded RNG only (one `Pcg32` per run)
//! - One clamped time delta per frame

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{WallContact, bounce_off_walls, intersects, paddle_bounce_vx};
pub use level::generate_level;
pub use rect::Rect;
pub use state::{
    ActiveEffects, Ball, Brick, HealthTier, LaserBeam, Paddle, PowerUp, PowerUpKind, StuckBall,
    World,
};
pub use tick::{BurstKind, GameEvent, ParticleBurst, TickEffects, TickInput, combo_score, tick};
