//! World state and core simulation types
//!
//! The [`World`] owns every live entity of the current run plus the
//! run-level counters (score, lives, combo, power-up timers). It is owned by
//! the game state machine and mutated only by [`super::tick`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::generate_level;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Visual category of a brick derived from its remaining vs maximum hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthTier {
    /// One-hit brick
    Tier0,
    /// Multi-hit brick at full health
    Tier1,
    /// Multi-hit brick that has taken damage
    Damaged,
}

impl HealthTier {
    pub fn from_hits(hits_remaining: u8, max_hits: u8) -> Self {
        if max_hits <= 1 {
            HealthTier::Tier0
        } else if hits_remaining >= max_hits {
            HealthTier::Tier1
        } else {
            HealthTier::Damaged
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub hits_remaining: u8,
    pub max_hits: u8,
    pub alive: bool,
    /// Rune decoration index (cosmetic)
    pub rune: u8,
    /// Glow animation phase (radians)
    pub glow_phase: f32,
    pub tier: HealthTier,
}

impl Brick {
    pub fn new(rect: Rect, max_hits: u8, rune: u8, glow_phase: f32) -> Self {
        let max_hits = max_hits.max(1);
        Self {
            rect,
            hits_remaining: max_hits,
            max_hits,
            alive: true,
            rune,
            glow_phase,
            tier: HealthTier::from_hits(max_hits, max_hits),
        }
    }

    /// Apply one point of damage. Returns true if this hit destroyed the brick.
    ///
    /// Dead bricks ignore further damage, so `alive` flips exactly once.
    pub fn damage(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        if self.hits_remaining == 0 {
            self.alive = false;
            true
        } else {
            self.tier = HealthTier::from_hits(self.hits_remaining, self.max_hits);
            false
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    pub active: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            rect: Rect {
                pos,
                size: Vec2::splat(BALL_SIZE),
            },
            vel,
            active: true,
        }
    }

    /// Place the ball centered just above the paddle's top edge
    pub fn pin_to(&mut self, paddle: &Paddle) {
        self.rect.pos = Vec2::new(
            paddle.rect.center().x - self.rect.w() / 2.0,
            paddle.rect.y() - self.rect.h() - BALL_REST_GAP,
        );
    }
}

/// A ball caught by the sticky paddle
///
/// Refers to the ball by id, never by position in the collection, and is
/// validated on every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StuckBall {
    pub ball_id: u32,
    /// Ball x minus paddle x at the moment of capture
    pub offset: f32,
    /// Vertical velocity the ball had when it was caught
    pub caught_vy: f32,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Width the paddle is easing toward (power-up driven)
    pub target_width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                (PLAYFIELD_WIDTH - PADDLE_DEFAULT_WIDTH) / 2.0,
                PLAYFIELD_HEIGHT - PADDLE_BOTTOM_GAP,
                PADDLE_DEFAULT_WIDTH,
                PADDLE_HEIGHT,
            ),
            target_width: PADDLE_DEFAULT_WIDTH,
        }
    }
}

impl Paddle {
    /// Shift horizontally and clamp to the playfield
    pub fn move_by(&mut self, dx: f32) {
        self.rect.pos.x += dx;
        self.clamp_to_playfield();
    }

    pub fn clamp_to_playfield(&mut self) {
        let max_x = (PLAYFIELD_WIDTH - self.rect.w()).max(0.0);
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, max_x);
    }

    /// Ease the width toward the target without overshooting, keeping the
    /// paddle centered on the same point
    pub fn ease_width(&mut self, dt: f32) {
        let current = self.rect.w();
        let delta = self.target_width - current;
        if delta == 0.0 {
            return;
        }
        let step = (PADDLE_RESIZE_RATE * dt).min(delta.abs());
        let new_width = current + step * delta.signum();
        let center_x = self.rect.center().x;
        self.rect.size.x = new_width;
        self.rect.pos.x = center_x - new_width / 2.0;
        self.clamp_to_playfield();
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    MultiBall,
    WidePaddle,
    SlowBall,
    ExtraLife,
    Laser,
    Sticky,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::MultiBall,
        PowerUpKind::WidePaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::ExtraLife,
        PowerUpKind::Laser,
        PowerUpKind::Sticky,
    ];

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Short capsule label
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::MultiBall => "M",
            PowerUpKind::WidePaddle => "W",
            PowerUpKind::SlowBall => "S",
            PowerUpKind::ExtraLife => "+",
            PowerUpKind::Laser => "L",
            PowerUpKind::Sticky => "G",
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub fall_speed: f32,
}

impl PowerUp {
    /// Capsule whose top-center sits at `top_center`
    pub fn new(kind: PowerUpKind, top_center: Vec2, fall_speed: f32) -> Self {
        Self {
            kind,
            rect: Rect::new(
                top_center.x - POWERUP_WIDTH / 2.0,
                top_center.y,
                POWERUP_WIDTH,
                POWERUP_HEIGHT,
            ),
            fall_speed,
        }
    }
}

/// A laser beam travelling up from the paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserBeam {
    pub rect: Rect,
    pub speed: f32,
}

/// Active power-up effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Paddle catches balls instead of bouncing them
    pub sticky: bool,
    /// Seconds of laser left (0 = unarmed)
    pub laser_timer: f32,
}

impl ActiveEffects {
    pub fn laser_active(&self) -> bool {
        self.laser_timer > 0.0
    }
}

/// Everything that changes during a run
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Consecutive hits inside the combo window
    pub combo: u32,
    /// Seconds left in the combo window
    pub combo_timer: f32,
    /// Whether the primary ball has left the paddle this serve
    pub launched: bool,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<PowerUp>,
    pub lasers: Vec<LaserBeam>,
    pub effects: ActiveEffects,
    stuck: Option<StuckBall>,
    /// Seconds simulated since the run started
    pub time: f32,
    next_id: u32,
}

impl World {
    /// Start a fresh run at `level`
    pub fn new(level: u32, tuning: Tuning, seed: u64) -> Self {
        let level = level.clamp(1, tuning.max_levels.max(1));
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.starting_lives,
            tuning,
            level,
            score: 0,
            combo: 0,
            combo_timer: 0.0,
            launched: false,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            lasers: Vec::new(),
            effects: ActiveEffects::default(),
            stuck: None,
            time: 0.0,
            next_id: 1,
        };
        world.start_level(level);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lay out `level` and reset everything a new level resets
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        let rows = self.tuning.rows_for_level(level);
        self.bricks = generate_level(rows, BRICK_COLUMNS, PLAYFIELD_WIDTH, level, &mut self.rng);
        self.paddle = Paddle::default();
        self.effects = ActiveEffects::default();
        self.combo = 0;
        self.combo_timer = 0.0;
        self.reset_serve();
        log::info!(
            "Level {}: {} bricks in {} rows",
            level,
            self.bricks.len(),
            rows
        );
    }

    /// Replace all balls with one unlaunched ball on the paddle and drop
    /// in-flight power-ups, beams and the sticky catch
    pub fn reset_serve(&mut self) {
        self.balls.clear();
        self.stuck = None;
        self.powerups.clear();
        self.lasers.clear();
        self.launched = false;
        self.effects.sticky = false;
        self.paddle.target_width = PADDLE_DEFAULT_WIDTH;

        let speed = self.tuning.ball_speed_for_level(self.level);
        let id = self.next_entity_id();
        let mut ball = Ball::new(id, Vec2::ZERO, Vec2::new(speed, -speed));
        ball.pin_to(&self.paddle);
        self.balls.push(ball);
    }

    /// Number of bricks still standing
    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Current sticky catch, if the ball it refers to still exists
    pub fn stuck(&self) -> Option<StuckBall> {
        self.stuck
            .filter(|s| self.balls.iter().any(|b| b.id == s.ball_id && b.active))
    }

    /// Index of the stuck ball in `balls` together with the catch,
    /// clearing a stale catch
    pub fn stuck_ball_index(&mut self) -> Option<(usize, StuckBall)> {
        let stuck = self.stuck?;
        let index = self
            .balls
            .iter()
            .position(|b| b.id == stuck.ball_id && b.active);
        if index.is_none() {
            self.stuck = None;
        }
        index.map(|i| (i, stuck))
    }

    pub(crate) fn set_stuck(&mut self, stuck: StuckBall) {
        self.stuck = Some(stuck);
    }

    /// Scale the vertical speed a caught ball will be released with
    pub(crate) fn scale_stuck_vy(&mut self, factor: f32) {
        if let Some(stuck) = self.stuck.as_mut() {
            stuck.caught_vy *= factor;
        }
    }

    pub(crate) fn take_stuck(&mut self) -> Option<StuckBall> {
        self.stuck.take()
    }

    /// Drop inactive balls, invalidating the catch if its ball is gone
    pub fn remove_inactive_balls(&mut self) {
        self.balls.retain(|b| b.active);
        if let Some(stuck) = self.stuck {
            if !self.balls.iter().any(|b| b.id == stuck.ball_id) {
                self.stuck = None;
            }
        }
    }

    /// Debug: destroy every brick without scoring
    pub fn clear_bricks(&mut self) {
        for brick in &mut self.bricks {
            brick.hits_remaining = 0;
            brick.alive = false;
        }
    }
}
