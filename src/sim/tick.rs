//! Per-frame simulation step
//!
//! Advances the world by one (clamped) time delta. The order of the stages
//! below matters: paddle before launch, launch before ball motion, ball loss
//! before any collision, bricks before lasers before power-ups, and the
//! level-clear check last.

use glam::Vec2;
use rand::Rng;

use super::collision::{bounce_off_walls, intersects, paddle_bounce_vx};
use super::rect::Rect;
use super::state::{Ball, HealthTier, LaserBeam, PowerUp, PowerUpKind, StuckBall, World};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move paddle left (held)
    pub move_left: bool,
    /// Move paddle right (held)
    pub move_right: bool,
    /// Launch / release / fire (momentary)
    pub launch: bool,
    /// Idle/demo mode - the paddle plays itself
    pub idle_mode: bool,
}

/// Something gameplay-relevant that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Launched,
    PaddleHit,
    BallCaught,
    BallReleased,
    LaserFired,
    BrickDamaged { tier: HealthTier },
    BrickDestroyed,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    LifeLost { lives_left: u32 },
    GameOver,
    LevelComplete { next_level: u32 },
    Victory,
}

/// What a particle burst should look like
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstKind {
    /// Brick destroyed (tier it had before the final hit)
    Shatter(HealthTier),
    /// Brick damaged but standing (its new tier)
    Chip(HealthTier),
    /// Power-up collected
    Pickup(PowerUpKind),
    /// Moving ball trail
    Trail,
}

/// Particle spawn request for the renderer side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBurst {
    pub origin: Vec2,
    pub kind: BurstKind,
    pub count: u32,
}

/// Everything a tick produced besides the world mutation itself
#[derive(Debug, Clone, Default)]
pub struct TickEffects {
    pub score_delta: u64,
    pub events: Vec<GameEvent>,
    pub bursts: Vec<ParticleBurst>,
}

impl TickEffects {
    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn game_over(&self) -> bool {
        self.contains(&GameEvent::GameOver)
    }

    pub fn victory(&self) -> bool {
        self.contains(&GameEvent::Victory)
    }

    /// Level number the tick advanced to, if any
    pub fn level_complete(&self) -> Option<u32> {
        self.events.iter().find_map(|e| match e {
            GameEvent::LevelComplete { next_level } => Some(*next_level),
            _ => None,
        })
    }

    fn burst(&mut self, origin: Vec2, kind: BurstKind, count: u32) {
        self.bursts.push(ParticleBurst {
            origin,
            kind,
            count,
        });
    }
}

/// Points for a ball hit at the given combo count
///
/// Every third consecutive hit inside the combo window raises the award.
pub fn combo_score(combo: u32) -> u64 {
    BRICK_HIT_SCORE * u64::from((combo / 3).max(1))
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> TickEffects {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let mut fx = TickEffects::default();

    let input = if input.idle_mode {
        autopilot(world, input)
    } else {
        input.clone()
    };

    world.time += dt;

    advance_timers(world, dt);
    move_paddle(world, &input, dt);
    handle_launch(world, &input, &mut fx);
    if world.launched {
        move_balls(world, dt);
    }
    if !resolve_ball_loss(world, &mut fx) {
        return fx;
    }
    paddle_contacts(world, &mut fx);
    brick_collisions(world, &mut fx);
    update_lasers(world, dt, &mut fx);
    update_powerups(world, dt, &mut fx);
    check_level_clear(world, &mut fx);

    if world.launched {
        let stuck_id = world.stuck().map(|s| s.ball_id);
        for ball in world.balls.iter().filter(|b| b.active && Some(b.id) != stuck_id) {
            fx.burst(ball.rect.center(), BurstKind::Trail, 1);
        }
    }

    fx
}

/// Cosmetic phases, combo window and power-up timers
fn advance_timers(world: &mut World, dt: f32) {
    for brick in &mut world.bricks {
        brick.glow_phase = (brick.glow_phase + BRICK_GLOW_SPEED * dt) % std::f32::consts::TAU;
    }

    if world.combo_timer > 0.0 {
        world.combo_timer -= dt;
        if world.combo_timer <= 0.0 {
            world.combo_timer = 0.0;
            world.combo = 0;
        }
    }

    if world.effects.laser_timer > 0.0 {
        world.effects.laser_timer -= dt;
        if world.effects.laser_timer <= 0.0 {
            world.effects.laser_timer = 0.0;
            log::debug!("Laser expired");
        }
    }
}

fn move_paddle(world: &mut World, input: &TickInput, dt: f32) {
    let mut direction = 0.0;
    if input.move_left {
        direction -= 1.0;
    }
    if input.move_right {
        direction += 1.0;
    }
    world
        .paddle
        .move_by(direction * world.tuning.paddle_speed * dt);
    world.paddle.ease_width(dt);
}

/// Serve pinning, launch, sticky release and laser fire
fn handle_launch(world: &mut World, input: &TickInput, fx: &mut TickEffects) {
    if !world.launched {
        if let Some(ball) = world.balls.first_mut() {
            ball.pin_to(&world.paddle);
        }
        if input.launch {
            world.launched = true;
            fx.events.push(GameEvent::Launched);
        }
        return;
    }

    let paddle = world.paddle.rect;
    if let Some((index, stuck)) = world.stuck_ball_index() {
        if input.launch {
            world.take_stuck();
            let ball = &mut world.balls[index];
            ball.vel.y = -stuck.caught_vy.abs();
            fx.events.push(GameEvent::BallReleased);
            return;
        }
        let ball = &mut world.balls[index];
        let max_x = PLAYFIELD_WIDTH - ball.rect.w();
        ball.rect.pos.x = (paddle.x() + stuck.offset).clamp(0.0, max_x);
        ball.rect.pos.y = paddle.y() - ball.rect.h();
    }

    if input.launch && world.effects.laser_active() && world.lasers.len() < MAX_LASERS {
        world.lasers.push(LaserBeam {
            rect: Rect::new(
                paddle.center().x - LASER_WIDTH / 2.0,
                paddle.y() - LASER_HEIGHT,
                LASER_WIDTH,
                LASER_HEIGHT,
            ),
            speed: LASER_SPEED,
        });
        fx.events.push(GameEvent::LaserFired);
    }
}

/// Integrate free balls and bounce them off the side and top walls
fn move_balls(world: &mut World, dt: f32) {
    let stuck_id = world.stuck().map(|s| s.ball_id);
    for ball in world.balls.iter_mut().filter(|b| b.active) {
        if Some(ball.id) == stuck_id {
            continue;
        }
        ball.rect.pos += ball.vel * dt;
        bounce_off_walls(&mut ball.rect, &mut ball.vel, PLAYFIELD_WIDTH);
        if ball.rect.bottom() > PLAYFIELD_HEIGHT {
            ball.active = false;
        }
    }
}

/// Remove lost balls; returns false when the run is over
fn resolve_ball_loss(world: &mut World, fx: &mut TickEffects) -> bool {
    world.remove_inactive_balls();
    if !world.balls.is_empty() {
        return true;
    }

    world.lives = world.lives.saturating_sub(1);
    world.combo = 0;
    world.combo_timer = 0.0;

    if world.lives == 0 {
        log::info!("Game over at level {} with {} points", world.level, world.score);
        fx.events.push(GameEvent::GameOver);
        return false;
    }

    log::info!("Ball lost, {} lives left", world.lives);
    fx.events.push(GameEvent::LifeLost {
        lives_left: world.lives,
    });
    world.reset_serve();
    true
}

/// Bounce (or catch) balls falling onto the paddle
fn paddle_contacts(world: &mut World, fx: &mut TickEffects) {
    let paddle = world.paddle.rect;
    let stuck_id = world.stuck().map(|s| s.ball_id);
    let can_catch = world.effects.sticky && stuck_id.is_none();
    let mut caught: Option<StuckBall> = None;

    for ball in world.balls.iter_mut().filter(|b| b.active) {
        if Some(ball.id) == stuck_id || ball.vel.y <= 0.0 || !intersects(&ball.rect, &paddle) {
            continue;
        }

        // Rest exactly on the top edge so the next frame can't bounce again
        ball.rect.pos.y = paddle.y() - ball.rect.h();

        if can_catch && caught.is_none() {
            caught = Some(StuckBall {
                ball_id: ball.id,
                offset: ball.rect.x() - paddle.x(),
                caught_vy: ball.vel.y,
            });
            fx.events.push(GameEvent::BallCaught);
        } else {
            ball.vel.x = paddle_bounce_vx(&ball.rect, &paddle, PADDLE_BOUNCE_MAX_VX);
            ball.vel.y = -ball.vel.y.abs();
            fx.events.push(GameEvent::PaddleHit);
        }
    }

    if let Some(stuck) = caught {
        world.set_stuck(stuck);
    }
}

/// Ball vs bricks, first overlapping brick per ball wins
fn brick_collisions(world: &mut World, fx: &mut TickEffects) {
    let stuck_id = world.stuck().map(|s| s.ball_id);

    for ball_index in 0..world.balls.len() {
        let ball = &world.balls[ball_index];
        if !ball.active || Some(ball.id) == stuck_id {
            continue;
        }
        let ball_rect = ball.rect;

        let Some(brick_index) = world
            .bricks
            .iter()
            .position(|b| b.alive && intersects(&ball_rect, &b.rect))
        else {
            continue;
        };

        damage_brick(world, brick_index, fx);
        let ball = &mut world.balls[ball_index];
        ball.vel.y = -ball.vel.y;

        world.combo += 1;
        world.combo_timer = world.tuning.combo_window;
        award(world, fx, combo_score(world.combo));
    }
}

/// One point of damage to a brick, with drop roll and particle requests
fn damage_brick(world: &mut World, index: usize, fx: &mut TickEffects) {
    let brick = &mut world.bricks[index];
    let rect = brick.rect;
    let tier_before = brick.tier;

    if !brick.damage() {
        let tier = brick.tier;
        fx.events.push(GameEvent::BrickDamaged { tier });
        fx.burst(rect.center(), BurstKind::Chip(tier), 4);
        return;
    }

    fx.events.push(GameEvent::BrickDestroyed);
    fx.burst(rect.center(), BurstKind::Shatter(tier_before), 12);

    let chance = world.tuning.powerup_drop_chance.clamp(0.0, 1.0);
    if world.rng.random_bool(chance) {
        let kind = PowerUpKind::random(&mut world.rng);
        let fall_speed = world.tuning.powerup_fall_speed;
        world
            .powerups
            .push(PowerUp::new(kind, rect.top_center(), fall_speed));
        fx.events.push(GameEvent::PowerUpSpawned(kind));
    }
}

fn award(world: &mut World, fx: &mut TickEffects, points: u64) {
    world.score += points;
    fx.score_delta += points;
}

/// Move beams up; each beam damages the first brick it touches and is spent
fn update_lasers(world: &mut World, dt: f32, fx: &mut TickEffects) {
    for beam in &mut world.lasers {
        beam.rect.pos.y -= beam.speed * dt;
    }
    world.lasers.retain(|beam| beam.rect.bottom() > 0.0);

    let mut i = 0;
    while i < world.lasers.len() {
        let beam_rect = world.lasers[i].rect;
        let hit = world
            .bricks
            .iter()
            .position(|b| b.alive && intersects(&beam_rect, &b.rect));
        match hit {
            Some(brick_index) => {
                damage_brick(world, brick_index, fx);
                award(world, fx, LASER_HIT_SCORE);
                world.lasers.remove(i);
            }
            None => i += 1,
        }
    }
}

/// Drop capsules and collect the ones touching the paddle
fn update_powerups(world: &mut World, dt: f32, fx: &mut TickEffects) {
    for powerup in &mut world.powerups {
        powerup.rect.pos.y += powerup.fall_speed * dt;
    }
    world
        .powerups
        .retain(|p| p.rect.y() <= PLAYFIELD_HEIGHT);

    let paddle = world.paddle.rect;
    let (collected, falling): (Vec<PowerUp>, Vec<PowerUp>) = std::mem::take(&mut world.powerups)
        .into_iter()
        .partition(|p| intersects(&p.rect, &paddle));
    world.powerups = falling;

    for powerup in collected {
        fx.burst(powerup.rect.center(), BurstKind::Pickup(powerup.kind), 10);
        apply_powerup(world, powerup.kind, fx);
    }
}

fn apply_powerup(world: &mut World, kind: PowerUpKind, fx: &mut TickEffects) {
    log::debug!("Collected {:?}", kind);
    fx.events.push(GameEvent::PowerUpCollected(kind));

    match kind {
        PowerUpKind::MultiBall => {
            let Some(source) = world.balls.iter().find(|b| b.active).cloned() else {
                return;
            };
            let spread = world.tuning.multiball_spread;
            for offset in [-spread, spread] {
                let id = world.next_entity_id();
                let vel = Vec2::new(source.vel.x + offset, source.vel.y);
                let mut clone = Ball::new(id, source.rect.pos, vel);
                clone.rect = source.rect;
                world.balls.push(clone);
            }
        }
        PowerUpKind::WidePaddle => {
            let target = world.paddle.target_width + world.tuning.wide_paddle_bonus;
            world.paddle.target_width = target.min(PADDLE_MAX_WIDTH);
        }
        PowerUpKind::SlowBall => {
            let factor = world.tuning.slow_factor;
            for ball in world.balls.iter_mut().filter(|b| b.active) {
                ball.vel *= factor;
            }
            world.scale_stuck_vy(factor);
        }
        PowerUpKind::ExtraLife => {
            world.lives += 1;
        }
        PowerUpKind::Laser => {
            world.effects.laser_timer = world.tuning.laser_duration;
        }
        PowerUpKind::Sticky => {
            world.effects.sticky = true;
        }
    }
}

/// Advance to the next level, or report victory on the last one
fn check_level_clear(world: &mut World, fx: &mut TickEffects) {
    if world.alive_bricks() > 0 {
        return;
    }

    if world.tuning.is_final_level(world.level) {
        log::info!("Final level {} cleared with {} points", world.level, world.score);
        fx.events.push(GameEvent::Victory);
        return;
    }

    let next_level = world.level + 1;
    world.start_level(next_level);
    fx.events.push(GameEvent::LevelComplete { next_level });
}

/// Demo player: follow the lowest falling ball, grab capsules when safe
fn autopilot(world: &World, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    if !world.launched || world.stuck().is_some() || world.effects.laser_active() {
        input.launch = true;
    }

    let lowest_falling = world
        .balls
        .iter()
        .filter(|b| b.active && b.vel.y > 0.0)
        .max_by(|a, b| {
            a.rect
                .y()
                .partial_cmp(&b.rect.y())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let nearest_capsule = world.powerups.iter().max_by(|a, b| {
        a.rect
            .y()
            .partial_cmp(&b.rect.y())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let target_x = lowest_falling
        .map(|b| b.rect.center().x)
        .or_else(|| nearest_capsule.map(|p| p.rect.center().x))
        .or_else(|| world.balls.first().map(|b| b.rect.center().x));

    if let Some(target_x) = target_x {
        // Aim slightly off-center so rallies don't loop forever
        let aim = (world.time * 0.7).sin() * world.paddle.rect.w() * 0.3;
        let paddle_x = world.paddle.rect.center().x + aim;
        input.move_left = target_x < paddle_x - 4.0;
        input.move_right = target_x > paddle_x + 4.0;
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Brick;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn launch() -> TickInput {
        TickInput {
            launch: true,
            ..Default::default()
        }
    }

    /// Launched world with a single brick far from the action
    fn open_world(tuning: Tuning) -> World {
        let mut world = World::new(1, tuning, 1234);
        world.bricks = vec![Brick::new(Rect::new(4.0, 60.0, 70.0, 20.0), 1, 0, 0.0)];
        world.launched = true;
        world
    }

    #[test]
    fn test_serve_follows_paddle_until_launch() {
        let mut world = World::new(1, Tuning::default(), 1);
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut world, &right, DT);
        assert!(!world.launched);
        let ball = &world.balls[0];
        assert!((ball.rect.center().x - world.paddle.rect.center().x).abs() < 0.001);

        let fx = tick(&mut world, &launch(), DT);
        assert!(world.launched);
        assert!(fx.contains(&GameEvent::Launched));

        let y_before = world.balls[0].rect.y();
        tick(&mut world, &TickInput::default(), DT);
        assert!(world.balls[0].rect.y() < y_before);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(400.0, 300.0);
        world.balls[0].vel = Vec2::new(0.0, -100.0);
        tick(&mut world, &TickInput::default(), 5.0);
        assert!((world.balls[0].rect.y() - 290.0).abs() < 0.001);
    }

    #[test]
    fn test_combo_score_values() {
        let expected = [10, 10, 10, 10, 10, 20, 20, 20, 30];
        for (combo, points) in (1..=9).zip(expected) {
            assert_eq!(combo_score(combo), points, "combo {combo}");
            assert_eq!(combo_score(combo), 10 * u64::from((combo / 3).max(1)));
        }
    }

    #[test]
    fn test_consecutive_hits_build_combo() {
        let mut world = open_world(Tuning {
            powerup_drop_chance: 0.0,
            ..Default::default()
        });
        world.bricks = (0..7)
            .map(|i| Brick::new(Rect::new(10.0 + i as f32 * 80.0, 100.0, 70.0, 20.0), 1, 0, 0.0))
            .collect();

        let mut deltas = Vec::new();
        for i in 0..6 {
            world.balls[0].rect.pos = Vec2::new(40.0 + i as f32 * 80.0, 105.0);
            world.balls[0].vel = Vec2::new(0.0, -300.0);
            let fx = tick(&mut world, &TickInput::default(), 0.0);
            deltas.push(fx.score_delta);
        }
        assert_eq!(world.combo, 6);
        assert_eq!(deltas, vec![10, 10, 10, 10, 10, 20]);
        assert_eq!(world.score, 70);

        // Let the window lapse
        world.balls[0].rect.pos = Vec2::new(400.0, 300.0);
        tick(&mut world, &TickInput::default(), 0.1);
        for _ in 0..20 {
            tick(&mut world, &TickInput::default(), 0.1);
            world.balls[0].rect.pos = Vec2::new(400.0, 300.0);
        }
        assert_eq!(world.combo, 0);
    }

    #[test]
    fn test_brick_hit_first_match_only() {
        let mut world = open_world(Tuning {
            powerup_drop_chance: 0.0,
            ..Default::default()
        });
        world.bricks = vec![
            Brick::new(Rect::new(100.0, 100.0, 50.0, 20.0), 2, 0, 0.0),
            Brick::new(Rect::new(100.0, 118.0, 50.0, 20.0), 2, 0, 0.0),
        ];
        world.balls[0].rect.pos = Vec2::new(120.0, 114.0);
        world.balls[0].vel = Vec2::new(50.0, -300.0);

        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.bricks[0].hits_remaining, 1);
        assert_eq!(world.bricks[1].hits_remaining, 2);
        assert_eq!(world.balls[0].vel.y, 300.0);
        assert!(fx.contains(&GameEvent::BrickDamaged {
            tier: HealthTier::Damaged
        }));
    }

    #[test]
    fn test_forced_drop_spawns_one_powerup_at_brick_top_center() {
        let mut world = open_world(Tuning {
            powerup_drop_chance: 1.0,
            ..Default::default()
        });
        assert!(world.powerups.is_empty());
        let target = Rect::new(300.0, 150.0, 70.0, 20.0);
        world.bricks.push(Brick::new(target, 1, 0, 0.0));
        world.balls[0].rect.pos = Vec2::new(320.0, 165.0);
        world.balls[0].vel = Vec2::new(0.0, -300.0);

        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert!(!world.bricks[1].alive);
        assert!(fx.contains(&GameEvent::BrickDestroyed));
        assert_eq!(world.powerups.len(), 1);
        assert_eq!(world.powerups[0].rect.top_center(), target.top_center());
    }

    #[test]
    fn test_no_drop_when_chance_zero() {
        let mut world = open_world(Tuning {
            powerup_drop_chance: 0.0,
            ..Default::default()
        });
        world.bricks.push(Brick::new(Rect::new(300.0, 150.0, 70.0, 20.0), 1, 0, 0.0));
        world.balls[0].rect.pos = Vec2::new(320.0, 165.0);
        world.balls[0].vel = Vec2::new(0.0, -300.0);
        tick(&mut world, &TickInput::default(), 0.0);
        assert!(world.powerups.is_empty());
    }

    #[test]
    fn test_paddle_bounce_snaps_to_top_edge() {
        let mut world = open_world(Tuning::default());
        let paddle = world.paddle.rect;
        world.balls[0].rect.pos = Vec2::new(paddle.x() + paddle.w() - 5.0, paddle.y() - 5.0);
        world.balls[0].vel = Vec2::new(-100.0, 300.0);

        let fx = tick(&mut world, &TickInput::default(), 0.0);
        let ball = &world.balls[0];
        assert!(fx.contains(&GameEvent::PaddleHit));
        assert_eq!(ball.rect.bottom(), paddle.y());
        assert_eq!(ball.vel.y, -300.0);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_ball_moving_up_through_paddle_is_ignored() {
        let mut world = open_world(Tuning::default());
        let paddle = world.paddle.rect;
        world.balls[0].rect.pos = Vec2::new(paddle.center().x, paddle.y() + 2.0);
        world.balls[0].vel = Vec2::new(0.0, -300.0);
        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert!(!fx.contains(&GameEvent::PaddleHit));
        assert_eq!(world.balls[0].vel.y, -300.0);
    }

    #[test]
    fn test_sticky_catch_and_release() {
        let mut world = open_world(Tuning::default());
        world.effects.sticky = true;
        let paddle = world.paddle.rect;
        world.balls[0].rect.pos = Vec2::new(paddle.x() + 55.0, paddle.y() - 5.0);
        world.balls[0].vel = Vec2::new(120.0, 250.0);

        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert!(fx.contains(&GameEvent::BallCaught));
        assert!(world.stuck().is_some());

        // Motion is suspended; the ball rides the paddle
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut world, &right, DT);
        }
        let paddle = world.paddle.rect;
        let ball = &world.balls[0];
        assert!((ball.rect.x() - (paddle.x() + 55.0)).abs() < 0.001);
        assert_eq!(ball.rect.bottom(), paddle.y());

        let fx = tick(&mut world, &launch(), DT);
        assert!(fx.contains(&GameEvent::BallReleased));
        assert!(world.stuck().is_none());
        assert_eq!(world.balls[0].vel.y, -250.0);

        let y = world.balls[0].rect.y();
        tick(&mut world, &TickInput::default(), DT);
        assert!(world.balls[0].rect.y() < y);
    }

    #[test]
    fn test_slow_ball_while_stuck_slows_release() {
        let mut world = open_world(Tuning::default());
        world.effects.sticky = true;
        let paddle = world.paddle.rect;
        world.balls[0].rect.pos = Vec2::new(paddle.x() + 40.0, paddle.y() - 5.0);
        world.balls[0].vel = Vec2::new(100.0, 300.0);

        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert!(fx.contains(&GameEvent::BallCaught));

        world
            .powerups
            .push(PowerUp::new(PowerUpKind::SlowBall, paddle.top_center(), 150.0));
        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert!(fx.contains(&GameEvent::PowerUpCollected(PowerUpKind::SlowBall)));
        assert!((world.stuck().unwrap().caught_vy - 210.0).abs() < 0.001);

        let fx = tick(&mut world, &launch(), 0.0);
        assert!(fx.contains(&GameEvent::BallReleased));
        let vel = world.balls[0].vel;
        assert!((vel.x - 70.0).abs() < 0.001);
        assert!((vel.y + 0.7 * 300.0).abs() < 0.001);
    }

    #[test]
    fn test_sticky_catches_only_one_ball() {
        let mut world = open_world(Tuning::default());
        world.effects.sticky = true;
        let paddle = world.paddle.rect;
        let first = world.balls[0].clone();
        let mut second = first.clone();
        second.id = world.next_entity_id();
        world.balls.push(second);
        world.balls[0].rect.pos = Vec2::new(paddle.x() + 10.0, paddle.y() - 5.0);
        world.balls[0].vel = Vec2::new(0.0, 250.0);
        world.balls[1].rect.pos = Vec2::new(paddle.x() + 80.0, paddle.y() - 5.0);
        world.balls[1].vel = Vec2::new(0.0, 250.0);

        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.stuck().map(|s| s.ball_id), Some(world.balls[0].id));
        assert_eq!(world.balls[1].vel.y, -250.0);
    }

    #[test]
    fn test_life_lost_resets_serve() {
        let mut world = open_world(Tuning::default());
        world.effects.sticky = true;
        world.paddle.target_width = 200.0;
        world.balls[0].rect.pos = Vec2::new(400.0, 595.0);
        world.balls[0].vel = Vec2::new(0.0, 300.0);

        let fx = tick(&mut world, &TickInput::default(), DT);
        assert!(fx.contains(&GameEvent::LifeLost { lives_left: 2 }));
        assert_eq!(world.lives, 2);
        assert_eq!(world.balls.len(), 1);
        assert!(!world.launched);
        assert!(!world.effects.sticky);
        assert!(world.stuck().is_none());
        assert_eq!(world.paddle.target_width, PADDLE_DEFAULT_WIDTH);
    }

    #[test]
    fn test_last_ball_lost_on_last_life_is_game_over() {
        let mut world = open_world(Tuning::default());
        world.lives = 1;
        world.balls[0].rect.pos = Vec2::new(400.0, 595.0);
        world.balls[0].vel = Vec2::new(0.0, 300.0);

        let fx = tick(&mut world, &TickInput::default(), DT);
        assert!(fx.game_over());
        assert_eq!(world.lives, 0);
        assert!(world.balls.is_empty());
    }

    #[test]
    fn test_stuck_ball_removed_clears_relation() {
        let mut world = open_world(Tuning::default());
        let mut extra = world.balls[0].clone();
        extra.id = world.next_entity_id();
        extra.rect.pos = Vec2::new(400.0, 300.0);
        world.balls.push(extra);
        world.set_stuck(StuckBall {
            ball_id: world.balls[0].id,
            offset: 10.0,
            caught_vy: 200.0,
        });
        world.balls[0].active = false;

        tick(&mut world, &launch(), 0.0);
        assert_eq!(world.balls.len(), 1);
        assert!(world.stuck().is_none());
        assert_eq!(world.stuck_ball_index(), None);
        // Launch found nothing to release and the surviving ball kept moving
        assert_eq!(world.balls[0].rect.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_multiball_clones_with_symmetric_offsets() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(200.0, 300.0);
        world.balls[0].vel = Vec2::new(100.0, -380.0);
        let paddle = world.paddle.rect;
        world.powerups.push(PowerUp::new(
            PowerUpKind::MultiBall,
            paddle.top_center(),
            150.0,
        ));

        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert!(fx.contains(&GameEvent::PowerUpCollected(PowerUpKind::MultiBall)));
        assert_eq!(world.balls.len(), 3);
        let mut vxs: Vec<f32> = world.balls.iter().map(|b| b.vel.x).collect();
        vxs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(vxs, vec![-50.0, 100.0, 250.0]);
        let ids: std::collections::HashSet<u32> = world.balls.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_powerup_effects() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(200.0, 300.0);
        world.balls[0].vel = Vec2::new(100.0, -200.0);
        let paddle_top = world.paddle.rect.top_center();

        for kind in [
            PowerUpKind::SlowBall,
            PowerUpKind::ExtraLife,
            PowerUpKind::Laser,
            PowerUpKind::Sticky,
            PowerUpKind::WidePaddle,
        ] {
            world.powerups.push(PowerUp::new(kind, paddle_top, 150.0));
        }
        tick(&mut world, &TickInput::default(), 0.0);

        assert!(world.powerups.is_empty());
        assert!((world.balls[0].vel.x - 70.0).abs() < 0.001);
        assert!((world.balls[0].vel.y + 140.0).abs() < 0.001);
        assert_eq!(world.lives, 4);
        assert_eq!(world.effects.laser_timer, 8.0);
        assert!(world.effects.sticky);
        assert_eq!(world.paddle.target_width, PADDLE_DEFAULT_WIDTH + 60.0);
    }

    #[test]
    fn test_wide_paddle_capped() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(200.0, 300.0);
        let paddle_top = world.paddle.rect.top_center();
        for _ in 0..5 {
            world
                .powerups
                .push(PowerUp::new(PowerUpKind::WidePaddle, paddle_top, 150.0));
        }
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.paddle.target_width, PADDLE_MAX_WIDTH);
    }

    #[test]
    fn test_powerup_missed_falls_out() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(200.0, 300.0);
        world
            .powerups
            .push(PowerUp::new(PowerUpKind::ExtraLife, Vec2::new(20.0, 595.0), 150.0));
        tick(&mut world, &TickInput::default(), 0.1);
        assert!(world.powerups.is_empty());
        assert_eq!(world.lives, 3);
    }

    #[test]
    fn test_laser_fire_capped_at_three() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(200.0, 300.0);
        world.balls[0].vel = Vec2::new(0.0, -1.0);
        world.effects.laser_timer = 8.0;
        for _ in 0..5 {
            tick(&mut world, &launch(), 0.0);
        }
        assert_eq!(world.lasers.len(), MAX_LASERS);
    }

    #[test]
    fn test_laser_unarmed_does_not_fire() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(200.0, 300.0);
        tick(&mut world, &launch(), 0.0);
        assert!(world.lasers.is_empty());
    }

    #[test]
    fn test_laser_expires() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(200.0, 300.0);
        world.balls[0].vel = Vec2::ZERO;
        world.effects.laser_timer = 0.15;
        tick(&mut world, &TickInput::default(), 0.1);
        assert!(world.effects.laser_active());
        tick(&mut world, &TickInput::default(), 0.1);
        assert!(!world.effects.laser_active());
    }

    #[test]
    fn test_laser_hit_flat_score_no_combo() {
        let mut world = open_world(Tuning {
            powerup_drop_chance: 0.0,
            ..Default::default()
        });
        world.balls[0].rect.pos = Vec2::new(600.0, 400.0);
        world.balls[0].vel = Vec2::ZERO;
        world.bricks.push(Brick::new(Rect::new(380.0, 200.0, 40.0, 20.0), 2, 0, 0.0));
        world.lasers.push(LaserBeam {
            rect: Rect::new(398.0, 210.0, LASER_WIDTH, LASER_HEIGHT),
            speed: LASER_SPEED,
        });
        world.combo = 4;
        world.combo_timer = 1.0;

        let fx = tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(fx.score_delta, 10);
        assert_eq!(world.combo, 4);
        assert_eq!(world.bricks[1].hits_remaining, 1);
        assert!(world.lasers.is_empty());
    }

    #[test]
    fn test_laser_leaves_top() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(600.0, 400.0);
        world.lasers.push(LaserBeam {
            rect: Rect::new(500.0, 2.0, LASER_WIDTH, LASER_HEIGHT),
            speed: LASER_SPEED,
        });
        tick(&mut world, &TickInput::default(), 0.1);
        assert!(world.lasers.is_empty());
    }

    #[test]
    fn test_level_clear_advances() {
        let mut world = open_world(Tuning::default());
        world.effects.laser_timer = 3.0;
        world.clear_bricks();
        let fx = tick(&mut world, &TickInput::default(), DT);
        assert_eq!(fx.level_complete(), Some(2));
        assert_eq!(world.level, 2);
        assert_eq!(world.bricks.len(), 40);
        assert!(!world.launched);
        assert_eq!(world.balls.len(), 1);
        assert!(!world.effects.laser_active());
    }

    #[test]
    fn test_final_level_clear_is_victory() {
        let tuning = Tuning::default();
        let mut world = World::new(tuning.max_levels, tuning, 3);
        world.launched = true;
        world.clear_bricks();
        let fx = tick(&mut world, &TickInput::default(), DT);
        assert!(fx.victory());
        assert_eq!(fx.level_complete(), None);
        assert_eq!(world.level, 10);
    }

    #[test]
    fn test_wall_bounce_in_tick() {
        let mut world = open_world(Tuning::default());
        world.balls[0].rect.pos = Vec2::new(788.0, 300.0);
        world.balls[0].vel = Vec2::new(300.0, -100.0);
        tick(&mut world, &TickInput::default(), DT);
        let ball = &world.balls[0];
        assert_eq!(ball.vel.x, -300.0);
        assert_eq!(ball.rect.x(), PLAYFIELD_WIDTH - BALL_SIZE);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(3, Tuning::default(), 99999);
        let mut b = World::new(3, Tuning::default(), 99999);
        let demo = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &demo, DT);
            tick(&mut b, &demo, DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.balls.len(), b.balls.len());
        assert_eq!(a.alive_bricks(), b.alive_bricks());
        assert!((a.paddle.rect.x() - b.paddle.rect.x()).abs() < 0.0001);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_brick_hits_never_increase(seed in any::<u64>(), level in 1u32..=10) {
            let mut world = World::new(level, Tuning::default(), seed);
            let demo = TickInput { idle_mode: true, ..Default::default() };
            let mut snapshot: Vec<(u8, bool)> =
                world.bricks.iter().map(|b| (b.hits_remaining, b.alive)).collect();
            let mut current_level = world.level;

            for _ in 0..900 {
                let fx = tick(&mut world, &demo, DT);
                if fx.game_over() || fx.victory() {
                    break;
                }
                if world.level != current_level {
                    current_level = world.level;
                    snapshot = world.bricks.iter().map(|b| (b.hits_remaining, b.alive)).collect();
                    continue;
                }
                for (brick, (hits_before, alive_before)) in world.bricks.iter().zip(&snapshot) {
                    prop_assert!(brick.hits_remaining <= *hits_before);
                    prop_assert!(brick.hits_remaining <= brick.max_hits);
                    prop_assert_eq!(brick.alive, brick.hits_remaining > 0);
                    if !alive_before {
                        prop_assert!(!brick.alive);
                    }
                }
                snapshot = world.bricks.iter().map(|b| (b.hits_remaining, b.alive)).collect();
            }
        }

        #[test]
        fn prop_balls_stay_inside_side_walls(seed in any::<u64>()) {
            let mut world = World::new(1, Tuning::default(), seed);
            let demo = TickInput { idle_mode: true, ..Default::default() };
            for _ in 0..600 {
                let fx = tick(&mut world, &demo, DT);
                if fx.game_over() {
                    break;
                }
                for ball in &world.balls {
                    prop_assert!(ball.rect.x() >= 0.0);
                    prop_assert!(ball.rect.right() <= PLAYFIELD_WIDTH + 0.001);
                }
            }
        }
    }
}
