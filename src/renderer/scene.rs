//! Per-screen drawing
//!
//! Reads the game and issues draw calls; holds no state of its own.

use glam::Vec2;

use super::{Color, Renderer, colors, shade, with_alpha};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::game::{Game, GameMode};
use crate::highscore::ScoreStorage;
use crate::sim::{HealthTier, PowerUpKind, Rect, World};
use crate::ui;

const TITLE_SCALE: f32 = 3.0;
const LABEL_SCALE: f32 = 1.5;
const HUD_SCALE: f32 = 1.0;
/// Approximate glyph advance at scale 1.0, used to center labels
const GLYPH_WIDTH: f32 = 8.0;
const GLYPH_HEIGHT: f32 = 12.0;

pub fn tier_color(tier: HealthTier) -> Color {
    match tier {
        HealthTier::Tier0 => colors::BRICK_TIER0,
        HealthTier::Tier1 => colors::BRICK_TIER1,
        HealthTier::Damaged => colors::BRICK_DAMAGED,
    }
}

pub fn powerup_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::MultiBall => colors::POWERUP_MULTI_BALL,
        PowerUpKind::WidePaddle => colors::POWERUP_WIDE_PADDLE,
        PowerUpKind::SlowBall => colors::POWERUP_SLOW_BALL,
        PowerUpKind::ExtraLife => colors::POWERUP_EXTRA_LIFE,
        PowerUpKind::Laser => colors::POWERUP_LASER,
        PowerUpKind::Sticky => colors::POWERUP_STICKY,
    }
}

/// Draw whatever screen the game is on
pub fn draw<S: ScoreStorage>(game: &Game<S>, r: &mut impl Renderer) {
    r.clear(colors::BACKGROUND);

    match game.mode() {
        GameMode::Menu => draw_menu(game, r),
        GameMode::LevelSelect => draw_level_select(game, r),
        GameMode::Playing | GameMode::Paused => {
            if let Some(world) = game.world() {
                draw_world(world, r);
                draw_particles(game, r);
                draw_hud(game, world, r);
            }
            if game.mode() == GameMode::Paused {
                r.clear(colors::OVERLAY);
                centered_text(r, "PAUSED", PLAYFIELD_HEIGHT / 2.0 - 30.0, TITLE_SCALE, colors::TEXT);
                centered_text(
                    r,
                    "P to resume, ESC for menu",
                    PLAYFIELD_HEIGHT / 2.0 + 20.0,
                    HUD_SCALE,
                    colors::TEXT_DIM,
                );
            }
        }
        GameMode::Win => draw_win(game, r),
    }
}

fn draw_menu<S: ScoreStorage>(game: &Game<S>, r: &mut impl Renderer) {
    centered_text(r, "RUNE BREAKER", 120.0, TITLE_SCALE, colors::TEXT);
    draw_button(r, ui::play_button(), "PLAY", colors::BUTTON_PLAY);
    draw_button(r, ui::levels_button(), "LEVELS", colors::BUTTON_LEVELS);

    let best = format!("HIGH SCORE {}", game.high_score());
    centered_text(r, &best, 420.0, LABEL_SCALE, colors::TEXT);

    if let Some(run) = game.last_run() {
        let line = if run.new_high_score {
            format!("LAST RUN {} - NEW HIGH SCORE!", run.score)
        } else {
            format!("LAST RUN {} (LEVEL {})", run.score, run.level)
        };
        centered_text(r, &line, 460.0, HUD_SCALE, colors::TEXT_DIM);
    }
}

fn draw_level_select<S: ScoreStorage>(game: &Game<S>, r: &mut impl Renderer) {
    draw_button(r, ui::back_button(), "BACK", colors::BUTTON_BACK);
    centered_text(r, "SELECT LEVEL", 100.0, 2.0, colors::TEXT);

    let max_levels = game.settings().tuning.max_levels;
    for level in 1..=max_levels {
        let unlocked = level <= game.unlocked_level();
        let color = if unlocked {
            colors::LEVEL_UNLOCKED
        } else {
            colors::LEVEL_LOCKED
        };
        draw_button(r, ui::level_button(level, max_levels), &level.to_string(), color);
    }
}

fn draw_win<S: ScoreStorage>(game: &Game<S>, r: &mut impl Renderer) {
    centered_text(r, "VICTORY!", 140.0, TITLE_SCALE, colors::TEXT);
    if let Some(run) = game.last_run() {
        let line = format!("FINAL SCORE {}", run.score);
        centered_text(r, &line, 200.0, LABEL_SCALE, colors::TEXT);
        if run.new_high_score {
            centered_text(r, "NEW HIGH SCORE!", 235.0, HUD_SCALE, colors::SCORE_BAR);
        }
    }
    draw_button(r, ui::continue_button(), "MENU", colors::BUTTON_PLAY);
}

/// Playfield contents: border, bricks, paddle, balls, capsules, beams
pub fn draw_world(world: &World, r: &mut impl Renderer) {
    r.outline_rect(
        Rect::new(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        2.0,
        colors::BORDER,
    );

    for brick in world.bricks.iter().filter(|b| b.alive) {
        let glow = 0.85 + 0.15 * brick.glow_phase.sin();
        r.fill_rect(brick.rect, shade(tier_color(brick.tier), glow));
        // Rune mark: a small inset stripe whose width encodes the rune index
        let inner = brick.rect.inset(6.0);
        let mark_width = inner.w() * (brick.rune as f32 + 1.0) / crate::consts::RUNE_COUNT as f32;
        r.fill_rect(
            Rect::new(inner.x(), inner.y() + inner.h() / 2.0 - 1.0, mark_width, 2.0),
            colors::RUNE,
        );
    }

    let paddle_color = if world.effects.sticky {
        colors::PADDLE_STICKY
    } else {
        colors::PADDLE
    };
    r.fill_rect(world.paddle.rect, paddle_color);

    for ball in world.balls.iter().filter(|b| b.active) {
        r.fill_rect(ball.rect, colors::BALL);
    }

    for powerup in &world.powerups {
        r.fill_rect(powerup.rect, powerup_color(powerup.kind));
        let label_pos = powerup.rect.center() - Vec2::new(GLYPH_WIDTH / 2.0, GLYPH_HEIGHT / 2.0);
        r.draw_text(powerup.kind.label(), label_pos, HUD_SCALE, colors::BACKGROUND);
    }

    for beam in &world.lasers {
        r.fill_rect(beam.rect, colors::LASER);
    }
}

fn draw_particles<S: ScoreStorage>(game: &Game<S>, r: &mut impl Renderer) {
    for particle in game.particles().iter() {
        let rect = Rect::from_center(particle.pos, Vec2::splat(particle.size));
        let alpha = particle.color[3] * particle.life.clamp(0.0, 1.0);
        r.fill_rect(rect, with_alpha(particle.color, alpha));
    }
}

fn draw_hud<S: ScoreStorage>(game: &Game<S>, world: &World, r: &mut impl Renderer) {
    // Score bar along the top-left grows with the score and wraps
    let bar_width = (world.score / 10 % 200 + 50) as f32;
    r.fill_rect(Rect::new(10.0, 10.0, bar_width, 10.0), colors::SCORE_BAR);

    for i in 0..world.lives {
        let heart = Rect::new(PLAYFIELD_WIDTH - 20.0 - i as f32 * 20.0, 10.0, 10.0, 10.0);
        r.fill_rect(heart, colors::HEART);
    }

    r.draw_text(
        &format!("SCORE {}", world.score),
        Vec2::new(10.0, 26.0),
        HUD_SCALE,
        colors::TEXT,
    );
    r.draw_text(
        &format!("BEST {}", game.high_score().max(world.score)),
        Vec2::new(160.0, 26.0),
        HUD_SCALE,
        colors::TEXT_DIM,
    );
    centered_text(r, &format!("LEVEL {}", world.level), 10.0, HUD_SCALE, colors::TEXT);

    let mut status = Vec::new();
    if world.combo > 1 {
        status.push(format!("COMBO x{}", world.combo));
    }
    if world.effects.laser_active() {
        status.push(format!("LASER {:.1}s", world.effects.laser_timer));
    }
    if world.effects.sticky {
        status.push("STICKY".to_string());
    }
    if game.settings().show_fps {
        status.push(format!("{:.0} FPS", game.fps()));
    }
    for (i, line) in status.iter().enumerate() {
        r.draw_text(
            line,
            Vec2::new(PLAYFIELD_WIDTH - 160.0, 26.0 + i as f32 * 16.0),
            HUD_SCALE,
            colors::TEXT,
        );
    }

    if !world.launched {
        centered_text(
            r,
            "SPACE to launch",
            PLAYFIELD_HEIGHT / 2.0 + 60.0,
            HUD_SCALE,
            colors::TEXT_DIM,
        );
    }
}

fn draw_button(r: &mut impl Renderer, rect: Rect, label: &str, color: Color) {
    r.fill_rect(rect, shade(color, 0.35));
    r.outline_rect(rect, 3.0, color);
    let size = text_size(label, LABEL_SCALE);
    r.draw_text(label, rect.center() - size / 2.0, LABEL_SCALE, colors::TEXT);
}

fn text_size(text: &str, scale: f32) -> Vec2 {
    Vec2::new(
        text.chars().count() as f32 * GLYPH_WIDTH * scale,
        GLYPH_HEIGHT * scale,
    )
}

fn centered_text(r: &mut impl Renderer, text: &str, y: f32, scale: f32, color: Color) {
    let x = (PLAYFIELD_WIDTH - text_size(text, scale).x) / 2.0;
    r.draw_text(text, Vec2::new(x, y), scale, color);
}
