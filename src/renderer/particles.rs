//! Visual-only particles
//!
//! The simulation emits [`ParticleBurst`] requests; this system turns them
//! into short-lived sparks. Nothing here feeds back into gameplay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Color, colors, scene};
use crate::sim::{BurstKind, ParticleBurst};

/// Downward pull on sparks (units/s^2)
const GRAVITY: f32 = 420.0;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 0-1, decreases over time
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
    pub size: f32,
    /// Affected by gravity
    pub falls: bool,
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
    /// Fraction of trail requests that become particles
    trail_density: f32,
    trail_accumulator: f32,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(max_particles: usize, trail_density: f32, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(512)),
            max_particles,
            trail_density: trail_density.clamp(0.0, 1.0),
            trail_accumulator: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.trail_accumulator = 0.0;
    }

    pub fn spawn_all(&mut self, bursts: &[ParticleBurst]) {
        for burst in bursts {
            self.spawn(burst);
        }
    }

    /// Turn one request into particles, dropping whatever exceeds the cap
    pub fn spawn(&mut self, burst: &ParticleBurst) {
        let count = match burst.kind {
            BurstKind::Trail => {
                self.trail_accumulator += self.trail_density * burst.count as f32;
                let whole = self.trail_accumulator.floor();
                self.trail_accumulator -= whole;
                whole as usize
            }
            _ => burst.count as usize,
        };

        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let particle = self.make_particle(burst.origin, burst.kind);
            self.particles.push(particle);
        }
    }

    fn make_particle(&mut self, origin: Vec2, kind: BurstKind) -> Particle {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let dir = Vec2::new(angle.cos(), angle.sin());
        let jitter = self.rng.random::<f32>();

        match kind {
            BurstKind::Shatter(tier) => Particle {
                pos: origin,
                vel: dir * (120.0 + jitter * 180.0),
                color: scene::tier_color(tier),
                life: 1.0,
                decay: 1.2 + jitter * 0.6,
                size: 3.0 + jitter * 3.0,
                falls: true,
            },
            BurstKind::Chip(tier) => Particle {
                pos: origin,
                vel: dir * (60.0 + jitter * 80.0),
                color: scene::tier_color(tier),
                life: 1.0,
                decay: 2.5,
                size: 2.0 + jitter * 1.5,
                falls: true,
            },
            BurstKind::Pickup(kind) => Particle {
                pos: origin,
                vel: dir * (90.0 + jitter * 60.0),
                color: scene::powerup_color(kind),
                life: 1.0,
                decay: 1.8,
                size: 2.5 + jitter * 2.0,
                falls: false,
            },
            BurstKind::Trail => Particle {
                pos: origin,
                vel: dir * 10.0,
                color: colors::BALL,
                life: 0.6,
                decay: 2.0,
                size: 3.0,
                falls: false,
            },
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            if particle.falls {
                particle.vel.y += GRAVITY * dt;
            }
            particle.vel *= 0.98;
            particle.life -= particle.decay * dt;
            particle.size *= 0.995;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
