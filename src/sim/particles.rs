//! Time-limited point particles
//!
//! Two emitters share the same [`Particle`]:
//! - [`TrailEmitter`] loops forever, resetting each particle to its origin
//!   when it expires (ship thruster)
//! - [`BurstEmitter`] fires once and is exhausted when its last particle
//!   expires (obstacle destruction)
//!
//! Particles are stored back-to-front so iteration order is draw order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::Color;
use crate::tuning::{BurstTuning, TrailTuning};

/// A single particle. Times are in milliseconds, velocities in px/ms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub origin: Vec2,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Total lifetime
    pub lifetime: f32,
    /// Remaining lifetime, only decreases while alive
    pub remaining: f32,
    alive: bool,
}

impl Particle {
    pub fn new(origin: Vec2, vel: Vec2, color: Color, lifetime: f32) -> Self {
        Self {
            origin,
            pos: origin,
            vel,
            color,
            lifetime,
            remaining: lifetime,
            alive: true,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advance by `dt`. Returns true on the tick the particle expires.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.alive = false;
            return true;
        }
        self.pos += self.vel * dt;
        false
    }

    /// Bring the particle back to its origin with a full lifetime
    pub fn reset(&mut self) {
        self.alive = true;
        self.remaining = self.lifetime;
        self.pos = self.origin;
    }
}

/// Continuously looping emitter anchored at a fixed origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailEmitter {
    pub origin: Vec2,
    pub particle_size: f32,
    particles: Vec<Particle>,
}

impl TrailEmitter {
    pub fn new(origin: Vec2, tuning: &TrailTuning, rng: &mut dyn RandomSource) -> Self {
        let total = tuning.tiers.iter().map(|t| t.count).sum();
        let mut particles = Vec::with_capacity(total);
        for tier in &tuning.tiers {
            for _ in 0..tier.count {
                let offset = Vec2::new(
                    rng.range_f32(0.0, tuning.jitter.x),
                    rng.range_f32(0.0, tuning.jitter.y),
                );
                let lifetime = rng.range_f32(tier.min_life_ms, tier.max_life_ms);
                particles.push(Particle::new(
                    origin + offset,
                    tuning.velocity,
                    tier.color,
                    lifetime,
                ));
            }
        }
        Self {
            origin,
            particle_size: tuning.particle_size,
            particles,
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.update(dt);
            if !particle.is_alive() {
                particle.reset();
            }
        }
    }

    /// All particles, back tier first
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// One-shot radial burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstEmitter {
    pub center: Vec2,
    pub particle_size: f32,
    particles: Vec<Particle>,
    alive_count: usize,
}

impl BurstEmitter {
    pub fn new(center: Vec2, tuning: &BurstTuning, rng: &mut dyn RandomSource) -> Self {
        let total = tuning.tiers.iter().map(|t| t.count).sum();
        let mut particles = Vec::with_capacity(total);
        let spread = tuning.spread;
        for tier in &tuning.tiers {
            let speed = tier.max_speed;
            for _ in 0..tier.count {
                let offset = Vec2::new(
                    rng.range_f32(-spread, spread),
                    rng.range_f32(-spread, spread),
                );
                let vel = Vec2::new(rng.range_f32(-speed, speed), rng.range_f32(-speed, speed));
                particles.push(Particle::new(
                    center + offset,
                    vel,
                    tier.color,
                    tier.lifetime_ms,
                ));
            }
        }
        let alive_count = particles.iter().filter(|p| p.lifetime > 0.0).count();
        for particle in particles.iter_mut().filter(|p| p.lifetime <= 0.0) {
            particle.alive = false;
        }
        Self {
            center,
            particle_size: tuning.particle_size,
            particles,
            alive_count,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.alive_count == 0 {
            return;
        }
        for particle in &mut self.particles {
            if particle.update(dt) {
                self.alive_count -= 1;
            }
        }
    }

    /// True while at least one particle is still animating
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive_count > 0
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// All particles, back tier first
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
