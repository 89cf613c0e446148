//! The player: planet health, score, and the ship's thruster

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::TrailEmitter;
use super::rng::RandomSource;
use crate::ScreenGeometry;
use crate::tuning::{PlayerTuning, TrailTuning};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    health: u32,
    start_health: u32,
    score: u64,
    /// Top-left corner of the ship sprite
    pub ship_pos: Vec2,
    pub ship_size: f32,
    pub thruster: TrailEmitter,
}

impl Player {
    pub fn new(
        tuning: &PlayerTuning,
        trail: &TrailTuning,
        screen: &ScreenGeometry,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let size = tuning.ship_size;
        let ship_pos = Vec2::new(
            screen.center_x() - size / 2.0,
            screen.height - tuning.ship_offset_y,
        );
        let trail_origin = Vec2::new(screen.center_x() - size / 4.0, ship_pos.y) + tuning.trail_offset;
        Self {
            health: tuning.start_health,
            start_health: tuning.start_health,
            score: 0,
            ship_pos,
            ship_size: size,
            thruster: TrailEmitter::new(trail_origin, trail, rng),
        }
    }

    pub fn current_health(&self) -> u32 {
        self.health
    }

    pub fn start_health(&self) -> u32 {
        self.start_health
    }

    /// Health as a whole percentage of the starting value
    pub fn health_percent(&self) -> u32 {
        if self.start_health == 0 {
            return 0;
        }
        ((self.health as u64 * 100) / self.start_health as u64) as u32
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Subtract `amount`, never going below zero. Returns remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Restore starting health and clear the score
    pub fn reset(&mut self) {
        self.health = self.start_health;
        self.score = 0;
    }

    pub fn update(&mut self, dt: f32) {
        self.thruster.update(dt);
    }
}
