//! Falling obstacles bound to a target word
//!
//! State machine:
//! ```text
//! Alive <-> Targeted      (target / untarget)
//! Alive | Targeted -> Destroyed   (word typed, spawns a burst)
//! Alive | Targeted -> Impacted    (reached the floor, player takes damage)
//! ```
//! Destroyed and Impacted are terminal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::BurstEmitter;
use super::rng::RandomSource;
use crate::ScreenGeometry;
use crate::tuning::BurstTuning;

pub type ObstacleId = u32;

/// Lifecycle of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleState {
    /// Falling, not selected by the player
    Alive,
    /// Falling, the player is typing its word
    Targeted,
    /// Word completed by the player
    Destroyed,
    /// Reached the bottom un-destroyed
    Impacted,
}

/// What happened to an obstacle during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleUpdate {
    /// Still falling
    Falling,
    /// Crossed the floor this tick
    Impacted,
    /// Terminal state, nothing new
    Idle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Top-left corner
    pub pos: Vec2,
    /// Fall speed (px/ms)
    pub vel: f32,
    /// Edge length of the square body
    pub size: f32,
    word: String,
    state: ObstacleState,
    burst: Option<BurstEmitter>,
}

impl Obstacle {
    pub fn new(id: ObstacleId, pos: Vec2, vel: f32, size: f32, word: impl Into<String>) -> Self {
        let word = word.into();
        debug_assert!(!word.is_empty(), "obstacle word must not be empty");
        Self {
            id,
            pos,
            vel,
            size,
            word,
            state: ObstacleState::Alive,
            burst: None,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn state(&self) -> ObstacleState {
        self.state
    }

    pub fn burst(&self) -> Option<&BurstEmitter> {
        self.burst.as_ref()
    }

    /// Visual center of the body
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Falling and can be targeted
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.state, ObstacleState::Alive | ObstacleState::Targeted)
    }

    /// Still needs simulating or drawing: falling, or its burst is animating
    pub fn is_alive(&self) -> bool {
        self.is_active() || self.burst.as_ref().is_some_and(BurstEmitter::is_alive)
    }

    #[inline]
    pub fn is_targeted(&self) -> bool {
        self.state == ObstacleState::Targeted
    }

    /// True for a player kill, false for an impact or a live obstacle
    #[inline]
    pub fn was_destroyed(&self) -> bool {
        self.state == ObstacleState::Destroyed
    }

    /// Advance by `dt`. Crossing `floor_y` turns the obstacle into `Impacted`.
    pub fn update(&mut self, dt: f32, floor_y: f32) -> ObstacleUpdate {
        match self.state {
            ObstacleState::Alive | ObstacleState::Targeted => {
                self.pos.y += self.vel * dt;
                if self.pos.y > floor_y {
                    self.state = ObstacleState::Impacted;
                    log::debug!("Obstacle {} ({}) impacted", self.id, self.word);
                    ObstacleUpdate::Impacted
                } else {
                    ObstacleUpdate::Falling
                }
            }
            ObstacleState::Destroyed => {
                if let Some(burst) = self.burst.as_mut() {
                    burst.update(dt);
                    if !burst.is_alive() {
                        self.burst = None;
                    }
                }
                ObstacleUpdate::Idle
            }
            ObstacleState::Impacted => ObstacleUpdate::Idle,
        }
    }

    pub fn target(&mut self) {
        if self.state == ObstacleState::Alive {
            self.state = ObstacleState::Targeted;
        }
    }

    pub fn untarget(&mut self) {
        if self.state == ObstacleState::Targeted {
            self.state = ObstacleState::Alive;
        }
    }

    /// Destroy the obstacle and start its burst. Returns false (and does
    /// nothing) if it was already destroyed or impacted.
    pub fn destroy(&mut self, rng: &mut dyn RandomSource, tuning: &BurstTuning) -> bool {
        if !self.is_active() {
            log::trace!("Ignoring destroy on finished obstacle {}", self.id);
            return false;
        }
        self.state = ObstacleState::Destroyed;
        self.burst = Some(BurstEmitter::new(self.center(), tuning, rng));
        log::debug!("Obstacle {} ({}) destroyed", self.id, self.word);
        true
    }

    /// Drawing cull: false when the body is entirely off screen
    pub fn is_visible(&self, screen: &ScreenGeometry) -> bool {
        screen.overlaps(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SeededRandom;
    use crate::tuning::BurstTier;
    use crate::Color;
    use proptest::prelude::*;

    fn burst_tuning() -> BurstTuning {
        BurstTuning {
            spread: 16.0,
            particle_size: 8.0,
            tiers: vec![BurstTier {
                color: Color::WHITE,
                count: 8,
                lifetime_ms: 250.0,
                max_speed: 0.1,
            }],
        }
    }

    fn obstacle() -> Obstacle {
        Obstacle::new(1, Vec2::new(100.0, -64.0), 0.1, 64.0, "comet")
    }

    #[test]
    fn test_falls_then_impacts_and_freezes() {
        let mut o = obstacle();
        assert_eq!(o.update(100.0, 100.0), ObstacleUpdate::Falling);
        assert!((o.pos.y - -54.0).abs() < 1e-4);

        let mut result = ObstacleUpdate::Falling;
        while result == ObstacleUpdate::Falling {
            result = o.update(100.0, 100.0);
        }
        assert_eq!(result, ObstacleUpdate::Impacted);
        assert_eq!(o.state(), ObstacleState::Impacted);
        assert!(!o.is_alive());
        assert!(!o.was_destroyed());

        let frozen = o.pos.y;
        assert_eq!(o.update(100.0, 100.0), ObstacleUpdate::Idle);
        assert_eq!(o.pos.y, frozen);
    }

    #[test]
    fn test_target_is_reversible() {
        let mut o = obstacle();
        o.target();
        assert!(o.is_targeted());
        o.untarget();
        assert_eq!(o.state(), ObstacleState::Alive);
    }

    #[test]
    fn test_targeted_obstacle_keeps_falling_and_can_impact() {
        let mut o = obstacle();
        o.target();
        assert_eq!(o.update(1000.0, 0.0), ObstacleUpdate::Impacted);
        assert!(!o.is_targeted());
        // Target requests on a finished obstacle are ignored
        o.target();
        assert_eq!(o.state(), ObstacleState::Impacted);
    }

    #[test]
    fn test_destroy_is_terminal_and_once() {
        let mut rng = SeededRandom::new(5);
        let tuning = burst_tuning();
        let mut o = obstacle();
        o.target();
        assert!(o.destroy(&mut rng, &tuning));
        assert!(o.was_destroyed());
        assert!(!o.is_active());
        assert!(o.is_alive(), "burst still animating");
        assert_eq!(o.burst().unwrap().center, o.center());

        assert!(!o.destroy(&mut rng, &tuning));
        o.untarget();
        assert_eq!(o.state(), ObstacleState::Destroyed);

        // Position frozen, burst runs out
        let y = o.pos.y;
        o.update(200.0, 1000.0);
        assert!(o.is_alive());
        o.update(50.0, 1000.0);
        assert!(!o.is_alive());
        assert!(o.burst().is_none(), "exhausted burst is freed");
        assert!(o.was_destroyed());
        assert_eq!(o.pos.y, y);
    }

    #[test]
    fn test_impacted_cannot_be_destroyed() {
        let mut rng = SeededRandom::new(5);
        let mut o = obstacle();
        o.update(10_000.0, 0.0);
        assert!(!o.destroy(&mut rng, &burst_tuning()));
        assert!(o.burst().is_none());
    }

    #[test]
    fn test_visibility_cull() {
        let screen = ScreenGeometry::new(800.0, 600.0);
        let mut o = obstacle();
        assert!(o.is_visible(&screen));
        o.pos.y = -100.0;
        assert!(!o.is_visible(&screen));
        o.pos = Vec2::new(900.0, 10.0);
        assert!(!o.is_visible(&screen));
    }

    proptest! {
        #[test]
        fn y_is_monotonic_until_impact(steps in proptest::collection::vec(0.0f32..50.0, 1..200)) {
            let mut o = obstacle();
            let mut last_y = o.pos.y;
            let mut impacted = false;
            for dt in steps {
                o.update(dt, 600.0);
                if impacted {
                    prop_assert_eq!(o.pos.y, last_y);
                } else {
                    prop_assert!(o.pos.y >= last_y);
                }
                impacted = o.state() == ObstacleState::Impacted;
                last_y = o.pos.y;
            }
        }
    }
}
