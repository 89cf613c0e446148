//! Level / wave scheduler
//!
//! Owns the obstacles of the current level, spawns them on a fixed cadence,
//! and escalates count, speed, and cadence whenever a level is cleared.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleId, ObstacleUpdate};
use super::rng::RandomSource;
use super::state::GameEvent;
use super::words::WordList;
use crate::ScreenGeometry;
use crate::tuning::LevelTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelScheduler {
    tuning: LevelTuning,
    screen: ScreenGeometry,
    /// Current level, starting at 1
    level: u32,
    /// Obstacles spawned over the whole level
    obstacles_per_level: u32,
    remaining_to_spawn: u32,
    /// Time between spawns (ms)
    spawn_delay: f32,
    /// Time until the next spawn (ms), may go negative within a tick
    spawn_countdown: f32,
    /// Fall speed of newly spawned obstacles (px/ms)
    velocity: f32,
    obstacles: Vec<Obstacle>,
    next_id: ObstacleId,
}

impl LevelScheduler {
    pub fn new(tuning: LevelTuning, screen: ScreenGeometry) -> Self {
        let mut scheduler = Self {
            tuning,
            screen,
            level: 1,
            obstacles_per_level: 0,
            remaining_to_spawn: 0,
            spawn_delay: 0.0,
            spawn_countdown: 0.0,
            velocity: 0.0,
            obstacles: Vec::new(),
            next_id: 1,
        };
        scheduler.start();
        scheduler
    }

    /// Reset to level 1 with the starting parameters
    pub fn start(&mut self) {
        self.level = 1;
        self.obstacles_per_level = self.tuning.start_obstacles;
        self.remaining_to_spawn = self.obstacles_per_level;
        self.spawn_delay = self.tuning.start_spawn_delay_ms;
        self.spawn_countdown = self.spawn_delay;
        self.velocity = self.tuning.start_velocity;
        self.obstacles.clear();
        self.next_id = 1;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn obstacles_per_level(&self) -> u32 {
        self.obstacles_per_level
    }

    pub fn remaining_to_spawn(&self) -> u32 {
        self.remaining_to_spawn
    }

    pub fn spawn_delay(&self) -> f32 {
        self.spawn_delay
    }

    pub fn spawn_countdown(&self) -> f32 {
        self.spawn_countdown
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn tuning(&self) -> &LevelTuning {
        &self.tuning
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Advance spawning and every obstacle by `dt` milliseconds.
    ///
    /// Spawn overshoot carries into the next countdown so cadence does not
    /// drift with frame time. Emits `Spawned` and `Impact`.
    ///
    /// Returns true once the level is cleared: nothing left to spawn and no
    /// obstacle alive. The caller decides whether to call [`next_level`],
    /// since the impacts of this same step may have ended the run.
    ///
    /// [`next_level`]: Self::next_level
    pub fn update(
        &mut self,
        dt: f32,
        rng: &mut dyn RandomSource,
        words: &WordList,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.remaining_to_spawn > 0 {
            self.spawn_countdown -= dt;
            while self.spawn_countdown <= 0.0 && self.remaining_to_spawn > 0 {
                self.spawn(rng, words, events);
                self.spawn_countdown += self.spawn_delay;
            }
        }

        let floor_y = self.screen.height;
        let mut any_alive = false;
        for obstacle in &mut self.obstacles {
            if obstacle.update(dt, floor_y) == ObstacleUpdate::Impacted {
                let damage = rng.range_u32(self.tuning.min_damage, self.tuning.max_damage);
                events.push(GameEvent::Impact {
                    id: obstacle.id,
                    damage,
                });
            }
            any_alive |= obstacle.is_alive();
        }

        !any_alive && self.remaining_to_spawn == 0
    }

    /// Advance to the next level: clear the field, then raise count and speed
    /// and shorten the spawn delay down to its floor.
    pub fn next_level(&mut self, events: &mut Vec<GameEvent>) {
        self.obstacles.clear();
        self.level += 1;
        self.obstacles_per_level += self.tuning.obstacles_increment;
        self.remaining_to_spawn = self.obstacles_per_level;
        self.spawn_delay = (self.spawn_delay - self.tuning.spawn_delay_decrement_ms)
            .max(self.tuning.min_spawn_delay_ms);
        self.spawn_countdown = self.spawn_delay;
        self.velocity += self.tuning.velocity_increment;

        log::info!(
            "Level {}: {} obstacles, delay {}ms, velocity {}",
            self.level,
            self.obstacles_per_level,
            self.spawn_delay,
            self.velocity
        );
        events.push(GameEvent::LevelChanged { level: self.level });
    }

    fn spawn(&mut self, rng: &mut dyn RandomSource, words: &WordList, events: &mut Vec<GameEvent>) {
        let size = self.tuning.obstacle_size;
        let margin = self.tuning.spawn_margin;
        let x = rng.range_f32(margin, self.screen.width - size - margin);
        let word = words.pick(self.level, self.tuning.max_word_level, rng);

        let id = self.next_id;
        self.next_id += 1;
        let obstacle = Obstacle::new(
            id,
            Vec2::new(x, self.tuning.spawn_y),
            self.velocity,
            size,
            word,
        );
        log::debug!("Spawned obstacle {} ({}) at x={:.0}", id, word, x);
        events.push(GameEvent::Spawned {
            id,
            word: word.to_string(),
        });
        self.obstacles.push(obstacle);
        self.remaining_to_spawn -= 1;
    }
}
