//! Typing matcher
//!
//! Binds keystrokes to at most one obstacle at a time and validates the typed
//! prefix letter by letter. Wrong letters are ignored without penalty.

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleId};
use super::rng::RandomSource;
use crate::tuning::BurstTuning;

/// Result of feeding one key to the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No state change
    Ignored,
    /// A new obstacle was selected by its first letter
    Targeted { id: ObstacleId },
    /// The next letter of the targeted word was typed
    Advanced { id: ObstacleId },
    /// The word was completed and the obstacle destroyed
    Destroyed { id: ObstacleId, word_len: usize },
    /// The last typed letter was removed
    Erased,
    /// The target was dropped
    Released { id: ObstacleId },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypingMatcher {
    typed: String,
    target: Option<ObstacleId>,
}

impl TypingMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters typed so far against the target
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn target(&self) -> Option<ObstacleId> {
        self.target
    }

    /// Feed one character.
    ///
    /// Only lowercase ASCII letters are considered. Obstacles are scanned in
    /// stored order and the first active one whose word starts with `c` wins.
    pub fn type_char(
        &mut self,
        c: char,
        obstacles: &mut [Obstacle],
        rng: &mut dyn RandomSource,
        burst: &BurstTuning,
    ) -> MatchOutcome {
        if !c.is_ascii_lowercase() {
            return MatchOutcome::Ignored;
        }
        self.release_if_inactive(obstacles);

        let index = match self.target {
            Some(id) => match obstacles.iter().position(|o| o.id == id) {
                Some(index) => index,
                None => return MatchOutcome::Ignored,
            },
            None => {
                let Some(index) = obstacles
                    .iter()
                    .position(|o| o.is_active() && o.word().starts_with(c))
                else {
                    return MatchOutcome::Ignored;
                };
                let obstacle = &mut obstacles[index];
                obstacle.target();
                self.target = Some(obstacle.id);
                self.typed.clear();
                log::debug!("Targeted obstacle {} ({})", obstacle.id, obstacle.word());
                if obstacle.word().len() > 1 {
                    self.typed.push(c);
                    return MatchOutcome::Targeted { id: obstacle.id };
                }
                // Single-letter word: fall through and complete it
                index
            }
        };

        let obstacle = &mut obstacles[index];
        let expected = obstacle.word().as_bytes().get(self.typed.len()).copied();
        if expected != Some(c as u8) {
            return MatchOutcome::Ignored;
        }
        self.typed.push(c);
        if self.typed.len() < obstacle.word().len() {
            return MatchOutcome::Advanced { id: obstacle.id };
        }

        let id = obstacle.id;
        let word_len = obstacle.word().len();
        obstacle.destroy(rng, burst);
        self.typed.clear();
        self.target = None;
        MatchOutcome::Destroyed { id, word_len }
    }

    /// Remove the last typed letter. The target is kept while letters remain;
    /// erasing the final letter releases it so another word can be chosen.
    pub fn backspace(&mut self, obstacles: &mut [Obstacle]) -> MatchOutcome {
        if self.typed.pop().is_none() {
            return MatchOutcome::Ignored;
        }
        if self.typed.is_empty() {
            if let Some(id) = self.release(obstacles) {
                return MatchOutcome::Released { id };
            }
        }
        MatchOutcome::Erased
    }

    /// Drop the target and everything typed so far
    pub fn cancel(&mut self, obstacles: &mut [Obstacle]) -> MatchOutcome {
        self.typed.clear();
        match self.release(obstacles) {
            Some(id) => MatchOutcome::Released { id },
            None => MatchOutcome::Ignored,
        }
    }

    /// Forget a target that stopped falling (impacted, or gone with its level)
    /// so the typed prefix always belongs to a live word.
    pub fn release_if_inactive(&mut self, obstacles: &[Obstacle]) -> bool {
        let Some(id) = self.target else {
            return false;
        };
        let active = obstacles.iter().any(|o| o.id == id && o.is_active());
        if !active {
            log::debug!("Released inactive target {}", id);
            self.target = None;
            self.typed.clear();
        }
        !active
    }

    /// Clear all state without touching obstacles (level change / restart)
    pub fn reset(&mut self) {
        self.typed.clear();
        self.target = None;
    }

    fn release(&mut self, obstacles: &mut [Obstacle]) -> Option<ObstacleId> {
        let id = self.target.take()?;
        if let Some(obstacle) = obstacles.iter_mut().find(|o| o.id == id) {
            obstacle.untarget();
        }
        Some(id)
    }
}
