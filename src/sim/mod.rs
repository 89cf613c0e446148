//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Every random draw goes through an injected [`RandomSource`]
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod matcher;
pub mod obstacle;
pub mod particles;
pub mod player;
pub mod rng;
pub mod scheduler;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod words;

pub use matcher::{MatchOutcome, TypingMatcher};
pub use obstacle::{Obstacle, ObstacleId, ObstacleState, ObstacleUpdate};
pub use particles::{BurstEmitter, Particle, TrailEmitter};
pub use player::Player;
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use scheduler::LevelScheduler;
pub use starfield::{Star, Starfield};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{AUTOPLAY_KEY_INTERVAL_MS, TickInput, tick};
pub use words::{DEFAULT_WORDS, WordList};
