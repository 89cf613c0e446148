//! World state and the events it reports
//!
//! [`GameState`] is the single context object for a run: every component is
//! reachable from it and nothing lives in globals.

use serde::{Deserialize, Serialize};

use super::matcher::{MatchOutcome, TypingMatcher};
use super::obstacle::ObstacleId;
use super::player::Player;
use super::rng::{RandomSource, SeededRandom};
use super::scheduler::LevelScheduler;
use super::starfield::Starfield;
use super::words::WordList;
use crate::ScreenGeometry;
use crate::consts::POINTS_PER_LETTER;
use crate::error::ResourceError;
use crate::input::KeyEvent;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Health reached zero, simulation frozen
    GameOver,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: ObstacleId, word: String },
    /// An obstacle reached the bottom and hurt the player
    Impact { id: ObstacleId, damage: u32 },
    Targeted { id: ObstacleId },
    /// The player completed a word
    Destroyed { id: ObstacleId, points: u64 },
    LevelChanged { level: u32 },
    GameOver { score: u64, level: u32 },
    /// Quit, or Escape with nothing typed: the host should leave the run
    ExitRequested,
}

/// Complete state of one run
pub struct GameState {
    pub tuning: Tuning,
    pub screen: ScreenGeometry,
    pub words: WordList,
    pub phase: GamePhase,
    pub scheduler: LevelScheduler,
    pub matcher: TypingMatcher,
    pub player: Player,
    pub starfield: Starfield,
    /// Time left on the "Level N" banner (ms)
    pub level_banner_ms: f32,
    /// Simulated time since the run started (ms)
    pub time_ms: f64,
    /// Time until autoplay may press its next key (ms)
    pub(crate) autoplay_cooldown_ms: f32,
    pub(crate) rng: Box<dyn RandomSource>,
}

impl GameState {
    /// New run with default tuning, the built-in words, and a seeded RNG
    pub fn new(seed: u64, screen: ScreenGeometry) -> Self {
        Self::build(
            Tuning::default(),
            screen,
            WordList::default(),
            Box::new(SeededRandom::new(seed)),
        )
    }

    /// New run from host-supplied configuration
    pub fn with_config(
        tuning: Tuning,
        screen: ScreenGeometry,
        words: WordList,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ResourceError> {
        tuning.validate()?;
        Ok(Self::build(tuning, screen, words, rng))
    }

    fn build(
        tuning: Tuning,
        screen: ScreenGeometry,
        words: WordList,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let player = Player::new(&tuning.player, &tuning.trail, &screen, rng.as_mut());
        let starfield = Starfield::new(&tuning.starfield, screen, rng.as_mut());
        let scheduler = LevelScheduler::new(tuning.level.clone(), screen);
        let level_banner_ms = tuning.level_banner_ms;
        log::info!(
            "New run on {}x{} screen, {} words",
            screen.width,
            screen.height,
            words.len()
        );
        Self {
            tuning,
            screen,
            words,
            phase: GamePhase::Playing,
            scheduler,
            matcher: TypingMatcher::new(),
            player,
            starfield,
            level_banner_ms,
            time_ms: 0.0,
            autoplay_cooldown_ms: 0.0,
            rng,
        }
    }

    /// Start over from level 1 with full health
    pub fn restart(&mut self) {
        self.player.reset();
        self.scheduler.start();
        self.matcher.reset();
        self.phase = GamePhase::Playing;
        self.level_banner_ms = self.tuning.level_banner_ms;
        self.time_ms = 0.0;
        self.autoplay_cooldown_ms = 0.0;
        log::info!("Run restarted");
    }

    pub fn level(&self) -> u32 {
        self.scheduler.level()
    }

    pub fn score(&self) -> u64 {
        self.player.score()
    }

    pub fn health(&self) -> u32 {
        self.player.current_health()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether the "Level N" banner should be drawn
    pub fn show_level_banner(&self) -> bool {
        self.level_banner_ms > 0.0 && !self.is_game_over()
    }

    /// Route one classified key into the run
    pub fn handle_key(&mut self, key: KeyEvent, events: &mut Vec<GameEvent>) {
        match key {
            KeyEvent::Quit => events.push(GameEvent::ExitRequested),
            KeyEvent::Escape => {
                if self.is_game_over() || self.matcher.typed().is_empty() {
                    if let MatchOutcome::Released { id } =
                        self.matcher.cancel(self.scheduler.obstacles_mut())
                    {
                        log::debug!("Escape released target {}", id);
                    }
                    events.push(GameEvent::ExitRequested);
                } else {
                    self.matcher.cancel(self.scheduler.obstacles_mut());
                }
            }
            _ if self.is_game_over() => {}
            KeyEvent::Backspace => {
                self.matcher.backspace(self.scheduler.obstacles_mut());
            }
            KeyEvent::Letter(c) => {
                let outcome = self.matcher.type_char(
                    c,
                    self.scheduler.obstacles_mut(),
                    self.rng.as_mut(),
                    &self.tuning.burst,
                );
                match outcome {
                    MatchOutcome::Targeted { id } => events.push(GameEvent::Targeted { id }),
                    MatchOutcome::Destroyed { id, word_len } => {
                        let points = word_len as u64 * self.level() as u64 * POINTS_PER_LETTER;
                        self.player.add_score(points);
                        events.push(GameEvent::Destroyed { id, points });
                    }
                    _ => {}
                }
            }
            // Menu navigation belongs to the host
            KeyEvent::Up | KeyEvent::Down | KeyEvent::Enter => {}
        }
    }

    /// Apply the world-level consequences of simulation events: damage,
    /// level banners, and game over.
    pub fn apply_events(&mut self, events: &mut Vec<GameEvent>) {
        let mut index = 0;
        while index < events.len() {
            match events[index] {
                GameEvent::Impact { damage, .. } if !self.is_game_over() => {
                    let health = self.player.take_damage(damage);
                    log::debug!("Impact for {} damage, health {}", damage, health);
                    if health == 0 {
                        self.phase = GamePhase::GameOver;
                        self.level_banner_ms = 0.0;
                        self.matcher.reset();
                        log::info!(
                            "Game over on level {} with score {}",
                            self.level(),
                            self.score()
                        );
                        events.push(GameEvent::GameOver {
                            score: self.score(),
                            level: self.level(),
                        });
                    }
                }
                GameEvent::LevelChanged { level } if !self.is_game_over() => {
                    self.matcher.reset();
                    self.level_banner_ms = self.tuning.level_banner_ms;
                    log::info!("Level {} begins", level);
                }
                _ => {}
            }
            index += 1;
        }
    }
}
