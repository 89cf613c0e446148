//! Data-driven game balance
//!
//! Defaults give the classic arcade feel. Hosts may override any subset
//! from JSON; missing fields keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::error::{ResourceError, TuningError};

/// Spawn cadence, escalation, and impact damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Obstacles spawned on level 1
    pub start_obstacles: u32,
    /// Extra obstacles per level
    pub obstacles_increment: u32,
    pub start_spawn_delay_ms: f32,
    /// Delay shaved off per level
    pub spawn_delay_decrement_ms: f32,
    /// Floor for the inter-spawn delay
    pub min_spawn_delay_ms: f32,
    /// Fall speed on level 1 (px/ms)
    pub start_velocity: f32,
    pub velocity_increment: f32,
    /// Spawn height (above the top edge)
    pub spawn_y: f32,
    /// Horizontal inset kept clear on both sides when spawning
    pub spawn_margin: f32,
    /// Obstacle square edge (px)
    pub obstacle_size: f32,
    /// Impact damage is drawn from `[min_damage, max_damage)`
    pub min_damage: u32,
    pub max_damage: u32,
    /// Level used for word selection stops growing here
    pub max_word_level: usize,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            start_obstacles: 5,
            obstacles_increment: 1,
            start_spawn_delay_ms: 5000.0,
            spawn_delay_decrement_ms: 500.0,
            min_spawn_delay_ms: 500.0,
            start_velocity: 0.1,
            velocity_increment: 0.01,
            spawn_y: -64.0,
            spawn_margin: 16.0,
            obstacle_size: 64.0,
            min_damage: 5,
            max_damage: 10,
            max_word_level: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub start_health: u32,
    /// Ship sprite edge (px)
    pub ship_size: f32,
    /// Ship top edge measured from the bottom of the screen
    pub ship_offset_y: f32,
    /// Trail origin relative to the ship's left quarter / top edge
    pub trail_offset: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_health: 100,
            ship_size: 64.0,
            ship_offset_y: 192.0,
            trail_offset: Vec2::new(8.0, 48.0),
        }
    }
}

/// One color layer of a looping trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailTier {
    pub color: Color,
    pub count: usize,
    pub min_life_ms: f32,
    pub max_life_ms: f32,
}

/// Looping thruster trail. Tiers are listed back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailTuning {
    /// Origins are scattered over `[0, jitter.x) x [0, jitter.y)`
    pub jitter: Vec2,
    /// Shared drift of every trail particle (px/ms)
    pub velocity: Vec2,
    pub particle_size: f32,
    pub tiers: Vec<TrailTier>,
}

impl Default for TrailTuning {
    fn default() -> Self {
        Self {
            jitter: Vec2::new(10.0, 16.0),
            velocity: Vec2::new(0.0, 0.2),
            particle_size: 8.0,
            tiers: vec![
                TrailTier {
                    color: Color::rgb(255, 160, 40),
                    count: 40,
                    min_life_ms: 100.0,
                    max_life_ms: 150.0,
                },
                TrailTier {
                    color: Color::rgb(255, 255, 115),
                    count: 20,
                    min_life_ms: 50.0,
                    max_life_ms: 100.0,
                },
            ],
        }
    }
}

/// One color layer of a destruction burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstTier {
    pub color: Color,
    pub count: usize,
    pub lifetime_ms: f32,
    /// Per-axis velocity is drawn from `[-max_speed, max_speed)` (px/ms)
    pub max_speed: f32,
}

/// One-shot destruction burst. Tiers are listed back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstTuning {
    /// Per-axis offset from the center is drawn from `[-spread, spread)`
    pub spread: f32,
    pub particle_size: f32,
    pub tiers: Vec<BurstTier>,
}

impl Default for BurstTuning {
    fn default() -> Self {
        Self {
            spread: 16.0,
            particle_size: 8.0,
            tiers: vec![
                BurstTier {
                    color: Color::rgb(255, 160, 40),
                    count: 2000,
                    lifetime_ms: 250.0,
                    max_speed: 0.16,
                },
                BurstTier {
                    color: Color::rgb(255, 255, 155),
                    count: 1000,
                    lifetime_ms: 250.0,
                    max_speed: 0.12,
                },
                BurstTier {
                    color: Color::WHITE,
                    count: 500,
                    lifetime_ms: 250.0,
                    max_speed: 0.08,
                },
            ],
        }
    }
}

/// A parallax layer of the background starfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarLayerTuning {
    pub count: usize,
    pub size: f32,
    /// Downward speed (px/ms)
    pub velocity: f32,
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub level: LevelTuning,
    pub player: PlayerTuning,
    pub trail: TrailTuning,
    pub burst: BurstTuning,
    pub starfield: Vec<StarLayerTuning>,
    /// How long the "Level N" banner stays up
    pub level_banner_ms: f32,
    /// Frame deltas above this are clamped (stall after alt-tab, debugger, ...)
    pub max_frame_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            level: LevelTuning::default(),
            player: PlayerTuning::default(),
            trail: TrailTuning::default(),
            burst: BurstTuning::default(),
            starfield: vec![
                StarLayerTuning {
                    count: 100,
                    size: 1.0,
                    velocity: 0.2,
                },
                StarLayerTuning {
                    count: 10,
                    size: 1.0,
                    velocity: 0.3,
                },
            ],
            level_banner_ms: 2500.0,
            max_frame_ms: 250.0,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NonPositive { field, value })
    }
}

fn non_empty(field: &'static str, low: f32, high: f32) -> Result<(), TuningError> {
    if low < high {
        Ok(())
    } else {
        Err(TuningError::EmptyRange { field, low, high })
    }
}

impl Tuning {
    /// Parse and validate a JSON balance sheet
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON balance sheet from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let level = &self.level;
        if level.start_obstacles == 0 {
            return Err(TuningError::Zero {
                field: "level.start_obstacles",
            });
        }
        positive("level.min_spawn_delay_ms", level.min_spawn_delay_ms)?;
        positive("level.start_spawn_delay_ms", level.start_spawn_delay_ms)?;
        positive("level.start_velocity", level.start_velocity)?;
        positive("level.obstacle_size", level.obstacle_size)?;
        if level.spawn_delay_decrement_ms < 0.0 {
            return Err(TuningError::NonPositive {
                field: "level.spawn_delay_decrement_ms",
                value: level.spawn_delay_decrement_ms,
            });
        }
        if level.velocity_increment < 0.0 {
            return Err(TuningError::NonPositive {
                field: "level.velocity_increment",
                value: level.velocity_increment,
            });
        }
        non_empty(
            "level.damage",
            level.min_damage as f32,
            level.max_damage as f32,
        )?;

        if self.player.start_health == 0 {
            return Err(TuningError::Zero {
                field: "player.start_health",
            });
        }

        for tier in &self.trail.tiers {
            non_empty("trail.tiers.life_ms", tier.min_life_ms, tier.max_life_ms)?;
            positive("trail.tiers.min_life_ms", tier.min_life_ms)?;
        }
        for tier in &self.burst.tiers {
            positive("burst.tiers.lifetime_ms", tier.lifetime_ms)?;
            if tier.max_speed < 0.0 {
                return Err(TuningError::NonPositive {
                    field: "burst.tiers.max_speed",
                    value: tier.max_speed,
                });
            }
        }
        positive("max_frame_ms", self.max_frame_ms)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "level": { "start_obstacles": 3 } }"#).unwrap();
        assert_eq!(tuning.level.start_obstacles, 3);
        assert_eq!(tuning.level.start_spawn_delay_ms, 5000.0);
        assert_eq!(tuning.player.start_health, 100);
        assert_eq!(tuning.burst.tiers.len(), 3);
    }

    #[test]
    fn test_rejects_empty_damage_range() {
        let err = Tuning::from_json(r#"{ "level": { "min_damage": 10, "max_damage": 10 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::EmptyRange { field: "level.damage", .. }));
    }

    #[test]
    fn test_rejects_zero_floor_delay() {
        let err = Tuning::from_json(r#"{ "level": { "min_spawn_delay_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
