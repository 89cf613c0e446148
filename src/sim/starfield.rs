//! Scrolling parallax starfield behind the playfield

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::ScreenGeometry;
use crate::tuning::StarLayerTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Downward speed (px/ms)
    pub vel: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Starfield {
    screen: ScreenGeometry,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(
        layers: &[StarLayerTuning],
        screen: ScreenGeometry,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut stars = Vec::with_capacity(layers.iter().map(|l| l.count).sum());
        for layer in layers {
            for _ in 0..layer.count {
                let pos = Vec2::new(
                    rng.range_f32(0.0, screen.width),
                    rng.range_f32(0.0, screen.height),
                );
                stars.push(Star {
                    pos,
                    size: layer.size,
                    vel: layer.velocity,
                });
            }
        }
        Self { screen, stars }
    }

    /// Scroll down; stars leaving the bottom re-enter at the top at a new x
    pub fn update(&mut self, dt: f32, rng: &mut dyn RandomSource) {
        for star in &mut self.stars {
            star.pos.y += star.vel * dt;
            if star.pos.y > self.screen.height {
                star.pos.y = -1.0;
                star.pos.x = rng.range_f32(0.0, self.screen.width);
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}
