//! Astrotyper - falling-words typing arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, obstacles, typing, particles)
//! - `render`: Narrow drawing/text interfaces and scene composition
//! - `input`: Key event classification
//! - `tuning`: Data-driven game balance
//! - `error`: Resource and tuning errors

pub mod error;
pub mod input;
pub mod render;
pub mod sim;
pub mod tuning;

pub use error::{ResourceError, TuningError};
pub use input::KeyEvent;
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Nominal frame step used by the demo loop (ms)
    pub const FRAME_MS: f32 = 16.0;

    /// Default screen size when the host does not report one
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1920.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 1080.0;

    /// Points per typed letter, multiplied by the level
    pub const POINTS_PER_LETTER: u64 = 10;
}

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Screen size in pixels, queried once at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_SCREEN_WIDTH,
            height: consts::DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl ScreenGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// True if a `size`-sized square at `pos` overlaps the visible area
    /// (with a one-square allowance above the top edge for spawning objects)
    pub fn overlaps(&self, pos: Vec2, size: f32) -> bool {
        pos.x >= -size && pos.x <= self.width && pos.y >= -size && pos.y <= self.height
    }
}
