//! Presentation layer
//!
//! The simulation never draws. Hosts implement [`Renderer`] and
//! [`TextProvider`] over whatever backend they have; [`Scene`] reads a
//! [`GameState`](crate::sim::GameState) and turns it into rectangles, sprites
//! and text labels through those two traits.

pub mod labels;
pub mod scene;

pub use labels::{LabelCache, TextSlot};
pub use scene::{Scene, SceneAssets};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::error::ResourceError;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of edge `size` with its top-left corner at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    /// Grow on every side by `amount`
    pub fn expand(self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.w + amount * 2.0,
            self.h + amount * 2.0,
        )
    }
}

/// Opaque texture owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// A rendered piece of text and its measured size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub handle: TextureHandle,
    pub width: f32,
    pub height: f32,
}

/// Font role of a piece of text; hosts map each role to a font and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextStyle {
    ObstacleWord,
    CurrentWord,
    Hud,
    LevelBanner,
    Overlay,
}

/// Drawing primitives
pub trait Renderer {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_sprite(&mut self, texture: TextureHandle, rect: Rect);
    fn present(&mut self);
}

/// Text rasterization
pub trait TextProvider {
    fn render_text(
        &mut self,
        content: &str,
        style: TextStyle,
        color: Color,
    ) -> Result<Label, ResourceError>;

    /// Release a label previously returned by `render_text`
    fn free(&mut self, texture: TextureHandle);
}

/// Named sprite lookup, done once at startup
pub trait SpriteSource {
    fn load_sprite(&mut self, name: &str) -> Result<TextureHandle, ResourceError>;
}
