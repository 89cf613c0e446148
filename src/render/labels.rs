//! Cached text labels
//!
//! A label is rendered once and reused until its content or color changes,
//! then the old texture is freed and a new one rendered. Obstacle words are
//! looked up by obstacle id; the simulation never holds a texture.

use std::collections::HashMap;

use super::{Label, TextProvider, TextStyle};
use crate::Color;
use crate::error::ResourceError;
use crate::sim::ObstacleId;

/// One label that follows a changing piece of text
#[derive(Debug, Clone)]
pub struct TextSlot {
    style: TextStyle,
    content: String,
    color: Color,
    label: Option<Label>,
}

impl TextSlot {
    pub fn new(style: TextStyle) -> Self {
        Self {
            style,
            content: String::new(),
            color: Color::WHITE,
            label: None,
        }
    }

    pub fn label(&self) -> Option<Label> {
        self.label
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Show `content` in `color`, re-rendering only when either changed
    pub fn update(
        &mut self,
        text: &mut dyn TextProvider,
        content: &str,
        color: Color,
    ) -> Result<Label, ResourceError> {
        if let Some(label) = self.label {
            if self.content == content && self.color == color {
                return Ok(label);
            }
        }
        self.release(text);
        let label = text.render_text(content, self.style, color)?;
        self.content.clear();
        self.content.push_str(content);
        self.color = color;
        self.label = Some(label);
        Ok(label)
    }

    pub fn release(&mut self, text: &mut dyn TextProvider) {
        if let Some(label) = self.label.take() {
            text.free(label.handle);
        }
    }
}

/// Every label the scene draws
#[derive(Debug, Clone)]
pub struct LabelCache {
    words: HashMap<ObstacleId, TextSlot>,
    pub current_word: TextSlot,
    pub hud_earth: TextSlot,
    pub hud_score: TextSlot,
    pub level_banner: TextSlot,
    pub game_over: TextSlot,
    pub final_score: TextSlot,
}

impl Default for LabelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelCache {
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            current_word: TextSlot::new(TextStyle::CurrentWord),
            hud_earth: TextSlot::new(TextStyle::Hud),
            hud_score: TextSlot::new(TextStyle::Hud),
            level_banner: TextSlot::new(TextStyle::LevelBanner),
            game_over: TextSlot::new(TextStyle::Overlay),
            final_score: TextSlot::new(TextStyle::Overlay),
        }
    }

    /// Label for an obstacle's word
    pub fn word(
        &mut self,
        text: &mut dyn TextProvider,
        id: ObstacleId,
        word: &str,
        color: Color,
    ) -> Result<Label, ResourceError> {
        self.words
            .entry(id)
            .or_insert_with(|| TextSlot::new(TextStyle::ObstacleWord))
            .update(text, word, color)
    }

    /// Free the labels of obstacles for which `keep` is false
    pub fn retain_words(
        &mut self,
        text: &mut dyn TextProvider,
        mut keep: impl FnMut(ObstacleId) -> bool,
    ) {
        self.words.retain(|id, slot| {
            let kept = keep(*id);
            if !kept {
                slot.release(text);
            }
            kept
        });
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Free everything, e.g. before the host tears down its text backend
    pub fn clear(&mut self, text: &mut dyn TextProvider) {
        self.retain_words(text, |_| false);
        for slot in [
            &mut self.current_word,
            &mut self.hud_earth,
            &mut self.hud_score,
            &mut self.level_banner,
            &mut self.game_over,
            &mut self.final_score,
        ] {
            slot.release(text);
        }
    }
}
