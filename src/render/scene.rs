//! Scene composition
//!
//! Draw order, back to front: starfield, thruster trail, ship, obstacles with
//! their word labels and bursts, level banner, game-over overlay, HUD, and the
//! current-word box.

use super::labels::LabelCache;
use super::{Rect, Renderer, SpriteSource, TextProvider, TextureHandle};
use crate::error::ResourceError;
use crate::sim::{GameState, Particle};
use crate::{Color, ScreenGeometry};

/// Scene colors
pub mod palette {
    use crate::Color;

    pub const OBSTACLE: Color = Color::rgb(255, 0, 0);
    pub const WORD: Color = Color::rgb(220, 50, 47);
    pub const WORD_TARGETED: Color = Color::rgb(133, 153, 0);
    /// Fill behind word labels and the current-word box
    pub const TEXT_BACKGROUND: Color = Color::rgb(0, 43, 54);
    pub const CURRENT_WORD_BORDER: Color = Color::rgb(38, 139, 210);
    pub const CURRENT_WORD_TEXT: Color = Color::rgb(238, 232, 213);
    pub const STAR: Color = Color::WHITE;
    pub const OVERLAY_TEXT: Color = Color::WHITE;
}

/// Layout constants (px)
pub mod layout {
    /// Gap between an obstacle and its word label
    pub const WORD_MARGIN: f32 = 10.0;
    pub const WORD_PADDING: f32 = 1.0;
    pub const WORD_BORDER: f32 = 1.0;

    pub const CURRENT_WORD_WIDTH: f32 = 350.0;
    pub const CURRENT_WORD_HEIGHT: f32 = 37.0;
    pub const CURRENT_WORD_PADDING: f32 = 5.0;
    pub const CURRENT_WORD_MARGIN: f32 = 16.0;
    pub const CURRENT_WORD_BORDER: f32 = 1.0;

    pub const HUD_MARGIN_RIGHT: f32 = 16.0;
    pub const HUD_MARGIN_BOTTOM: f32 = 8.0;

    /// Vertical gap between "GAME OVER" and the final score
    pub const FINAL_SCORE_GAP: f32 = 64.0;
}

/// Host textures the scene needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneAssets {
    pub ship: TextureHandle,
}

impl SceneAssets {
    pub const SHIP: &'static str = "ship";

    pub fn load(source: &mut dyn SpriteSource) -> Result<Self, ResourceError> {
        let ship = source.load_sprite(Self::SHIP)?;
        log::debug!("Loaded scene sprites");
        Ok(Self { ship })
    }
}

/// Draws a [`GameState`], keeping the labels it needs between frames
pub struct Scene {
    assets: SceneAssets,
    labels: LabelCache,
}

impl Scene {
    pub fn new(assets: SceneAssets) -> Self {
        Self {
            assets,
            labels: LabelCache::new(),
        }
    }

    pub fn labels(&self) -> &LabelCache {
        &self.labels
    }

    /// Draw one frame and present it. Reads `state` only.
    pub fn draw(
        &mut self,
        state: &GameState,
        renderer: &mut dyn Renderer,
        text: &mut dyn TextProvider,
    ) -> Result<(), ResourceError> {
        let screen = state.screen;
        renderer.fill_rect(Rect::new(0.0, 0.0, screen.width, screen.height), Color::BLACK);

        for star in state.starfield.stars() {
            let p = star.pos;
            if p.x < 0.0 || p.x > screen.width || p.y < 0.0 || p.y > screen.height {
                continue;
            }
            renderer.fill_rect(Rect::new(p.x, p.y, star.size, star.size), palette::STAR);
        }

        let thruster = &state.player.thruster;
        draw_particles(renderer, thruster.particles(), thruster.particle_size);
        renderer.draw_sprite(
            self.assets.ship,
            Rect::square(state.player.ship_pos, state.player.ship_size),
        );

        self.draw_obstacles(state, renderer, text)?;

        if state.show_level_banner() {
            let label = self.labels.level_banner.update(
                text,
                &format!("Level {}", state.level()),
                palette::OVERLAY_TEXT,
            )?;
            renderer.draw_sprite(
                label.handle,
                Rect::new(
                    screen.center_x() - label.width / 2.0,
                    screen.height / 3.0 - label.height / 2.0,
                    label.width,
                    label.height,
                ),
            );
        }

        if state.is_game_over() {
            self.draw_game_over(state.score(), &screen, renderer, text)?;
        }

        self.draw_hud(state, renderer, text)?;
        self.draw_current_word(state.matcher.typed(), &screen, renderer, text)?;

        renderer.present();
        Ok(())
    }

    /// Free every cached label
    pub fn release(&mut self, text: &mut dyn TextProvider) {
        self.labels.clear(text);
    }

    fn draw_obstacles(
        &mut self,
        state: &GameState,
        renderer: &mut dyn Renderer,
        text: &mut dyn TextProvider,
    ) -> Result<(), ResourceError> {
        let obstacles = state.scheduler.obstacles();
        self.labels
            .retain_words(text, |id| obstacles.iter().any(|o| o.id == id && o.is_active()));

        for obstacle in obstacles {
            if obstacle.is_active() && obstacle.is_visible(&state.screen) {
                let body = Rect::square(obstacle.pos, obstacle.size);
                renderer.fill_rect(body, palette::OBSTACLE);

                let color = if obstacle.is_targeted() {
                    palette::WORD_TARGETED
                } else {
                    palette::WORD
                };
                let label = self.labels.word(text, obstacle.id, obstacle.word(), color)?;
                let word_rect = Rect::new(
                    body.x + body.w + layout::WORD_MARGIN,
                    body.y + body.h / 2.0 - label.height / 2.0,
                    label.width,
                    label.height,
                );
                let background = word_rect.expand(layout::WORD_PADDING);
                renderer.fill_rect(background.expand(layout::WORD_BORDER), color);
                renderer.fill_rect(background, palette::TEXT_BACKGROUND);
                renderer.draw_sprite(label.handle, word_rect);
            }
            if let Some(burst) = obstacle.burst() {
                draw_particles(renderer, burst.particles(), burst.particle_size);
            }
        }
        Ok(())
    }

    fn draw_game_over(
        &mut self,
        score: u64,
        screen: &ScreenGeometry,
        renderer: &mut dyn Renderer,
        text: &mut dyn TextProvider,
    ) -> Result<(), ResourceError> {
        let title = self
            .labels
            .game_over
            .update(text, "GAME OVER", palette::OVERLAY_TEXT)?;
        let title_y = screen.height / 3.0 - title.height / 2.0;
        renderer.draw_sprite(
            title.handle,
            Rect::new(
                screen.center_x() - title.width / 2.0,
                title_y,
                title.width,
                title.height,
            ),
        );

        let result = self.labels.final_score.update(
            text,
            &format!("Your score: {}", score),
            palette::OVERLAY_TEXT,
        )?;
        renderer.draw_sprite(
            result.handle,
            Rect::new(
                screen.center_x() - result.width / 2.0,
                screen.height / 3.0 - result.height / 2.0 + title.height + layout::FINAL_SCORE_GAP,
                result.width,
                result.height,
            ),
        );
        Ok(())
    }

    fn draw_hud(
        &mut self,
        state: &GameState,
        renderer: &mut dyn Renderer,
        text: &mut dyn TextProvider,
    ) -> Result<(), ResourceError> {
        let screen = &state.screen;
        let earth = self.labels.hud_earth.update(
            text,
            &format!("Earth: {}%", state.player.health_percent()),
            palette::OVERLAY_TEXT,
        )?;
        let score = self.labels.hud_score.update(
            text,
            &format!("Score: {}", state.score()),
            palette::OVERLAY_TEXT,
        )?;

        let score_y = screen.height - score.height - layout::HUD_MARGIN_BOTTOM;
        renderer.draw_sprite(
            earth.handle,
            Rect::new(
                screen.width - earth.width - layout::HUD_MARGIN_RIGHT,
                score_y - earth.height,
                earth.width,
                earth.height,
            ),
        );
        renderer.draw_sprite(
            score.handle,
            Rect::new(
                screen.width - score.width - layout::HUD_MARGIN_RIGHT,
                score_y,
                score.width,
                score.height,
            ),
        );
        Ok(())
    }

    fn draw_current_word(
        &mut self,
        typed: &str,
        screen: &ScreenGeometry,
        renderer: &mut dyn Renderer,
        text: &mut dyn TextProvider,
    ) -> Result<(), ResourceError> {
        use layout::*;

        let background = Rect::new(
            screen.center_x() - CURRENT_WORD_WIDTH / 2.0 - CURRENT_WORD_PADDING,
            screen.height - CURRENT_WORD_HEIGHT - CURRENT_WORD_PADDING - CURRENT_WORD_MARGIN,
            CURRENT_WORD_WIDTH + CURRENT_WORD_PADDING * 2.0,
            CURRENT_WORD_HEIGHT + CURRENT_WORD_PADDING * 2.0,
        );
        renderer.fill_rect(
            background.expand(CURRENT_WORD_BORDER),
            palette::CURRENT_WORD_BORDER,
        );
        renderer.fill_rect(background, palette::TEXT_BACKGROUND);

        let label = self.labels.current_word.update(
            text,
            &format!("{}_", typed),
            palette::CURRENT_WORD_TEXT,
        )?;
        renderer.draw_sprite(
            label.handle,
            Rect::new(
                background.x + CURRENT_WORD_PADDING,
                background.y + CURRENT_WORD_PADDING,
                label.width,
                label.height,
            ),
        );
        Ok(())
    }
}

/// Live particles as filled squares, in stored (back-to-front) order
fn draw_particles(renderer: &mut dyn Renderer, particles: &[Particle], size: f32) {
    for particle in particles.iter().filter(|p| p.is_alive()) {
        renderer.fill_rect(Rect::square(particle.pos, size), particle.color);
    }
}
