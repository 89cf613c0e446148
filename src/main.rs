//! Astrotyper entry point
//!
//! Headless demo: runs a seeded autoplay session against counting render
//! backends and prints a summary.
//!
//! Usage: `astrotyper [SEED] [SECONDS] [TUNING]` (see `--help`)

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use astrotyper::consts::FRAME_MS;
    use astrotyper::error::ResourceError;
    use astrotyper::render::{
        Label, Rect, Renderer, Scene, SceneAssets, SpriteSource, TextProvider, TextStyle,
        TextureHandle,
    };
    use astrotyper::sim::{GameEvent, GameState, SeededRandom, TickInput, WordList, tick};
    use astrotyper::{Color, ScreenGeometry, Tuning};
    use clap::Parser;
    use std::path::PathBuf;

    /// Counts draw calls instead of drawing
    #[derive(Debug, Default)]
    struct CountingRenderer {
        rects: u64,
        sprites: u64,
        frames: u64,
    }

    impl Renderer for CountingRenderer {
        fn fill_rect(&mut self, _rect: Rect, _color: Color) {
            self.rects += 1;
        }

        fn draw_sprite(&mut self, _texture: TextureHandle, _rect: Rect) {
            self.sprites += 1;
        }

        fn present(&mut self) {
            self.frames += 1;
        }
    }

    /// Fixed-width glyph metrics per text role
    #[derive(Debug, Default)]
    struct CountingText {
        next: u32,
        rendered: u64,
        live: u64,
    }

    impl TextProvider for CountingText {
        fn render_text(
            &mut self,
            content: &str,
            style: TextStyle,
            _color: Color,
        ) -> Result<Label, ResourceError> {
            let (glyph_w, glyph_h) = match style {
                TextStyle::ObstacleWord => (10.0, 24.0),
                TextStyle::CurrentWord | TextStyle::Hud => (16.0, 37.0),
                TextStyle::LevelBanner | TextStyle::Overlay => (46.0, 106.0),
            };
            self.next += 1;
            self.rendered += 1;
            self.live += 1;
            Ok(Label {
                handle: TextureHandle(self.next),
                width: content.chars().count() as f32 * glyph_w,
                height: glyph_h,
            })
        }

        fn free(&mut self, _texture: TextureHandle) {
            self.live = self.live.saturating_sub(1);
        }
    }

    struct BuiltinSprites;

    impl SpriteSource for BuiltinSprites {
        fn load_sprite(&mut self, name: &str) -> Result<TextureHandle, ResourceError> {
            match name {
                SceneAssets::SHIP => Ok(TextureHandle(0)),
                _ => Err(ResourceError::Texture {
                    name: name.to_string(),
                    reason: "no such built-in sprite".to_string(),
                }),
            }
        }
    }

    /// Headless autoplay run of the falling-words game
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    struct Options {
        /// RNG seed; a clock-derived seed is used when omitted
        seed: Option<u64>,
        /// Simulated run length in seconds
        #[arg(default_value_t = 120.0, value_parser = parse_seconds)]
        seconds: f32,
        /// JSON tuning file overriding the built-in balance
        tuning: Option<PathBuf>,
    }

    fn parse_seconds(arg: &str) -> Result<f32, String> {
        let seconds: f32 = arg.parse().map_err(|e| format!("{e}"))?;
        if seconds.is_finite() && seconds > 0.0 {
            Ok(seconds)
        } else {
            Err(format!("{seconds} is not a positive number of seconds"))
        }
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    }

    pub fn run() -> Result<(), ResourceError> {
        let options = Options::parse();
        let seed = options.seed.unwrap_or_else(clock_seed);
        let tuning = match &options.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        log::info!("Astrotyper demo starting with seed {}", seed);

        let mut state = GameState::with_config(
            tuning,
            ScreenGeometry::default(),
            WordList::default(),
            Box::new(SeededRandom::new(seed)),
        )?;
        let mut scene = Scene::new(SceneAssets::load(&mut BuiltinSprites)?);
        let mut renderer = CountingRenderer::default();
        let mut text = CountingText::default();

        let input = TickInput {
            autoplay: true,
            ..Default::default()
        };
        let duration_ms = (options.seconds * 1000.0) as f64;
        let mut destroyed = 0u32;
        let mut impacts = 0u32;

        while state.time_ms < duration_ms {
            for event in tick(&mut state, &input, FRAME_MS) {
                match event {
                    GameEvent::Destroyed { id, points } => {
                        destroyed += 1;
                        log::debug!("Destroyed {} for {} points", id, points);
                    }
                    GameEvent::Impact { id, damage } => {
                        impacts += 1;
                        log::debug!("Obstacle {} hit for {}", id, damage);
                    }
                    event => log::trace!("{:?}", event),
                }
            }
            scene.draw(&state, &mut renderer, &mut text)?;
            if state.is_game_over() {
                break;
            }
        }
        scene.release(&mut text);

        println!("seed:      {}", seed);
        println!("time:      {:.1}s", state.time_ms / 1000.0);
        println!("level:     {}", state.level());
        println!("score:     {}", state.score());
        println!("earth:     {}%", state.player.health_percent());
        println!("destroyed: {}", destroyed);
        println!("impacts:   {}", impacts);
        println!(
            "frames:    {} ({} rects, {} sprites, {} labels rendered, {} leaked)",
            renderer.frames, renderer.rects, renderer.sprites, text.rendered, text.live
        );
        if state.is_game_over() {
            println!("GAME OVER");
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let options = Options::try_parse_from(["astrotyper"]).unwrap();
            assert_eq!(options.seed, None);
            assert_eq!(options.seconds, 120.0);
            assert!(options.tuning.is_none());
        }

        #[test]
        fn test_positional_arguments() {
            let options =
                Options::try_parse_from(["astrotyper", "7", "30.5", "balance.json"]).unwrap();
            assert_eq!(options.seed, Some(7));
            assert_eq!(options.seconds, 30.5);
            assert_eq!(options.tuning, Some(PathBuf::from("balance.json")));
        }

        #[test]
        fn test_bad_arguments_are_rejected() {
            assert!(Options::try_parse_from(["astrotyper", "7", "abc"]).is_err());
            assert!(Options::try_parse_from(["astrotyper", "7", "-3"]).is_err());
            assert!(Options::try_parse_from(["astrotyper", "7", "0"]).is_err());
            assert!(Options::try_parse_from(["astrotyper", "seven"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = demo::run() {
        log::error!("{}", e);
        eprintln!("astrotyper: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm; hosts drive `sim::tick` themselves
}
