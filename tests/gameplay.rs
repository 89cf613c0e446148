//! Full-run scenarios driven through the public API

use astrotyper::error::ResourceError;
use astrotyper::render::{
    Label, Rect, Renderer, Scene, SceneAssets, SpriteSource, TextProvider, TextStyle,
    TextureHandle,
};
use astrotyper::sim::{
    GameEvent, GameState, ScriptedRandom, SeededRandom, TickInput, WordList, tick,
};
use astrotyper::tuning::{LevelTuning, Tuning};
use astrotyper::{Color, KeyEvent, ScreenGeometry};

const FRAME: f32 = 16.0;

fn key(key: KeyEvent) -> TickInput {
    TickInput {
        key: Some(key),
        ..Default::default()
    }
}

fn type_word(state: &mut GameState, word: &str) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for c in word.chars() {
        events.extend(tick(state, &key(KeyEvent::Letter(c)), FRAME));
    }
    events
}

fn scripted(tuning: Tuning, screen: ScreenGeometry, fraction: f32) -> GameState {
    GameState::with_config(
        tuning,
        screen,
        WordList::default(),
        Box::new(ScriptedRandom::constant(fraction)),
    )
    .unwrap()
}

#[test]
fn level_one_escalates_into_level_two() {
    let mut state = GameState::new(77, ScreenGeometry::default());
    let autoplay = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let mut spawned = 0;
    let mut changed = None;
    for _ in 0..4000 {
        for event in tick(&mut state, &autoplay, FRAME) {
            match event {
                GameEvent::Spawned { .. } => spawned += 1,
                GameEvent::LevelChanged { level } => changed = Some(level),
                _ => {}
            }
        }
        if changed.is_some() {
            break;
        }
    }

    assert_eq!(changed, Some(2));
    assert_eq!(spawned, 5);
    let scheduler = &state.scheduler;
    assert_eq!(scheduler.obstacles_per_level(), 6);
    assert_eq!(scheduler.remaining_to_spawn(), 6);
    assert_eq!(scheduler.spawn_delay(), 4500.0);
    assert!((scheduler.velocity() - 0.11).abs() < 1e-6);
    assert!(scheduler.obstacles().is_empty());
    assert!(state.show_level_banner());
    assert_eq!(state.matcher.typed(), "");
}

#[test]
fn impacts_drain_health_to_game_over() {
    let tuning = Tuning {
        level: LevelTuning {
            start_obstacles: 30,
            start_spawn_delay_ms: 100.0,
            start_velocity: 1.0,
            ..LevelTuning::default()
        },
        ..Tuning::default()
    };
    // Every draw is the midpoint, so every impact deals 7
    let mut state = scripted(tuning, ScreenGeometry::new(800.0, 300.0), 0.5);

    let mut health = state.health();
    let mut impacts = 0;
    let mut game_overs = Vec::new();
    for _ in 0..2000 {
        for event in tick(&mut state, &TickInput::default(), FRAME) {
            match event {
                GameEvent::Impact { damage, .. } => {
                    assert_eq!(damage, 7);
                    impacts += 1;
                }
                GameEvent::GameOver { score, level } => game_overs.push((score, level)),
                _ => {}
            }
        }
        assert!(state.health() <= health);
        health = state.health();
        if state.is_game_over() {
            break;
        }
    }

    assert_eq!(state.health(), 0);
    assert_eq!(impacts, 15);
    assert_eq!(game_overs, vec![(0, 1)]);

    // Frozen: more frames change nothing
    let before = state.time_ms;
    for _ in 0..100 {
        assert!(tick(&mut state, &TickInput::default(), FRAME).is_empty());
    }
    assert_eq!(state.time_ms, before);
    assert_eq!(state.level(), 1);
}

#[test]
fn score_is_letters_times_level_times_ten() {
    let tuning = Tuning {
        level: LevelTuning {
            start_obstacles: 2,
            start_spawn_delay_ms: 16.0,
            ..LevelTuning::default()
        },
        ..Tuning::default()
    };
    // Fraction zero picks the first eligible word: index 1 on level 1
    let mut state = scripted(tuning, ScreenGeometry::default(), 0.0);
    tick(&mut state, &TickInput::default(), FRAME);
    assert_eq!(state.scheduler.obstacles()[0].word(), "up");

    let events = type_word(&mut state, "up");
    assert!(events.contains(&GameEvent::Destroyed { id: 1, points: 20 }));
    assert_eq!(state.score(), 20);

    // Wrong letters are free
    assert!(type_word(&mut state, "zzz").is_empty());
    assert_eq!(state.score(), 20);

    let skip = TickInput {
        skip_level: true,
        ..Default::default()
    };
    tick(&mut state, &skip, FRAME);
    assert_eq!(state.level(), 2);

    let mut spawned = None;
    for _ in 0..100 {
        for event in tick(&mut state, &TickInput::default(), FRAME) {
            if let GameEvent::Spawned { id, word } = event {
                spawned = Some((id, word));
            }
        }
        if spawned.is_some() {
            break;
        }
    }
    let (id, word) = spawned.unwrap();
    assert_eq!(word, "sky");
    let events = type_word(&mut state, &word);
    assert!(events.contains(&GameEvent::Destroyed { id, points: 60 }));
    assert_eq!(state.score(), 80);
}

#[test]
fn backspace_and_escape_through_tick() {
    let tuning = Tuning {
        level: LevelTuning {
            start_spawn_delay_ms: 16.0,
            ..LevelTuning::default()
        },
        ..Tuning::default()
    };
    let mut state = scripted(tuning, ScreenGeometry::default(), 0.0);
    tick(&mut state, &TickInput::default(), FRAME);

    let events = tick(&mut state, &key(KeyEvent::Letter('u')), FRAME);
    assert!(events.contains(&GameEvent::Targeted { id: 1 }));
    assert_eq!(state.matcher.typed(), "u");

    tick(&mut state, &key(KeyEvent::Backspace), FRAME);
    assert_eq!(state.matcher.typed(), "");
    assert_eq!(state.matcher.target(), None);
    assert!(state.scheduler.obstacles().iter().all(|o| !o.is_targeted()));

    tick(&mut state, &key(KeyEvent::Letter('u')), FRAME);
    let events = tick(&mut state, &key(KeyEvent::Escape), FRAME);
    assert!(!events.contains(&GameEvent::ExitRequested));
    assert_eq!(state.matcher.target(), None);

    let events = tick(&mut state, &key(KeyEvent::Escape), FRAME);
    assert!(events.contains(&GameEvent::ExitRequested));
    let events = tick(&mut state, &key(KeyEvent::Quit), FRAME);
    assert!(events.contains(&GameEvent::ExitRequested));
}

#[test]
fn same_seed_same_run() {
    let run = |seed: u64| {
        let mut state = GameState::with_config(
            Tuning::default(),
            ScreenGeometry::default(),
            WordList::default(),
            Box::new(SeededRandom::new(seed)),
        )
        .unwrap();
        let autoplay = TickInput {
            autoplay: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..3000 {
            events.extend(tick(&mut state, &autoplay, FRAME));
        }
        (events, state.score(), state.level())
    };
    assert_eq!(run(5), run(5));
    assert_ne!(run(5).0, run(6).0);
}

#[test]
fn tuning_loads_from_file() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("astrotyper-tuning-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "level": { "start_obstacles": 3 }, "level_banner_ms": 1000 }"#)
        .unwrap();
    let tuning = Tuning::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(tuning.level.start_obstacles, 3);
    assert_eq!(tuning.level_banner_ms, 1000.0);
    assert_eq!(tuning.player.start_health, 100);

    let missing = Tuning::load(dir.join("astrotyper-does-not-exist.json")).unwrap_err();
    assert!(matches!(missing, ResourceError::Io { .. }));
}

#[derive(Default)]
struct NullRenderer {
    frames: usize,
}

impl Renderer for NullRenderer {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
    fn draw_sprite(&mut self, _texture: TextureHandle, _rect: Rect) {}
    fn present(&mut self) {
        self.frames += 1;
    }
}

#[derive(Default)]
struct LiveCount {
    next: u32,
    live: i64,
}

impl TextProvider for LiveCount {
    fn render_text(
        &mut self,
        content: &str,
        _style: TextStyle,
        _color: Color,
    ) -> Result<Label, ResourceError> {
        self.next += 1;
        self.live += 1;
        Ok(Label {
            handle: TextureHandle(self.next),
            width: content.len() as f32 * 12.0,
            height: 24.0,
        })
    }

    fn free(&mut self, _texture: TextureHandle) {
        self.live -= 1;
    }
}

struct Ship;

impl SpriteSource for Ship {
    fn load_sprite(&mut self, _name: &str) -> Result<TextureHandle, ResourceError> {
        Ok(TextureHandle(0))
    }
}

#[test]
fn labels_do_not_leak_over_a_run() {
    let mut state = GameState::new(31337, ScreenGeometry::default());
    let mut scene = Scene::new(SceneAssets::load(&mut Ship).unwrap());
    let mut renderer = NullRenderer::default();
    let mut text = LiveCount::default();
    let autoplay = TickInput {
        autoplay: true,
        ..Default::default()
    };

    for _ in 0..5000 {
        tick(&mut state, &autoplay, FRAME);
        scene.draw(&state, &mut renderer, &mut text).unwrap();
        // One label per on-screen word plus the fixed HUD and overlay slots
        let bound = state.scheduler.obstacles().len() as i64 + 6;
        assert!(text.live <= bound);
        if state.is_game_over() {
            break;
        }
    }
    assert!(renderer.frames > 0);
    scene.release(&mut text);
    assert_eq!(text.live, 0);
}
