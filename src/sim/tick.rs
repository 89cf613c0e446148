//! Per-frame simulation step
//!
//! Advances the run by one variable-length frame. Order within a frame:
//! background, level banner, player, level scheduler, then input.

use super::state::{GameEvent, GameState};
use crate::input::KeyEvent;

/// Delay between autoplay keystrokes (ms)
pub const AUTOPLAY_KEY_INTERVAL_MS: f32 = 180.0;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key pressed since the last frame, if any
    pub key: Option<KeyEvent>,
    /// Demo mode - the run types for itself
    pub autoplay: bool,
    /// Skip to next level (debug/testing)
    pub skip_level: bool,
}

/// Advance the game state by `dt` milliseconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = clamp_frame(dt, state.tuning.max_frame_ms);

    // Frozen after game over; only leaving is possible
    if state.is_game_over() {
        if let Some(key) = input.key {
            state.handle_key(key, &mut events);
        }
        return events;
    }

    state.time_ms += dt as f64;
    state.starfield.update(dt, state.rng.as_mut());
    state.level_banner_ms = (state.level_banner_ms - dt).max(0.0);
    state.player.update(dt);

    if input.skip_level {
        state.scheduler.next_level(&mut events);
    }
    let cleared = state
        .scheduler
        .update(dt, state.rng.as_mut(), &state.words, &mut events);
    state.apply_events(&mut events);
    if state.is_game_over() {
        return events;
    }
    if cleared {
        // Apply only the new LevelChanged; earlier events are already applied
        let mut level_events = Vec::new();
        state.scheduler.next_level(&mut level_events);
        state.apply_events(&mut level_events);
        events.append(&mut level_events);
    }

    state.matcher.release_if_inactive(state.scheduler.obstacles());

    if let Some(key) = input.key {
        state.handle_key(key, &mut events);
    }
    if input.autoplay {
        state.autoplay_cooldown_ms -= dt;
        if state.autoplay_cooldown_ms <= 0.0 {
            state.autoplay_cooldown_ms = 0.0;
            if let Some(key) = autoplay_key(state) {
                state.handle_key(key, &mut events);
                state.autoplay_cooldown_ms = AUTOPLAY_KEY_INTERVAL_MS;
            }
        }
    }

    events
}

/// Clamp a host frame delta into `[0, max_frame_ms]`
fn clamp_frame(dt: f32, max_frame_ms: f32) -> f32 {
    if dt.is_nan() || dt < 0.0 {
        log::warn!("Ignoring invalid frame delta {}", dt);
        0.0
    } else if dt > max_frame_ms {
        log::warn!("Frame delta {}ms clamped to {}ms", dt, max_frame_ms);
        max_frame_ms
    } else {
        dt
    }
}

/// Next letter autoplay would type: continue the current word, otherwise
/// start on the lowest visible obstacle.
fn autoplay_key(state: &GameState) -> Option<KeyEvent> {
    if let Some(id) = state.matcher.target() {
        let obstacle = state.scheduler.obstacle(id)?;
        let next = obstacle
            .word()
            .chars()
            .nth(state.matcher.typed().len())?;
        return Some(KeyEvent::Letter(next));
    }
    state
        .scheduler
        .obstacles()
        .iter()
        .filter(|o| o.is_active() && o.is_visible(&state.screen))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .and_then(|o| o.word().chars().next())
        .map(KeyEvent::Letter)
}
