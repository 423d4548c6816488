//! JavaScript bridge
//!
//! The page owns the DOM and the animation frame loop. It calls `advance`
//! every frame, forwards taps by bubble id, and redraws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::audio::WebNarrator;
use crate::narration::narrate;
use crate::settings::Settings;
use crate::sim::{
    BubbleId, Command, GameState, Mode, Snapshot, TapOutcome, advance, apply_command, tap,
};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Bubble Pop starting...");
}

/// Game instance handed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    settings: Settings,
    narrator: WebNarrator,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a game in an arena `arena_width` pixels wide
    #[wasm_bindgen(constructor)]
    pub fn new(arena_width: f32) -> WebGame {
        let settings = Settings::load();
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let mut state = GameState::new(seed, settings.mode, settings.rules(arena_width / 2.0));
        state.wheel.speed = settings.wheel_speed;
        let narrator = WebNarrator::new(&settings);

        let mut game = WebGame {
            state,
            settings,
            narrator,
        };
        game.command(Command::Reset);
        game
    }

    /// Advance game time by `dt_ms` milliseconds
    pub fn advance(&mut self, dt_ms: f64) {
        // Clamp long gaps (background tab) to keep the delays visible
        let dt = dt_ms.clamp(0.0, 1000.0) as u64;
        advance(&mut self.state, dt);
        self.flush();
    }

    /// Forward a tap. Returns "correct", "incorrect" or "ignored".
    pub fn tap(&mut self, id: u32) -> String {
        let outcome = tap(&mut self.state, BubbleId(id));
        self.flush();
        match outcome {
            TapOutcome::Correct => "correct",
            TapOutcome::Incorrect => "incorrect",
            TapOutcome::Ignored => "ignored",
        }
        .to_string()
    }

    pub fn reset(&mut self) {
        self.command(Command::Reset);
    }

    /// Switch to a mode by name ("letters", "digits", "colors")
    pub fn switch_mode(&mut self, name: &str) {
        match Mode::from_str(name) {
            Some(mode) => {
                self.settings.mode = mode;
                self.settings.save();
                self.command(Command::SwitchMode(mode));
            }
            None => log::warn!("Unknown mode: {}", name),
        }
    }

    /// Cycle to the next mode
    pub fn next_mode(&mut self) {
        self.command(Command::NextMode);
        self.settings.mode = self.state.mode;
        self.settings.save();
    }

    pub fn set_speed(&mut self, multiplier: f32) {
        self.command(Command::SetSpeed(multiplier));
        if self.state.wheel.speed == multiplier {
            self.settings.wheel_speed = multiplier;
            self.settings.save();
        }
    }

    pub fn toggle_wheel(&mut self) {
        self.command(Command::ToggleWheel);
    }

    pub fn set_speech(&mut self, enabled: bool) {
        self.settings.speech = enabled;
        self.settings.save();
        self.narrator.apply_settings(&self.settings);
    }

    pub fn set_sound_effects(&mut self, enabled: bool) {
        self.settings.sound_effects = enabled;
        self.settings.save();
        self.narrator.apply_settings(&self.settings);
    }

    pub fn quit(&mut self) {
        self.command(Command::Quit);
    }

    /// Current frame as JSON (see `Snapshot`)
    pub fn snapshot_json(&self) -> String {
        Snapshot::capture(&self.state)
            .to_json()
            .unwrap_or_else(|e| {
                log::error!("Snapshot failed: {}", e);
                String::from("{}")
            })
    }
}

impl WebGame {
    fn command(&mut self, command: Command) {
        apply_command(&mut self.state, command);
        self.flush();
    }

    /// Hand pending events to the narrator
    fn flush(&mut self) {
        let events = self.state.drain_events();
        narrate(&events, &mut self.narrator);
    }
}
