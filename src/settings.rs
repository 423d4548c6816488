//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Everything the original game kept as
//! hard-coded numbers (bubble count, separation, attempt budget, delays) is
//! tunable here.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{LayoutParams, Mode, Rules, Timings};

/// Bubble size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoardPreset {
    #[default]
    Classic,
    Compact,
}

impl BoardPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPreset::Classic => "Classic",
            BoardPreset::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(BoardPreset::Classic),
            "compact" => Some(BoardPreset::Compact),
            _ => None,
        }
    }

    /// Bubble diameter as a fraction of arena width
    pub fn diameter_ratio(&self) -> f32 {
        match self {
            BoardPreset::Classic => BUBBLE_DIAMETER_RATIO,
            BoardPreset::Compact => COMPACT_BUBBLE_DIAMETER_RATIO,
        }
    }
}

/// Reasons a settings value cannot be used
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Stored JSON did not parse
    Parse(String),
    /// Settings could not be written out as JSON
    Serialize(String),
    ZeroBubbles,
    ZeroAttempts,
    BadSeparation(f32),
    BadDiameterRatio(f32),
    BadWheelSpeed(f32),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Parse(msg) => write!(f, "invalid settings JSON: {}", msg),
            SettingsError::Serialize(msg) => write!(f, "could not serialize settings: {}", msg),
            SettingsError::ZeroBubbles => f.write_str("bubble count must be at least 1"),
            SettingsError::ZeroAttempts => f.write_str("placement attempts must be at least 1"),
            SettingsError::BadSeparation(v) => {
                write!(f, "minimum separation must be positive, got {}", v)
            }
            SettingsError::BadDiameterRatio(v) => {
                write!(f, "bubble diameter ratio must be in (0, 1), got {}", v)
            }
            SettingsError::BadWheelSpeed(v) => {
                write!(f, "wheel speed must be positive, got {}", v)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode the game starts in
    pub mode: Mode,
    /// Bubble size preset
    pub preset: BoardPreset,

    // === Board rules ===
    /// Bubbles dealt per board
    pub bubble_count: usize,
    /// Bubble diameter as a fraction of arena width
    pub bubble_diameter_ratio: f32,
    /// Minimum center distance (normalized arena units)
    pub min_separation: f32,
    /// Candidate positions per bubble
    pub placement_attempts: u32,
    /// Delays between taps and their consequences
    pub timings: Timings,

    // === Wheel ===
    /// Decorative wheel speed multiplier
    pub wheel_speed: f32,

    // === Audio ===
    /// Speak each new target
    pub speech: bool,
    /// Correct/incorrect tones
    pub sound_effects: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Letters,
            preset: BoardPreset::Classic,

            bubble_count: BUBBLES_PER_BOARD,
            bubble_diameter_ratio: BUBBLE_DIAMETER_RATIO,
            min_separation: MIN_SEPARATION,
            placement_attempts: PLACEMENT_ATTEMPTS,
            timings: Timings::default(),

            wheel_speed: 1.0,

            speech: true,
            sound_effects: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Create settings from a board preset
    pub fn from_preset(preset: BoardPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a board preset (updates the bubble size)
    pub fn apply_preset(&mut self, preset: BoardPreset) {
        self.preset = preset;
        self.bubble_diameter_ratio = preset.diameter_ratio();
    }

    /// Check every value the game depends on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.bubble_count == 0 {
            return Err(SettingsError::ZeroBubbles);
        }
        if self.placement_attempts == 0 {
            return Err(SettingsError::ZeroAttempts);
        }
        if !(self.min_separation.is_finite() && self.min_separation > 0.0) {
            return Err(SettingsError::BadSeparation(self.min_separation));
        }
        let ratio = self.bubble_diameter_ratio;
        if !(ratio.is_finite() && ratio > 0.0 && ratio < 1.0) {
            return Err(SettingsError::BadDiameterRatio(ratio));
        }
        if !(self.wheel_speed.is_finite() && self.wheel_speed > 0.0) {
            return Err(SettingsError::BadWheelSpeed(self.wheel_speed));
        }
        Ok(())
    }

    /// Game rules for an arena of `arena_radius` (any unit)
    pub fn rules(&self, arena_radius: f32) -> Rules {
        Rules {
            layout: LayoutParams {
                count: self.bubble_count,
                min_separation: self.min_separation,
                max_attempts: self.placement_attempts,
                ..LayoutParams::for_arena(arena_radius, self.bubble_diameter_ratio)
            },
            timings: self.timings,
        }
    }

    /// Effective sound effect volume (0.0 when disabled)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sound_effects {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Parse and validate stored settings
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bubble_pop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
