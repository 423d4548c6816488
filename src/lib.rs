//! Bubble Pop - tap every bubble that matches the target
//!
//! Core modules:
//! - `sim`: Board layout and target rotation (deterministic given a seed)
//! - `narration`: Narrator trait and target prompts
//! - `settings`: Tunable rules and preferences
//! - `audio`: Web Audio cues and speech (wasm only)
//! - `web`: JavaScript bridge (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod narration;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use narration::{LogNarrator, Narrator, narrate};
pub use settings::{BoardPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Half the normalized arena extent; the arena spans [0, 100]
    pub const NORMALIZED_HALF_EXTENT: f32 = 50.0;

    /// Bubbles dealt per board
    pub const BUBBLES_PER_BOARD: usize = 12;
    /// Minimum center distance between bubbles (normalized units).
    /// Fixed, does not follow bubble size.
    pub const MIN_SEPARATION: f32 = 12.0;
    /// Candidate positions tried per bubble before it is dropped
    pub const PLACEMENT_ATTEMPTS: u32 = 80;

    /// Bubble diameter as a fraction of arena width
    pub const BUBBLE_DIAMETER_RATIO: f32 = 0.10;
    /// Slightly smaller bubbles for the compact layout
    pub const COMPACT_BUBBLE_DIAMETER_RATIO: f32 = 0.095;

    /// Pop animation before a bubble leaves the board
    pub const POP_DELAY_MS: u64 = 250;
    /// Pause between clearing a target and choosing the next
    pub const NEXT_TARGET_DELAY_MS: u64 = 300;
    /// How long the incorrect marker stays on a bubble
    pub const WRONG_MARKER_MS: u64 = 300;
    /// Pause before an emptied board is replaced
    pub const REGENERATE_DELAY_MS: u64 = 400;

    /// Decorative wheel revolution time at 1x speed
    pub const WHEEL_BASE_PERIOD_SECS: f32 = 25.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
