//! Render-ready view of the game
//!
//! Renderers draw from a `Snapshot` and report taps back by bubble id. The
//! snapshot is plain data so it can cross the wasm boundary as JSON.

use serde::Serialize;

use super::mode::Mode;
use super::state::{GamePhase, GameState};

/// One bubble as a renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleView {
    pub id: u32,
    /// Left offset in percent of the arena width
    pub x: f32,
    /// Top offset in percent of the arena height
    pub y: f32,
    /// Radius in percent of the arena width
    pub radius: f32,
    /// Text to draw, if the mode shows one
    pub label: Option<&'static str>,
    /// CSS hex fill
    pub fill: &'static str,
    pub popped: bool,
    pub wrong: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub phase: GamePhase,
    /// Target text for the banner (empty when there is none)
    pub target: &'static str,
    pub bubbles: Vec<BubbleView>,
    pub wheel_period_secs: f32,
    pub wheel_paused: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let bubbles = state
            .board
            .bubbles
            .iter()
            .map(|b| BubbleView {
                id: b.id.0,
                x: b.pos.x,
                y: b.pos.y,
                radius: b.radius,
                label: state.mode.label(b.symbol),
                fill: b.fill.hex,
                popped: b.popped,
                wrong: b.wrong,
            })
            .collect();

        Self {
            mode: state.mode,
            phase: state.phase,
            target: state.target.unwrap_or(""),
            bubbles,
            wheel_period_secs: state.wheel.period_secs(),
            wheel_paused: state.wheel.paused,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Rules;
    use crate::sim::tick::{Command, apply_command};

    #[test]
    fn test_snapshot_mirrors_board() {
        let state = GameState::start(10, Mode::Letters, Rules::default());
        let snap = Snapshot::capture(&state);

        assert_eq!(snap.bubbles.len(), state.board.len());
        assert_eq!(Some(snap.target), state.target);
        for (view, bubble) in snap.bubbles.iter().zip(&state.board.bubbles) {
            assert_eq!(view.id, bubble.id.0);
            assert_eq!(view.label, Some(bubble.symbol));
            assert_eq!(view.fill, bubble.fill.hex);
        }
    }

    #[test]
    fn test_colors_snapshot_has_no_labels() {
        let state = GameState::start(10, Mode::Colors, Rules::default());
        let snap = Snapshot::capture(&state);
        assert!(snap.bubbles.iter().all(|b| b.label.is_none()));
    }

    #[test]
    fn test_quit_snapshot_is_blank() {
        let mut state = GameState::start(10, Mode::Digits, Rules::default());
        apply_command(&mut state, Command::Quit);
        let snap = Snapshot::capture(&state);
        assert!(snap.bubbles.is_empty());
        assert_eq!(snap.target, "");
        assert_eq!(snap.phase, GamePhase::Idle);
    }

    #[test]
    fn test_snapshot_json() {
        let state = GameState::start(4, Mode::Digits, Rules::default());
        let json = Snapshot::capture(&state).to_json().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["mode"], "Digits");
        assert_eq!(value["phase"], "Active");
        assert_eq!(
            value["bubbles"].as_array().map(|a| a.len()),
            Some(state.board.len())
        );
    }
}
