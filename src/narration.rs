//! Spoken prompts and audio feedback
//!
//! The game never waits on a narrator. Implementations must swallow their own
//! failures (no audio device, speech unsupported) so gameplay is unaffected.

use crate::sim::{GameEvent, Mode, Symbol};

/// Receives target announcements and tap feedback
pub trait Narrator {
    /// A new target became active
    fn announce_target(&mut self, mode: Mode, symbol: Symbol);
    /// A bubble was popped
    fn correct(&mut self);
    /// A non-matching bubble was tapped
    fn incorrect(&mut self);
    /// A fresh board was dealt
    fn new_board(&mut self, _placed: usize) {}
    /// The game was stopped; cut off anything still playing
    fn stopped(&mut self) {}
}

/// Prompt spoken for a target, e.g. "Find the letter A"
pub fn prompt(mode: Mode, symbol: Symbol) -> String {
    format!("Find the {} {}", mode.noun(), symbol)
}

/// Forward drained game events to a narrator. Targets are announced in the
/// mode they were selected in, even if the mode changed since.
pub fn narrate<N: Narrator + ?Sized>(events: &[GameEvent], narrator: &mut N) {
    for event in events {
        match event {
            GameEvent::TargetSelected { mode, symbol } => {
                narrator.announce_target(*mode, *symbol)
            }
            GameEvent::BubblePopped { .. } => narrator.correct(),
            GameEvent::WrongTap { .. } => narrator.incorrect(),
            GameEvent::BoardGenerated { placed, .. } => narrator.new_board(*placed),
            GameEvent::Stopped => narrator.stopped(),
            _ => {}
        }
    }
}

/// Narrator that writes to the log, used by the native build
#[derive(Debug, Default)]
pub struct LogNarrator;

impl Narrator for LogNarrator {
    fn announce_target(&mut self, mode: Mode, symbol: Symbol) {
        log::info!("🔊 {}", prompt(mode, symbol));
    }

    fn correct(&mut self) {
        log::info!("🔊 pop!");
    }

    fn incorrect(&mut self) {
        log::info!("🔊 try again");
    }

    fn new_board(&mut self, placed: usize) {
        log::info!("🔊 {} new bubbles", placed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BubbleId, Command, GameState, Rules, TickInput, tick};

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl Narrator for Recorder {
        fn announce_target(&mut self, mode: Mode, symbol: Symbol) {
            self.lines.push(prompt(mode, symbol));
        }
        fn correct(&mut self) {
            self.lines.push("correct".into());
        }
        fn incorrect(&mut self) {
            self.lines.push("incorrect".into());
        }
    }

    #[test]
    fn test_prompt_wording() {
        assert_eq!(prompt(Mode::Letters, "A"), "Find the letter A");
        assert_eq!(prompt(Mode::Digits, "7"), "Find the number 7");
        assert_eq!(prompt(Mode::Colors, "Red"), "Find the color Red");
    }

    #[test]
    fn test_narrate_dispatch() {
        let events = vec![
            GameEvent::BoardGenerated {
                placed: 12,
                requested: 12,
            },
            GameEvent::TargetSelected {
                mode: Mode::Letters,
                symbol: "B",
            },
            GameEvent::WrongTap {
                id: BubbleId(1),
                symbol: "C",
            },
            GameEvent::BubblePopped {
                id: BubbleId(2),
                symbol: "B",
            },
            GameEvent::BubbleRemoved { id: BubbleId(2) },
        ];
        let mut rec = Recorder::default();
        narrate(&events, &mut rec);
        assert_eq!(rec.lines, vec!["Find the letter B", "incorrect", "correct"]);
    }

    #[test]
    fn test_narrate_through_trait_object() {
        let mut rec = Recorder::default();
        {
            let narrator: &mut dyn Narrator = &mut rec;
            narrate(
                &[GameEvent::TargetSelected {
                    mode: Mode::Colors,
                    symbol: "Blue",
                }],
                narrator,
            );
        }
        assert_eq!(rec.lines, vec!["Find the color Blue"]);
    }

    #[test]
    fn test_reset_then_mode_switch_in_one_frame() {
        let mut state = GameState::new(42, Mode::Letters, Rules::default());
        let input = TickInput {
            commands: vec![Command::Reset, Command::SwitchMode(Mode::Colors)],
            ..Default::default()
        };
        tick(&mut state, &input, 0);

        let mut rec = Recorder::default();
        narrate(&state.drain_events(), &mut rec);
        assert_eq!(rec.lines.len(), 2);
        assert!(rec.lines[0].starts_with("Find the letter "), "{:?}", rec.lines);
        assert!(rec.lines[1].starts_with("Find the color "), "{:?}", rec.lines);
    }
}
