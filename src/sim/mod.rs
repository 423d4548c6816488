//! Bubble layout and target rotation
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform code:
//! - Seeded RNG only
//! - Time advances only through `tick`/`advance`
//! - Stable iteration order (by bubble ID)

pub mod layout;
pub mod mode;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use layout::{LayoutParams, place_board, place_positions};
pub use mode::{COLOR_NAMES, DIGITS, FillRule, LETTERS, Mode, PALETTE, Swatch, Symbol};
pub use schedule::{Continuation, Scheduler};
pub use snapshot::{BubbleView, Snapshot};
pub use state::{Board, Bubble, BubbleId, GameEvent, GamePhase, GameState, Rules, Timings, Wheel};
pub use tick::{Command, TapOutcome, TickInput, advance, apply_command, auto_tap, tap, tick};
