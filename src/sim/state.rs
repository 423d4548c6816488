//! Game state and core board types
//!
//! Everything the target rotation state machine mutates lives in one owned
//! `GameState`. Presentation code only ever sees it through events and
//! snapshots.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::LayoutParams;
use super::mode::{Mode, Swatch, Symbol};
use super::schedule::Scheduler;
use crate::consts::*;

/// Stable handle for a bubble, unique for the lifetime of a `GameState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BubbleId(pub u32);

/// Hands out bubble IDs, never reusing one
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn allocate(&mut self) -> BubbleId {
        let id = BubbleId(self.next);
        self.next += 1;
        id
    }
}

/// A tappable bubble on the board
#[derive(Debug, Clone, Serialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub symbol: Symbol,
    /// Center in normalized arena coordinates ([0, 100] on both axes)
    pub pos: Vec2,
    /// Radius in normalized arena units
    pub radius: f32,
    /// Decorative fill, never compared against the target
    pub fill: Swatch,
    /// Tapped correctly and waiting for removal
    pub popped: bool,
    /// Transient "incorrect" marker
    pub wrong: bool,
}

impl Bubble {
    pub fn new(id: BubbleId, symbol: Symbol, pos: Vec2, radius: f32, fill: Swatch) -> Self {
        Self {
            id,
            symbol,
            pos,
            radius,
            fill,
            popped: false,
            wrong: false,
        }
    }
}

/// The set of bubbles currently in the arena
#[derive(Debug, Clone, Default, Serialize)]
pub struct Board {
    /// Bubbles ordered by id
    pub bubbles: Vec<Bubble>,
    /// How many bubbles the layout engine was asked for
    pub requested: usize,
}

impl Board {
    pub fn new(requested: usize) -> Self {
        Self {
            bubbles: Vec::with_capacity(requested),
            requested,
        }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BubbleId) -> Option<&mut Bubble> {
        self.bubbles.iter_mut().find(|b| b.id == id)
    }

    /// Remove a bubble, returning it if it was still on the board
    pub fn remove(&mut self, id: BubbleId) -> Option<Bubble> {
        let idx = self.bubbles.iter().position(|b| b.id == id)?;
        Some(self.bubbles.remove(idx))
    }

    /// Any bubble (popped or not) still carrying `symbol`
    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.bubbles.iter().any(|b| b.symbol == symbol)
    }

    /// Distinct symbols of bubbles that can still be tapped, in sorted order
    pub fn live_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self
            .bubbles
            .iter()
            .filter(|b| !b.popped)
            .map(|b| b.symbol)
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// Smallest center-to-center distance between any two bubbles
    pub fn min_pair_distance(&self) -> Option<f32> {
        let mut best: Option<f32> = None;
        for (i, a) in self.bubbles.iter().enumerate() {
            for b in &self.bubbles[i + 1..] {
                let d = a.pos.distance(b.pos);
                best = Some(best.map_or(d, |m| m.min(d)));
            }
        }
        best
    }
}

/// Current phase of the target rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No board, or waiting for one to be generated
    Idle,
    /// Choosing the next target
    Selecting,
    /// Target set, taps are processed
    Active,
    /// Target cleared, next selection pending, taps locked
    Draining,
}

/// Things that happened during a state change, drained by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new board was laid out
    BoardGenerated { placed: usize, requested: usize },
    /// A new target became active, in the mode it was drawn from
    TargetSelected { mode: Mode, symbol: Symbol },
    /// Correct tap; removal is scheduled
    BubblePopped { id: BubbleId, symbol: Symbol },
    /// A popped bubble left the board
    BubbleRemoved { id: BubbleId },
    /// Incorrect tap; marker clear is scheduled
    WrongTap { id: BubbleId, symbol: Symbol },
    /// The incorrect marker expired
    WrongCleared { id: BubbleId },
    /// Last bubble of the target was removed
    TargetCleared { symbol: Symbol },
    /// Selection found nothing left; a fresh board is scheduled
    BoardExhausted,
    /// Game torn down by the player
    Stopped,
}

/// Delays between a trigger and its scheduled continuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Pop animation before the bubble is removed
    pub pop_ms: u64,
    /// Pause between a target clearing and the next selection
    pub next_target_ms: u64,
    /// Lifetime of the incorrect marker
    pub wrong_marker_ms: u64,
    /// Pause before an exhausted board is regenerated
    pub regenerate_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            pop_ms: POP_DELAY_MS,
            next_target_ms: NEXT_TARGET_DELAY_MS,
            wrong_marker_ms: WRONG_MARKER_MS,
            regenerate_ms: REGENERATE_DELAY_MS,
        }
    }
}

/// Tunable rules for a game
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rules {
    pub layout: LayoutParams,
    pub timings: Timings,
}

/// Decorative spinning wheel behind the arena. Has no effect on gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wheel {
    pub speed: f32,
    pub paused: bool,
}

impl Default for Wheel {
    fn default() -> Self {
        Self {
            speed: 1.0,
            paused: false,
        }
    }
}

impl Wheel {
    /// Seconds per full revolution at the current speed
    pub fn period_secs(&self) -> f32 {
        WHEEL_BASE_PERIOD_SECS / self.speed
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: Mode,
    pub rules: Rules,
    pub board: Board,
    /// Symbol the player must clear, drawn from the board when set
    pub target: Option<Symbol>,
    pub phase: GamePhase,
    pub wheel: Wheel,
    /// Milliseconds of game time elapsed
    pub clock_ms: u64,
    /// Pending timed continuations
    pub scheduler: Scheduler,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) ids: IdAllocator,
}

impl GameState {
    /// Create an idle game with no board yet
    pub fn new(seed: u64, mode: Mode, rules: Rules) -> Self {
        Self {
            mode,
            rules,
            board: Board::default(),
            target: None,
            phase: GamePhase::Idle,
            wheel: Wheel::default(),
            clock_ms: 0,
            scheduler: Scheduler::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            ids: IdAllocator::default(),
        }
    }

    /// Create a game and lay out its first board
    pub fn start(seed: u64, mode: Mode, rules: Rules) -> Self {
        let mut state = Self::new(seed, mode, rules);
        super::tick::start_level(&mut state);
        state
    }

    /// Allocate a new bubble ID
    pub fn next_bubble_id(&mut self) -> BubbleId {
        self.ids.allocate()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a tap would currently be processed
    pub fn accepting_taps(&self) -> bool {
        self.phase == GamePhase::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mode::PALETTE;

    fn bubble(id: u32, symbol: Symbol, x: f32) -> Bubble {
        Bubble::new(BubbleId(id), symbol, Vec2::new(x, 50.0), 5.0, PALETTE[0])
    }

    #[test]
    fn test_live_symbols_dedup_and_skip_popped() {
        let mut board = Board::new(4);
        board.bubbles.push(bubble(1, "B", 10.0));
        board.bubbles.push(bubble(2, "A", 30.0));
        board.bubbles.push(bubble(3, "A", 50.0));
        board.bubbles.push(bubble(4, "C", 70.0));
        board.bubbles[3].popped = true;

        assert_eq!(board.live_symbols(), vec!["A", "B"]);
        // Popped bubbles still count as present until removed
        assert!(board.has_symbol("C"));
    }

    #[test]
    fn test_remove_unknown_id_is_none() {
        let mut board = Board::new(1);
        board.bubbles.push(bubble(1, "A", 10.0));
        assert!(board.remove(BubbleId(9)).is_none());
        assert!(board.remove(BubbleId(1)).is_some());
        assert!(board.is_empty());
    }

    #[test]
    fn test_min_pair_distance() {
        let mut board = Board::new(3);
        assert_eq!(board.min_pair_distance(), None);
        board.bubbles.push(bubble(1, "A", 10.0));
        board.bubbles.push(bubble(2, "A", 30.0));
        board.bubbles.push(bubble(3, "A", 45.0));
        assert!((board.min_pair_distance().unwrap() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = GameState::new(1, Mode::Letters, Rules::default());
        let a = state.next_bubble_id();
        let b = state.next_bubble_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wheel_period_scales_with_speed() {
        let mut wheel = Wheel::default();
        assert!((wheel.period_secs() - 25.0).abs() < 1e-4);
        wheel.speed = 2.0;
        assert!((wheel.period_secs() - 12.5).abs() < 1e-4);
    }
}
