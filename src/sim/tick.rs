//! Target rotation state machine
//!
//! Consumes taps, player commands and timer continuations, and moves the
//! game between `Idle`, `Selecting`, `Active` and `Draining`.

use rand::seq::IndexedRandom;

use super::layout::place_board;
use super::mode::Mode;
use super::schedule::Continuation;
use super::state::{Board, BubbleId, GameEvent, GamePhase, GameState};

/// Player commands from the control bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Throw the board away and deal a new one
    Reset,
    /// Change mode and deal a new board
    SwitchMode(Mode),
    /// Cycle to the next mode and deal a new board
    NextMode,
    /// Decorative wheel speed multiplier
    SetSpeed(f32),
    /// Pause or resume the decorative wheel
    ToggleWheel,
    /// Tear down the board and target
    Quit,
}

/// How a tap was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Bubble matched the target and is popping
    Correct,
    /// Bubble did not match; it shows the incorrect marker
    Incorrect,
    /// Tap was not processed (locked phase, unknown or popped bubble)
    Ignored,
}

/// Input collected over one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands, applied first in order
    pub commands: Vec<Command>,
    /// Tapped bubbles, applied after commands in order
    pub taps: Vec<BubbleId>,
    /// Demo mode - tap a matching bubble automatically
    pub autoplay: bool,
}

/// Apply one frame of input, then let `dt_ms` of game time pass
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    for &command in &input.commands {
        apply_command(state, command);
    }

    for &id in &input.taps {
        tap(state, id);
    }

    if input.autoplay {
        if let Some(id) = auto_tap(state) {
            tap(state, id);
        }
    }

    advance(state, dt_ms);
}

/// Let `dt_ms` of game time pass, firing every continuation that falls due.
///
/// Continuations scheduled while firing are timed from the firing task's due
/// time, so results do not depend on how time is sliced.
pub fn advance(state: &mut GameState, dt_ms: u64) {
    let until = state.clock_ms.saturating_add(dt_ms);
    while let Some(task) = state.scheduler.pop_due(until) {
        state.clock_ms = state.clock_ms.max(task.due_ms);
        run_continuation(state, task.action);
    }
    state.clock_ms = until;
}

fn schedule_after(state: &mut GameState, delay_ms: u64, action: Continuation) {
    let due = state.clock_ms.saturating_add(delay_ms);
    state.scheduler.schedule(due, action);
}

/// Deal a fresh board and choose its first target
pub fn start_level(state: &mut GameState) {
    state.target = None;
    state.phase = GamePhase::Idle;
    state.board = place_board(
        state.mode,
        &state.rules.layout,
        &mut state.ids,
        &mut state.rng,
    );

    log::info!(
        "New {} board: {}/{} bubbles",
        state.mode,
        state.board.len(),
        state.board.requested
    );
    state.events.push(GameEvent::BoardGenerated {
        placed: state.board.len(),
        requested: state.board.requested,
    });

    select_target(state);
}

/// Choose the next target uniformly over the distinct symbols still on the
/// board, or schedule a new board if nothing is left
pub fn select_target(state: &mut GameState) {
    state.phase = GamePhase::Selecting;

    let live = state.board.live_symbols();
    match live.choose(&mut state.rng).copied() {
        Some(symbol) => {
            log::info!("Target: {} ({} symbols on board)", symbol, live.len());
            state.target = Some(symbol);
            state.phase = GamePhase::Active;
            state.events.push(GameEvent::TargetSelected {
                mode: state.mode,
                symbol,
            });
        }
        None => {
            log::info!("Board cleared, dealing a new one");
            state.target = None;
            state.phase = GamePhase::Idle;
            state.events.push(GameEvent::BoardExhausted);
            let delay = state.rules.timings.regenerate_ms;
            schedule_after(state, delay, Continuation::RegenerateBoard);
        }
    }
}

/// Handle a tap on bubble `id`
pub fn tap(state: &mut GameState, id: BubbleId) -> TapOutcome {
    if state.phase != GamePhase::Active {
        log::debug!("Tap on {:?} ignored in {:?}", id, state.phase);
        return TapOutcome::Ignored;
    }
    let Some(target) = state.target else {
        return TapOutcome::Ignored;
    };
    let Some(bubble) = state.board.get_mut(id) else {
        log::debug!("Tap on missing bubble {:?}", id);
        return TapOutcome::Ignored;
    };
    if bubble.popped {
        return TapOutcome::Ignored;
    }

    let symbol = bubble.symbol;
    if symbol == target {
        bubble.popped = true;
        bubble.wrong = false;
        state.events.push(GameEvent::BubblePopped { id, symbol });
        let delay = state.rules.timings.pop_ms;
        schedule_after(state, delay, Continuation::RemoveBubble(id));
        TapOutcome::Correct
    } else {
        bubble.wrong = true;
        state.events.push(GameEvent::WrongTap { id, symbol });
        let delay = state.rules.timings.wrong_marker_ms;
        schedule_after(state, delay, Continuation::ClearWrongMarker(id));
        TapOutcome::Incorrect
    }
}

/// Run a timer continuation that has fallen due
pub fn run_continuation(state: &mut GameState, action: Continuation) {
    match action {
        Continuation::RemoveBubble(id) => {
            if state.board.remove(id).is_none() {
                return;
            }
            state.events.push(GameEvent::BubbleRemoved { id });

            if state.phase != GamePhase::Active {
                return;
            }
            if let Some(target) = state.target {
                if !state.board.has_symbol(target) {
                    state.phase = GamePhase::Draining;
                    state.events.push(GameEvent::TargetCleared { symbol: target });
                    let delay = state.rules.timings.next_target_ms;
                    schedule_after(state, delay, Continuation::SelectTarget);
                }
            }
        }
        Continuation::ClearWrongMarker(id) => {
            if let Some(bubble) = state.board.get_mut(id) {
                if bubble.wrong {
                    bubble.wrong = false;
                    state.events.push(GameEvent::WrongCleared { id });
                }
            }
        }
        Continuation::SelectTarget => {
            if state.phase == GamePhase::Draining {
                select_target(state);
            }
        }
        Continuation::RegenerateBoard => {
            if state.phase == GamePhase::Idle && state.board.is_empty() {
                start_level(state);
            }
        }
    }
}

/// Apply a player command
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::Reset => {
            state.scheduler.cancel_all();
            start_level(state);
        }
        Command::SwitchMode(mode) => {
            log::info!("Mode: {} -> {}", state.mode, mode);
            state.mode = mode;
            state.scheduler.cancel_all();
            start_level(state);
        }
        Command::NextMode => {
            let next = state.mode.next();
            apply_command(state, Command::SwitchMode(next));
        }
        Command::SetSpeed(speed) => {
            if speed.is_finite() && speed > 0.0 {
                state.wheel.speed = speed;
            } else {
                log::warn!("Ignoring wheel speed {}", speed);
            }
        }
        Command::ToggleWheel => {
            state.wheel.paused = !state.wheel.paused;
        }
        Command::Quit => {
            state.scheduler.cancel_all();
            state.board = Board::default();
            state.target = None;
            state.phase = GamePhase::Idle;
            state.events.push(GameEvent::Stopped);
            log::info!("Game stopped");
        }
    }
}

/// Demo player: the lowest-id bubble that matches the target
pub fn auto_tap(state: &GameState) -> Option<BubbleId> {
    if !state.accepting_taps() {
        return None;
    }
    let target = state.target?;
    state
        .board
        .bubbles
        .iter()
        .find(|b| !b.popped && b.symbol == target)
        .map(|b| b.id)
}
