//! Bubble Pop entry point
//!
//! The web build is driven from JavaScript through `bubble_pop::web`. The
//! native build runs a headless demo: an autoplayer clears a few boards while
//! the narrator writes to the log.
//!
//! Usage: `bubble-pop [seed] [letters|digits|colors]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bubble_pop::sim::{GameEvent, GameState, Mode, TickInput, tick};
    use bubble_pop::{LogNarrator, Settings, narrate};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bubble Pop (native demo) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);

    let mut settings = Settings::load();
    if let Some(mode) = args.next().as_deref().and_then(Mode::from_str) {
        settings.mode = mode;
    }
    if let Err(e) = settings.validate() {
        log::error!("Invalid settings: {}", e);
        std::process::exit(1);
    }

    // 60 Hz frames, arena 600px wide
    const FRAME_MS: u64 = 16;
    const BOARDS_TO_CLEAR: usize = 3;
    const MAX_FRAMES: usize = 60 * 60 * 5;

    let mut state = GameState::start(seed, settings.mode, settings.rules(300.0));
    let mut narrator = LogNarrator;
    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let mut boards = 0;
    let mut pops = 0;
    for _ in 0..MAX_FRAMES {
        let events = state.drain_events();
        for event in &events {
            match event {
                GameEvent::BoardGenerated { .. } => boards += 1,
                GameEvent::BubblePopped { .. } => pops += 1,
                _ => {}
            }
        }
        narrate(&events, &mut narrator);

        if boards > BOARDS_TO_CLEAR {
            break;
        }
        tick(&mut state, &input, FRAME_MS);
    }

    println!(
        "seed {}: {} boards dealt, {} bubbles popped in {:.1}s of game time",
        seed,
        boards,
        pops,
        state.clock_ms as f64 / 1000.0
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bubble_pop::web::wasm_start, this is just to satisfy the compiler
}
