//! Crypto Breakout headless runner
//!
//! Plays a session with a paddle that tracks the lowest ball and logs every
//! event. Usage: `crypto-breakout [tuning.json] [seed] [ticks]`.
//! The browser build drives `WasmSession` from JavaScript instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use crypto_breakout::sim::GameEvent;
    use crypto_breakout::{Clock, GameSession, ManualClock, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match args.first() {
        Some(path) if path != "-" => Tuning::load_or_default(std::path::Path::new(path)),
        _ => Tuning::default(),
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
    let ticks: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20_000);

    let clock = ManualClock::new(0);
    let mut game = GameSession::with_clock(seed, tuning, clock.clone());

    for _ in 0..ticks {
        // Follow the ball closest to the bottom
        let target = game
            .state()
            .entities
            .balls
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|ball| ball.pos.x);
        if let Some(x) = target {
            game.set_paddle_target_x(x);
        }

        clock.advance(16);
        game.tick();

        for event in game.drain_events() {
            match event {
                GameEvent::Sound(_) | GameEvent::PowerUpTimersChanged(_) => {
                    log::trace!("{:?}", event)
                }
                GameEvent::Message { ref text, .. } => log::info!("Message: {}", text),
                _ => log::debug!("{:?}", event),
            }
        }

        if game.is_over() || game.is_won() {
            break;
        }
        if game.is_paused() {
            game.acknowledge();
        }
    }

    let session = &game.state().session;
    println!(
        "Finished at {} ms: depth {}, score {}, lives {}",
        clock.now_ms(),
        session.depth,
        session.score,
        session.lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}
