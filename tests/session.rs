//! Full-session scenarios driven through the public API

use crypto_breakout::sim::{BrickStatus, GameEvent, PowerUpKind, SoundKind, powerups};
use crypto_breakout::{Clock, GameSession, ManualClock, Tuning};
use glam::Vec2;

fn started(seed: u64) -> (GameSession<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    let mut game = GameSession::with_clock(seed, Tuning::default(), clock.clone());
    game.acknowledge();
    game.drain_events();
    (game, clock)
}

fn only_ball(game: &mut GameSession<ManualClock>, pos: Vec2, vel: Vec2) {
    let entities = &mut game.state_mut().entities;
    entities.balls.clear();
    entities.spawn_ball(pos, vel, 8.0);
}

/// Drop every ball below the paddle's reach and tick once
fn lose_ball(game: &mut GameSession<ManualClock>) {
    game.state_mut().paddle.x = 500.0;
    only_ball(game, Vec2::new(20.0, 460.0), Vec2::new(0.0, 4.0));
    game.tick();
}

#[test]
fn wall_hit_reflects_and_plays_once() {
    let (mut game, _) = started(1);
    only_ball(&mut game, Vec2::new(5.0, 200.0), Vec2::new(2.0, -2.0));
    game.tick();

    let ball = &game.state().entities.balls[0];
    assert_eq!(ball.vel, Vec2::new(-2.0, -2.0));
    let walls = game
        .drain_events()
        .into_iter()
        .filter(|e| *e == GameEvent::Sound(SoundKind::WallHit))
        .count();
    assert_eq!(walls, 1);
}

#[test]
fn contract_ball_takes_full_value() {
    let (mut game, _) = started(2);
    powerups::activate(game.state_mut(), PowerUpKind::Contract, 0);
    let brick = game.state_mut().entities.bricks.get_mut(0, 0).unwrap();
    brick.asset_index = 0;
    let center = brick.rect.center();
    let expiry = game.state().entities.balls[0].contract_expiry;

    only_ball(&mut game, center + Vec2::new(0.0, 4.0), Vec2::new(0.0, -4.0));
    let ball = &mut game.state_mut().entities.balls[0];
    ball.contract = true;
    ball.contract_expiry = expiry;
    game.tick();

    let state = game.state();
    assert_eq!(state.session.score, 100);
    assert_eq!(state.entities.bricks.get(0, 0).unwrap().status, BrickStatus::Destroyed);
    assert_eq!(state.entities.balls[0].vel, Vec2::new(0.0, -4.0));
}

#[test]
fn three_losses_end_the_game() {
    let (mut game, clock) = started(3);

    lose_ball(&mut game);
    assert_eq!(game.state().session.lives, 2);
    assert!(game.is_paused());
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::Message {
        text: "Wallet Balance Reduced! Try Again!".to_string(),
        pauses_game: true,
    }));

    game.acknowledge();
    lose_ball(&mut game);
    game.acknowledge();
    lose_ball(&mut game);

    let state = game.state();
    assert!(game.is_over());
    assert_eq!(state.session.lives, 0);
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::Sound(SoundKind::GameOver)));
    assert!(events.contains(&GameEvent::Message {
        text: "Wallet Drained! Game Over!".to_string(),
        pauses_game: false,
    }));

    let frozen = game.state().session.clone();
    game.acknowledge();
    for _ in 0..100 {
        clock.advance(16);
        game.tick();
    }
    assert_eq!(game.state().session, frozen);
    assert!(game.drain_events().is_empty());
}

#[test]
fn clearing_the_grid_moves_to_next_depth() {
    let (mut game, _) = started(4);
    powerups::activate(game.state_mut(), PowerUpKind::Widen, 0);
    let bricks = &mut game.state_mut().entities.bricks;
    for brick in bricks.iter_mut().skip(1) {
        brick.destroy();
    }
    let last = bricks.get_mut(0, 0).unwrap();
    last.health = 1;
    let center = last.rect.center();
    only_ball(&mut game, center + Vec2::new(0.0, 4.0), Vec2::new(0.0, -4.0));
    game.tick();

    let state = game.state();
    assert_eq!(state.session.depth, 2);
    assert_eq!(state.active_bricks(), 6 * 8);
    assert_eq!(state.entities.balls.len(), 1);
    // Power-ups carry over to the next depth
    assert_eq!(state.paddle.width, 135.0);
    assert!(game.is_paused());

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::LevelCleared { depth: 1 }));
    assert!(events.contains(&GameEvent::Message {
        text: "Blockchain Depth 2 Reached!".to_string(),
        pauses_game: true,
    }));
}

#[test]
fn widen_lasts_ten_seconds() {
    let (mut game, clock) = started(5);
    only_ball(&mut game, Vec2::new(300.0, 300.0), Vec2::new(0.0, 0.0));
    clock.set(1_000);
    powerups::activate(game.state_mut(), PowerUpKind::Widen, clock.now_ms());
    assert_eq!(game.state().paddle.width, 135.0);

    clock.set(11_000);
    game.tick();
    assert_eq!(game.state().paddle.width, 135.0);

    clock.set(11_001);
    game.tick();
    assert_eq!(game.state().paddle.width, 90.0);
    assert!(!game.state().powerups.is_active(PowerUpKind::Widen));
}

#[test]
fn fork_never_exceeds_five_balls() {
    let (mut game, _) = started(6);
    let mut counts = Vec::new();
    for _ in 0..4 {
        powerups::activate(game.state_mut(), PowerUpKind::Fork, 0);
        counts.push(game.state().entities.balls.len());
    }
    assert_eq!(counts, vec![3, 5, 5, 5]);
}

#[test]
fn same_seed_same_game() {
    let run = |seed: u64| {
        let (mut game, clock) = started(seed);
        let mut log = Vec::new();
        for step in 0..3_000 {
            if step % 7 == 0 {
                let x = game.state().entities.balls.first().map(|b| b.pos.x);
                if let Some(x) = x {
                    game.set_paddle_target_x(x);
                }
            }
            clock.advance(16);
            game.tick();
            log.extend(game.drain_events());
            if game.is_paused() {
                game.acknowledge();
            }
        }
        (game.state().session.clone(), log)
    };

    let (a, a_events) = run(77);
    let (b, b_events) = run(77);
    assert_eq!(a, b);
    assert_eq!(a_events, b_events);
}

#[test]
fn restart_returns_to_start_screen() {
    let (mut game, _) = started(8);
    lose_ball(&mut game);
    game.restart();

    assert!(game.is_paused());
    assert_eq!(game.state().session.lives, 3);
    assert_eq!(game.state().session.depth, 1);
    assert_eq!(game.state().active_bricks(), 40);
}
