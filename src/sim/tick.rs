//! Fixed-order simulation tick
//!
//! Core game loop that advances the simulation by one frame. The order of the
//! phases below is observable (a ball lost in the edge pass never reaches the
//! brick pass, a brick cleared this tick triggers the level change this tick).

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, circle_intersects_rect};
use super::grid;
use super::powerups;
use super::state::{Ball, Direction, GameEvent, PowerUpKind, SimulationState, SoundKind};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction (keyboard)
    pub direction: Direction,
    /// Absolute paddle center (mouse); wins over `direction` when set
    pub target_x: Option<f32>,
}

/// Advance the game state by one frame at wall time `now` (ms)
pub fn tick(state: &mut SimulationState, input: &TickInput, now: u64) {
    // Pause, game over and win all freeze the world
    if !state.session.is_running() {
        return;
    }

    let score_before = state.session.score;

    move_paddle(state, input);
    powerups::check_expiry(state, now);
    // A ball served after a lost life waits on the paddle
    if !resolve_edges(state, now) {
        integrate_balls(state);
        collide_bricks(state);
    }
    check_level_clear(state);
    advance_falling_powerups(state, now);
    state.entities.particles.retain_mut(|p| p.update());

    if state.session.score != score_before {
        let score = state.session.score;
        state.emit(GameEvent::ScoreChanged(score));
    }
}

fn move_paddle(state: &mut SimulationState, input: &TickInput) {
    let field_width = state.field.width;
    let speed = state.paddle.speed;

    if let Some(target) = input.target_x {
        state.paddle.move_to(target, field_width);
        return;
    }

    match input.direction {
        Direction::Left => state.paddle.move_by(-speed, field_width),
        Direction::Right => state.paddle.move_by(speed, field_width),
        Direction::None => {}
    }
}

/// Walls, paddle and the bottom edge. Returns true if a life was lost.
fn resolve_edges(state: &mut SimulationState, now: u64) -> bool {
    let field = state.field;
    let paddle = state.paddle.rect();
    let zone_top = field.height - paddle.height - PADDLE_ZONE_MARGIN;

    let mut sounds = Vec::new();
    let mut lost = Vec::new();

    for ball in &mut state.entities.balls {
        let next = ball.pos + ball.vel;
        let r = ball.radius;

        if next.x > field.width - r || next.x < r {
            ball.vel.x = -ball.vel.x;
            ball.pos.x = ball.pos.x.clamp(r, (field.width - r).max(r));
            sounds.push(SoundKind::WallHit);
        }

        if next.y < r {
            ball.vel.y = -ball.vel.y;
            sounds.push(SoundKind::WallHit);
        } else if ball.pos.y + r > zone_top {
            let over_paddle = ball.pos.x + r > paddle.x
                && ball.pos.x - r < paddle.right()
                && ball.pos.y + r > paddle.y;

            if over_paddle {
                bounce_off_paddle(ball, &paddle);
                sounds.push(SoundKind::PaddleHit);
            } else if ball.pos.y + r > field.height {
                lost.push(ball.id);
            }
        }
    }

    for kind in sounds {
        state.sound(kind);
    }

    if lost.is_empty() {
        return false;
    }
    for id in lost {
        state.entities.remove_ball(id);
        state.emit(GameEvent::BallLost { id });
    }
    if !state.entities.balls.is_empty() {
        return false;
    }
    lose_life(state, now);
    true
}

/// Re-aim from where the ball struck: center goes straight up, the edges
/// leave at 60 degrees. Speed is kept.
fn bounce_off_paddle(ball: &mut Ball, paddle: &Rect) {
    let half_width = paddle.width / 2.0;
    let offset = ((ball.pos.x - (paddle.x + half_width)) / half_width).clamp(-1.0, 1.0);
    let angle = offset * MAX_BOUNCE_ANGLE;
    let speed = ball.speed();

    ball.vel = Vec2::new(speed * angle.sin(), -speed * angle.cos());
    ball.pos.y = paddle.y - ball.radius - PADDLE_LIFT;
}

fn lose_life(state: &mut SimulationState, now: u64) {
    state.session.lives = state.session.lives.saturating_sub(1);
    let lives = state.session.lives;
    state.sound(SoundKind::LifeLost);
    state.emit(GameEvent::LivesChanged(lives));

    if lives > 0 {
        log::info!("Life lost, {} left", lives);
        state.message("Wallet Balance Reduced! Try Again!", true);
        state.reset_paddle();
        state.spawn_serve_ball();
        powerups::report_timers(state, now);
    } else {
        log::info!(
            "Game over at depth {} with score {}",
            state.session.depth,
            state.session.score
        );
        state.session.over = true;
        state.sound(SoundKind::GameOver);
        state.message("Wallet Drained! Game Over!", false);
    }
}

fn integrate_balls(state: &mut SimulationState) {
    let capacity = state.tuning.ball.trail_length;
    for ball in &mut state.entities.balls {
        ball.pos += ball.vel;
        ball.record_trail(capacity);
    }
}

/// A brick destroyed during the collision pass
struct Wreck {
    column: usize,
    row: usize,
    center: Vec2,
    symbol: &'static str,
    color: &'static str,
}

/// Every ball against every active brick. A ball keeps testing after a hit,
/// so it can damage several overlapping bricks in one tick.
fn collide_bricks(state: &mut SimulationState) {
    let mut hits = 0usize;
    let mut wrecks = Vec::new();

    for ball in state.entities.balls.iter_mut() {
        for brick in state.entities.bricks.bricks_mut() {
            if !brick.is_active() || !circle_intersects_rect(&ball.circle(), &brick.rect) {
                continue;
            }

            hits += 1;
            let asset = brick.asset();
            let destroyed = if ball.contract {
                state.session.score += asset.value;
                brick.destroy()
            } else {
                ball.vel.y = -ball.vel.y;
                state.session.score += asset.value / 5;
                brick.health = brick.health.saturating_sub(1);
                brick.health == 0 && brick.destroy()
            };

            if destroyed {
                if !ball.contract {
                    state.session.score += asset.value / 2;
                }
                wrecks.push(Wreck {
                    column: brick.column,
                    row: brick.row,
                    center: brick.rect.center(),
                    symbol: asset.symbol,
                    color: asset.color,
                });
            }
        }
    }

    for _ in 0..hits {
        state.sound(SoundKind::BrickHit);
    }
    for wreck in wrecks {
        shatter(state, wreck);
    }
}

/// Particles and the power-up drop roll for a destroyed brick
fn shatter(state: &mut SimulationState, wreck: Wreck) {
    state.emit(GameEvent::BrickDestroyed {
        column: wreck.column,
        row: wreck.row,
        symbol: wreck.symbol,
    });

    let count = state.tuning.particles_per_brick;
    let life = state.tuning.particle_life_ticks;
    state
        .entities
        .spawn_particles(&mut state.rng, wreck.center, wreck.color, count, life);

    let drops = &state.tuning.powerups;
    if state.rng.random_bool(drops.drop_chance) {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        let (size, speed) = (drops.size, drops.fall_speed);
        state.entities.spawn_powerup(kind, wreck.center, size, speed);
    }
}

fn check_level_clear(state: &mut SimulationState) {
    if state.session.over || state.session.won || state.active_bricks() > 0 {
        return;
    }

    let cleared = state.session.depth;
    state.sound(SoundKind::LevelUp);
    state.emit(GameEvent::LevelCleared { depth: cleared });

    if state.tuning.final_depth.is_some_and(|last| cleared >= last) {
        log::info!("Final depth {} cleared, score {}", cleared, state.session.score);
        state.session.won = true;
        state.message("Portfolio Maxed Out! You Win!", false);
        return;
    }

    let depth = cleared + 1;
    state.session.depth = depth;
    state.emit(GameEvent::DepthChanged(depth));
    log::info!("Depth {} reached", depth);

    // Power-ups and paddle geometry carry over
    state.entities.bricks =
        grid::generate(depth, &state.tuning.grid, state.field.width, &mut state.rng);
    state.spawn_serve_ball();
    state.message(format!("Blockchain Depth {} Reached!", depth), true);
}

fn advance_falling_powerups(state: &mut SimulationState, now: u64) {
    let paddle = state.paddle.rect();
    let bottom = state.field.height;
    let mut collected = Vec::new();

    state.entities.falling.retain_mut(|capsule| {
        capsule.rect.y += capsule.speed;
        if capsule.rect.overlaps(&paddle) {
            collected.push(capsule.kind);
            false
        } else {
            capsule.rect.y <= bottom
        }
    });

    for kind in collected {
        state.sound(SoundKind::PowerUpCollected);
        state.emit(GameEvent::PowerUpCollected(kind));
        powerups::activate(state, kind, now);
    }
}
