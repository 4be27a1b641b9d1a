//! Power-up activation and expiry
//!
//! Timed effects keep one expiry per kind in [`ActivePowerUps`]. Fork is
//! instantaneous and never gets an entry. The contract entry only tracks the
//! most recent activation; each ball also carries its own contract timer.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, PowerUpKind, SimulationState};
use crate::consts::*;
use crate::from_heading;

/// Active timed power-ups, keyed by kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivePowerUps {
    expiries: BTreeMap<PowerUpKind, u64>,
    /// Last timer list handed to the HUD
    reported: Vec<(PowerUpKind, u64)>,
}

impl ActivePowerUps {
    pub fn expiry(&self, kind: PowerUpKind) -> Option<u64> {
        self.expiries.get(&kind).copied()
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.expiries.contains_key(&kind)
    }

    pub fn clear(&mut self, kind: PowerUpKind) {
        self.expiries.remove(&kind);
    }

    pub fn clear_all(&mut self) {
        self.expiries.clear();
    }

    /// Seconds left per active kind, rounded up; lapsed entries are skipped
    pub fn timers(&self, now: u64) -> Vec<(PowerUpKind, u64)> {
        self.expiries
            .iter()
            .filter(|&(_, &expiry)| expiry > now)
            .map(|(&kind, &expiry)| (kind, (expiry - now).div_ceil(1000)))
            .collect()
    }
}

/// Apply a collected power-up
pub fn activate(state: &mut SimulationState, kind: PowerUpKind, now: u64) {
    log::debug!("Activating {:?} at {}ms", kind, now);

    match kind {
        PowerUpKind::Widen => {
            let expiry = now + state.tuning.powerups.widen_duration_ms;
            state.paddle.width = state.paddle.base_width * state.tuning.powerups.widen_factor;
            state.paddle.widen_expiry = Some(expiry);
            state.paddle.clamp_to(state.field.width);
            state.powerups.expiries.insert(PowerUpKind::Widen, expiry);
        }
        PowerUpKind::Fork => fork(state),
        PowerUpKind::Contract => {
            let expiry = now + state.tuning.powerups.contract_duration_ms;
            for ball in &mut state.entities.balls {
                ball.contract = true;
                ball.contract_expiry = expiry;
            }
            if !state.entities.balls.is_empty() {
                state.powerups.expiries.insert(PowerUpKind::Contract, expiry);
            }
        }
    }

    report_timers(state, now);
}

/// Split extra balls off the first ball still in the field
fn fork(state: &mut SimulationState) {
    let max_balls = state.tuning.ball.max_balls;
    let to_add = FORK_MAX_NEW_BALLS.min(max_balls.saturating_sub(state.entities.balls.len()));
    let field_height = state.field.height;

    for i in 0..to_add {
        let source = state
            .entities
            .balls
            .iter()
            .find(|b| b.pos.y < field_height)
            .cloned();

        match source {
            Some(source) => {
                let side = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let offset = FORK_ANGLE_STEP * (i + 1) as f32 * side;
                let vel = from_heading(source.heading() + offset, source.speed());

                let id = state.entities.spawn_ball(source.pos, vel, source.radius);
                if let Some(ball) = state.entities.balls.iter_mut().find(|b| b.id == id) {
                    ball.contract = source.contract;
                    ball.contract_expiry = source.contract_expiry;
                }
            }
            None => {
                let radius = state.tuning.ball.radius;
                let speed = state.tuning.ball.speed;
                let pos = Vec2::new(
                    state.paddle.center_x(),
                    state.paddle.y - radius - BALL_SPAWN_GAP,
                );
                let vel = Vec2::new(
                    speed * FORK_FALLBACK_ANGLE.cos(),
                    -speed * FORK_FALLBACK_ANGLE.sin(),
                );
                state.entities.spawn_ball(pos, vel, radius);
            }
        }
    }
}

/// Revert a timed power-up
pub fn deactivate(state: &mut SimulationState, kind: PowerUpKind, now: u64) {
    match kind {
        PowerUpKind::Widen => {
            state.powerups.clear(PowerUpKind::Widen);
            state.paddle.width = state.paddle.base_width;
            state.paddle.widen_expiry = None;
            state.paddle.clamp_to(state.field.width);
            log::debug!("Widen expired at {}ms", now);
        }
        PowerUpKind::Fork => {}
        PowerUpKind::Contract => {
            // A ball still inside its own window keeps the effect alive
            if state.entities.balls.iter().any(|b| b.contract_live(now)) {
                return;
            }
            state.powerups.clear(PowerUpKind::Contract);
            for ball in &mut state.entities.balls {
                ball.clear_contract();
            }
            log::debug!("Contract expired at {}ms", now);
        }
    }

    report_timers(state, now);
}

/// Per-tick expiry pass
pub fn check_expiry(state: &mut SimulationState, now: u64) {
    if state
        .powerups
        .expiry(PowerUpKind::Widen)
        .is_some_and(|expiry| now > expiry)
    {
        deactivate(state, PowerUpKind::Widen, now);
    }

    for ball in &mut state.entities.balls {
        if ball.contract && now > ball.contract_expiry {
            ball.clear_contract();
        }
    }

    if let Some(expiry) = state.powerups.expiry(PowerUpKind::Contract) {
        let none_flagged = !state.entities.balls.iter().any(|b| b.contract);
        if none_flagged || now > expiry {
            deactivate(state, PowerUpKind::Contract, now);
        }
    }

    report_timers(state, now);
}

/// Emit the HUD timer list if it changed since the last report
pub fn report_timers(state: &mut SimulationState, now: u64) {
    let timers = state.powerups.timers(now);
    if timers != state.powerups.reported {
        state.powerups.reported = timers.clone();
        state.emit(GameEvent::PowerUpTimersChanged(timers));
    }
}
