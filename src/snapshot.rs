//! Render-ready view of the simulation
//!
//! A renderer only needs positions and paint. Everything here is computed
//! from the state: catalog colours for bricks, contract colouring for balls,
//! fade for particles. Nothing in the simulation reads it back.

use glam::Vec2;
use serde::Serialize;

use crate::sim::geometry::Rect;
use crate::sim::state::{
    Ball, Brick, FallingPowerUp, FieldSize, Particle, PowerUpKind, SessionState, SimulationState,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: &'static str,
    pub glow: &'static str,
    /// Oldest first
    pub trail: Vec<Vec2>,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            pos: ball.pos,
            radius: ball.radius,
            color: ball.color(),
            glow: ball.glow(),
            trail: ball.trail.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrickView {
    pub column: usize,
    pub row: usize,
    pub rect: Rect,
    pub symbol: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub glow: &'static str,
    pub text_color: &'static str,
    pub health: u32,
    pub health_ratio: f32,
}

impl From<&Brick> for BrickView {
    fn from(brick: &Brick) -> Self {
        let asset = brick.asset();
        Self {
            column: brick.column,
            row: brick.row,
            rect: brick.rect,
            symbol: asset.symbol,
            name: asset.name,
            color: asset.color,
            glow: asset.glow,
            text_color: asset.text_color,
            health: brick.health,
            health_ratio: brick.health_ratio(),
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapsuleView {
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<&FallingPowerUp> for CapsuleView {
    fn from(capsule: &FallingPowerUp) -> Self {
        Self {
            kind: capsule.kind,
            rect: capsule.rect,
            label: capsule.kind.label(),
            color: capsule.kind.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: &'static str,
    pub opacity: f32,
}

impl From<&Particle> for ParticleView {
    fn from(particle: &Particle) -> Self {
        Self {
            pos: particle.pos,
            size: particle.size,
            color: particle.color,
            opacity: particle.opacity(),
        }
    }
}

/// HUD line for an active timed power-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub kind: PowerUpKind,
    pub label: &'static str,
    pub color: &'static str,
    pub seconds: u64,
}

/// Everything a frame draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub field: FieldSize,
    pub paddle: Rect,
    pub balls: Vec<BallView>,
    /// Active bricks only
    pub bricks: Vec<BrickView>,
    pub capsules: Vec<CapsuleView>,
    pub particles: Vec<ParticleView>,
    pub timers: Vec<TimerView>,
    pub session: SessionState,
}

impl FrameSnapshot {
    pub fn capture(state: &SimulationState, now: u64) -> Self {
        let entities = &state.entities;
        Self {
            field: state.field,
            paddle: state.paddle.rect(),
            balls: entities.balls.iter().map(BallView::from).collect(),
            bricks: entities
                .bricks
                .iter()
                .filter(|b| b.is_active())
                .map(BrickView::from)
                .collect(),
            capsules: entities.falling.iter().map(CapsuleView::from).collect(),
            particles: entities.particles.iter().map(ParticleView::from).collect(),
            timers: state
                .powerups
                .timers(now)
                .into_iter()
                .map(|(kind, seconds)| TimerView {
                    kind,
                    label: kind.label(),
                    color: kind.color(),
                    seconds,
                })
                .collect(),
            session: state.session.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerups;
    use crate::tuning::Tuning;

    fn state() -> SimulationState {
        SimulationState::new(9, Tuning::default())
    }

    #[test]
    fn test_bricks_carry_catalog_paint() {
        let mut state = state();
        let brick = state.entities.bricks.get_mut(0, 0).unwrap();
        brick.health = 1;
        state.entities.bricks.bricks_mut()[1].destroy();

        let frame = FrameSnapshot::capture(&state, 0);
        assert_eq!(frame.bricks.len(), 39);
        let eth = &frame.bricks[0];
        assert_eq!((eth.symbol, eth.name), ("ETH", "Ethereum"));
        assert_eq!(eth.color, "#627EEA");
        assert_eq!(eth.glow, "#8C9EFF");
        assert_eq!(eth.text_color, "#FFFFFF");
        assert_eq!(eth.health_ratio, 0.5);
    }

    #[test]
    fn test_contract_ball_changes_color() {
        let mut state = state();
        let plain = FrameSnapshot::capture(&state, 0).balls[0].color;
        powerups::activate(&mut state, PowerUpKind::Contract, 0);
        let frame = FrameSnapshot::capture(&state, 0);
        assert_ne!(frame.balls[0].color, plain);
        assert_eq!(frame.balls[0].color, "#ff6600");
        assert_eq!(
            frame.timers,
            vec![TimerView {
                kind: PowerUpKind::Contract,
                label: "Smart Contract",
                color: "#ff0000",
                seconds: 5,
            }]
        );
    }

    #[test]
    fn test_trail_and_particles_reach_the_frame() {
        let mut state = state();
        let ball = &mut state.entities.balls[0];
        for _ in 0..3 {
            ball.pos += ball.vel;
            ball.record_trail(15);
        }
        let mut rng = rand_pcg::Pcg32::new(3, 3);
        state
            .entities
            .spawn_particles(&mut rng, Vec2::new(50.0, 50.0), "#F7931A", 2, 4);
        state.entities.particles[0].update();
        state
            .entities
            .spawn_powerup(PowerUpKind::Fork, Vec2::new(100.0, 100.0), 20.0, 2.0);

        let frame = FrameSnapshot::capture(&state, 0);
        assert_eq!(frame.balls[0].trail.len(), 3);
        assert_eq!(frame.particles[0].opacity, 0.75);
        assert_eq!(frame.particles[1].opacity, 1.0);
        assert_eq!(frame.capsules[0].label, "Fork");

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["balls"][0]["trail"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["bricks"][0]["symbol"], "ETH");
    }
}
