//! Game state and core simulation types
//!
//! Everything a tick reads or writes hangs off [`SimulationState`]. The
//! session controller owns exactly one of these; nothing else keeps
//! references into it between ticks.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::assets::{self, Asset};
use super::geometry::{Circle, Rect};
use super::grid::{self, BrickGrid};
use super::powerups::ActivePowerUps;
use crate::consts::*;
use crate::tuning::{FieldTuning, Tuning};

/// Sound cues for the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundKind {
    PaddleHit,
    BrickHit,
    WallHit,
    PowerUpCollected,
    LifeLost,
    GameOver,
    LevelUp,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// "HODL": wider paddle for a while
    Widen,
    /// Splits the ball in play
    Fork,
    /// "Smart contract": balls destroy bricks on contact
    Contract,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Widen, PowerUpKind::Fork, PowerUpKind::Contract];

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Widen => "HODL",
            PowerUpKind::Fork => "Fork",
            PowerUpKind::Contract => "Smart Contract",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Widen => "#00ff00",
            PowerUpKind::Fork => "#ffff00",
            PowerUpKind::Contract => "#ff0000",
        }
    }
}

/// Held paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

/// Everything the simulation reports outward
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Sound(SoundKind),
    ScoreChanged(u64),
    LivesChanged(u32),
    DepthChanged(u32),
    Message { text: String, pauses_game: bool },
    PowerUpTimersChanged(Vec<(PowerUpKind, u64)>),
    BrickDestroyed { column: usize, row: usize, symbol: &'static str },
    BallLost { id: u32 },
    LevelCleared { depth: u32 },
    PowerUpCollected(PowerUpKind),
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick; encodes heading and speed
    pub vel: Vec2,
    pub radius: f32,
    /// Speed the ball was spawned with
    pub base_speed: f32,
    /// Contract mode: destroys bricks on contact without bouncing
    pub contract: bool,
    /// Timestamp (ms) the contract mode lapses
    pub contract_expiry: u64,
    /// Recent positions, oldest first (rendering only)
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            base_speed: vel.length(),
            contract: false,
            contract_expiry: 0,
            trail: VecDeque::new(),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Heading in radians (screen coordinates)
    #[inline]
    pub fn heading(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Flagged and not yet past its own expiry
    pub fn contract_live(&self, now: u64) -> bool {
        self.contract && now <= self.contract_expiry
    }

    pub fn clear_contract(&mut self) {
        self.contract = false;
        self.contract_expiry = 0;
    }

    /// Push the current position, dropping the oldest beyond `capacity`
    pub fn record_trail(&mut self, capacity: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > capacity {
            self.trail.pop_front();
        }
    }

    pub fn color(&self) -> &'static str {
        if self.contract { "#ff6600" } else { "#00ffcc" }
    }

    pub fn glow(&self) -> &'static str {
        if self.contract { "#ff3300" } else { "#00ffcc" }
    }
}

/// The player's paddle ("mining rig")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub base_width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Timestamp (ms) the widen effect lapses
    pub widen_expiry: Option<u64>,
}

impl Paddle {
    /// Default paddle, centered on the bottom row of the field
    pub fn new(tuning: &FieldTuning, field: FieldSize) -> Self {
        Self {
            x: (field.width - tuning.paddle_width) / 2.0,
            y: field.height - tuning.paddle_height - tuning.paddle_bottom_gap,
            width: tuning.paddle_width,
            base_width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            widen_expiry: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Keep the paddle inside `[0, field_width - width]`
    pub fn clamp_to(&mut self, field_width: f32) {
        self.x = self.x.clamp(0.0, (field_width - self.width).max(0.0));
    }

    pub fn move_by(&mut self, dx: f32, field_width: f32) {
        self.x += dx;
        self.clamp_to(field_width);
    }

    /// Center the paddle on `target_x`, clamped to the field
    pub fn move_to(&mut self, target_x: f32, field_width: f32) {
        self.x = target_x - self.width / 2.0;
        self.clamp_to(field_width);
    }
}

/// Brick status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A brick ("crypto block")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    pub rect: Rect,
    /// Index into [`assets::CATALOG`]
    pub asset_index: usize,
    pub health: u32,
    pub initial_health: u32,
    pub status: BrickStatus,
}

impl Brick {
    pub fn asset(&self) -> &'static Asset {
        assets::asset(self.asset_index)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    /// Remaining health as a fraction of the starting health
    pub fn health_ratio(&self) -> f32 {
        if self.initial_health == 0 {
            0.0
        } else {
            self.health as f32 / self.initial_health as f32
        }
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn destroy(&mut self) -> bool {
        if self.status == BrickStatus::Destroyed {
            return false;
        }
        self.status = BrickStatus::Destroyed;
        true
    }
}

/// A power-up capsule falling toward the paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingPowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    /// Pixels per tick, downward
    pub speed: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Ticks left to live
    pub life: u32,
    pub max_life: u32,
    pub color: &'static str,
}

impl Particle {
    /// Opacity fades linearly with remaining life
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }

    /// Integrate one tick. Returns false once expired.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

/// Play-field dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

/// Owns every entity collection, hands out stable ids
#[derive(Debug, Clone, Serialize)]
pub struct EntityRegistry {
    pub balls: Vec<Ball>,
    pub bricks: BrickGrid,
    pub falling: Vec<FallingPowerUp>,
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new(bricks: BrickGrid) -> Self {
        Self {
            balls: Vec::new(),
            bricks,
            falling: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a ball and return its id
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, pos, vel, radius));
        id
    }

    pub fn remove_ball(&mut self, id: u32) -> Option<Ball> {
        let idx = self.balls.iter().position(|b| b.id == id)?;
        Some(self.balls.remove(idx))
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Drop a capsule whose center sits at `center`
    pub fn spawn_powerup(&mut self, kind: PowerUpKind, center: Vec2, size: f32, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.falling.push(FallingPowerUp {
            id,
            kind,
            rect: Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size),
            speed,
        });
        id
    }

    /// Scatter `count` particles from `origin`
    pub fn spawn_particles(
        &mut self,
        rng: &mut impl Rng,
        origin: Vec2,
        color: &'static str,
        count: usize,
        life: u32,
    ) {
        for _ in 0..count {
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(
                    rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                    rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                ),
                size: rng.random_range(1.0..4.0),
                life,
                max_life: life,
                color,
            });
        }
    }

    /// Forget every falling capsule and particle
    pub fn clear_transient(&mut self) {
        self.falling.clear();
        self.particles.clear();
    }
}

/// Score, lives, depth and the run flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// "Portfolio value"
    pub score: u64,
    /// "Wallet balance"
    pub lives: u32,
    /// "Blockchain depth" (level), starts at 1
    pub depth: u32,
    pub paused: bool,
    pub over: bool,
    pub won: bool,
}

impl SessionState {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            depth: 1,
            paused: true,
            over: false,
            won: false,
        }
    }

    /// True when a tick is allowed to mutate anything
    #[inline]
    pub fn is_running(&self) -> bool {
        !(self.paused || self.over || self.won)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub tuning: Tuning,
    pub field: FieldSize,
    pub paddle: Paddle,
    pub entities: EntityRegistry,
    pub powerups: ActivePowerUps,
    pub session: SessionState,
    pub rng: Pcg32,
    /// Outgoing events since the last drain
    pub events: Vec<GameEvent>,
}

impl SimulationState {
    /// Fresh run: depth 1 grid, default paddle, one ball ready to go
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let field = FieldSize {
            width: tuning.field.width,
            height: tuning.field.height,
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = grid::generate(1, &tuning.grid, field.width, &mut rng);
        let paddle = Paddle::new(&tuning.field, field);

        let mut state = Self {
            session: SessionState::new(tuning.starting_lives),
            field,
            paddle,
            entities: EntityRegistry::new(bricks),
            powerups: ActivePowerUps::default(),
            rng,
            events: Vec::new(),
            tuning,
        };
        state.spawn_serve_ball();
        state
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, kind: SoundKind) {
        self.events.push(GameEvent::Sound(kind));
    }

    pub fn message(&mut self, text: impl Into<String>, pauses_game: bool) {
        self.session.paused = pauses_game;
        self.events.push(GameEvent::Message {
            text: text.into(),
            pauses_game,
        });
    }

    /// Replace every ball with one resting above the paddle center,
    /// launched up and randomly left or right at 45°
    pub fn spawn_serve_ball(&mut self) -> u32 {
        let radius = self.tuning.ball.radius;
        let speed = self.tuning.ball.speed;
        let side = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let pos = Vec2::new(self.paddle.center_x(), self.paddle.y - radius - BALL_SPAWN_GAP);
        let vel = Vec2::new(side * speed * SERVE_ANGLE.sin(), -speed * SERVE_ANGLE.cos());

        self.entities.balls.clear();
        self.entities.spawn_ball(pos, vel, radius)
    }

    /// Default width, centered, widen effect dropped
    pub fn reset_paddle(&mut self) {
        let field = self.field;
        self.paddle = Paddle::new(&self.tuning.field, field);
        self.powerups.clear(PowerUpKind::Widen);
    }

    /// Back to a fresh run at depth 1 on the current field. The RNG stream
    /// carries on, so a restart gets a new serve direction.
    pub fn reset(&mut self) {
        self.session = SessionState::new(self.tuning.starting_lives);
        self.powerups.clear_all();
        self.entities.clear_transient();
        self.reset_paddle();
        self.entities.bricks = grid::generate(1, &self.tuning.grid, self.field.width, &mut self.rng);
        self.spawn_serve_ball();
    }

    /// Total bricks still standing
    pub fn active_bricks(&self) -> usize {
        self.entities.bricks.active_count()
    }
}
