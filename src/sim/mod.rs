//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as an explicit millisecond timestamp
//! - Seeded RNG only
//! - Stable iteration order (insertion order, bricks column-major)
//! - No rendering, audio or platform dependencies

pub mod assets;
pub mod geometry;
pub mod grid;
pub mod powerups;
pub mod state;
pub mod tick;

pub use assets::{Asset, CATALOG};
pub use geometry::{Circle, Rect, circle_intersects_rect};
pub use grid::{BrickGrid, generate};
pub use powerups::ActivePowerUps;
pub use state::{
    Ball, Brick, BrickStatus, Direction, EntityRegistry, FallingPowerUp, FieldSize, GameEvent,
    Paddle, Particle, PowerUpKind, SessionState, SimulationState, SoundKind,
};
pub use tick::{TickInput, tick};
