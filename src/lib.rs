//! Crypto Breakout - simulation core for a Breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, game state)
//! - `session`: Session controller driving one tick per frame
//! - `platform`: Clock sources and the browser host bindings
//! - `snapshot`: Render-ready view of a frame
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod session;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use platform::{Clock, ManualClock, SystemClock};
pub use session::GameSession;
pub use snapshot::FrameSnapshot;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed rules that are not worth tuning
pub mod consts {
    use std::f32::consts::PI;

    /// Steepest paddle deflection from vertical (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = PI / 3.0;
    /// The paddle check starts this far above the paddle's bottom edge
    pub const PADDLE_ZONE_MARGIN: f32 = 15.0;
    /// Gap left between a bounced ball and the paddle surface
    pub const PADDLE_LIFT: f32 = 1.0;

    /// Serve launch angle from vertical (45 degrees)
    pub const SERVE_ANGLE: f32 = PI / 4.0;
    /// Gap between a freshly served ball and the paddle
    pub const BALL_SPAWN_GAP: f32 = 2.0;

    /// Balls added per fork pickup
    pub const FORK_MAX_NEW_BALLS: usize = 2;
    /// Angular step between forked balls (15 degrees)
    pub const FORK_ANGLE_STEP: f32 = PI / 12.0;
    /// Launch angle above horizontal for a fork with nothing to split
    pub const FORK_FALLBACK_ANGLE: f32 = PI / 3.0;

    /// Particle velocity range per axis, pixels per tick
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
}

/// Velocity with the given heading (radians) and speed
#[inline]
pub fn from_heading(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}
