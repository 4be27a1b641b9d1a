//! Game session controller
//!
//! Owns the [`SimulationState`] and the clock, buffers host input between
//! frames and runs one simulation tick per [`GameSession::tick`] call.

use crate::platform::{Clock, SystemClock};
use crate::sim::powerups;
use crate::sim::state::{Direction, FieldSize, GameEvent, Paddle, SimulationState};
use crate::sim::tick::{TickInput, tick};
use crate::snapshot::FrameSnapshot;
use crate::tuning::Tuning;

pub const START_MESSAGE: &str = "Press Enter or Click Continue to Start Blockchain Battle!";

/// One game from start screen to game over (and any restarts)
pub struct GameSession<C: Clock = SystemClock> {
    state: SimulationState,
    clock: C,
    input: TickInput,
    seed: u64,
}

impl GameSession<SystemClock> {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_clock(seed, tuning, SystemClock::new())
    }
}

impl<C: Clock> GameSession<C> {
    /// New session waiting behind the start message
    pub fn with_clock(seed: u64, tuning: Tuning, clock: C) -> Self {
        log::info!("Starting session with seed {}", seed);
        let mut state = SimulationState::new(seed, tuning);
        state.message(START_MESSAGE, true);

        Self {
            state,
            clock,
            input: TickInput::default(),
            seed,
        }
    }

    /// Held direction; stays in effect until changed
    pub fn set_paddle_direction(&mut self, direction: Direction) {
        self.input.direction = direction;
    }

    /// Absolute paddle center for the next tick only
    pub fn set_paddle_target_x(&mut self, x: f32) {
        self.input.target_x = Some(x);
    }

    /// Dismiss the current message. Over and won sessions stay frozen.
    pub fn acknowledge(&mut self) {
        let session = &mut self.state.session;
        if !session.over && !session.won {
            session.paused = false;
        }
    }

    /// Start over from depth 1 behind the start message
    pub fn restart(&mut self) {
        log::info!(
            "Restarting session (was depth {}, score {})",
            self.state.session.depth,
            self.state.session.score
        );
        let now = self.clock.now_ms();
        self.input = TickInput::default();
        self.state.reset();

        let session = self.state.session.clone();
        self.state.emit(GameEvent::ScoreChanged(session.score));
        self.state.emit(GameEvent::LivesChanged(session.lives));
        self.state.emit(GameEvent::DepthChanged(session.depth));
        powerups::report_timers(&mut self.state, now);
        self.state.message(START_MESSAGE, true);
    }

    /// New play-field size: bricks are re-laid, the paddle re-centered on
    /// the new bottom row
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("Resizing field to {}x{}", width, height);
        let field = FieldSize { width, height };
        let state = &mut self.state;
        state.field = field;
        state.entities.bricks.resize(width, &state.tuning.grid);

        let home = Paddle::new(&state.tuning.field, field);
        state.paddle.y = home.y;
        state.paddle.x = (width - state.paddle.width) / 2.0;
        state.paddle.clamp_to(width);
    }

    /// Run one simulation step at the clock's current time
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        tick(&mut self.state, &self.input, now);
        self.input.target_x = None;
    }

    /// Render view at the clock's current time
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, self.clock.now_ms())
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for hosts and tests that stage a scenario
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_paused(&self) -> bool {
        self.state.session.paused
    }

    pub fn is_over(&self) -> bool {
        self.state.session.over
    }

    pub fn is_won(&self) -> bool {
        self.state.session.won
    }
}
