//! Browser bindings
//!
//! The page keeps its own canvas, audio and DOM code; it forwards input to a
//! [`WasmSession`], calls `tick()` from `requestAnimationFrame` and reads the
//! resulting events as JSON.

use wasm_bindgen::prelude::*;

use crate::platform::SystemClock;
use crate::session::GameSession;
use crate::sim::state::Direction;
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WasmSession {
    inner: GameSession<SystemClock>,
}

#[wasm_bindgen]
impl WasmSession {
    /// Session with default tuning, or the given JSON tuning if it parses
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WasmSession {
        console_error_panic_hook::set_once();
        // A second session on the same page finds the logger already set
        let _ = console_log::init_with_level(log::Level::Info);

        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Invalid tuning JSON, using defaults: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        WasmSession {
            inner: GameSession::new(seed, tuning),
        }
    }

    pub fn tick(&mut self) {
        self.inner.tick();
    }

    /// -1 left, 1 right, anything else stops
    pub fn set_direction(&mut self, direction: i32) {
        let direction = match direction {
            -1 => Direction::Left,
            1 => Direction::Right,
            _ => Direction::None,
        };
        self.inner.set_paddle_direction(direction);
    }

    pub fn set_target_x(&mut self, x: f32) {
        self.inner.set_paddle_target_x(x);
    }

    pub fn acknowledge(&mut self) {
        self.inner.acknowledge();
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    /// Pending events as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        let events = self.inner.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Paddle, balls, bricks, capsules, particles and HUD timers as JSON,
    /// with colours and fades already resolved
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
