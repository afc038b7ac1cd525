//! A game and the camera that judges it, stepped one frame at a time
//!
//! Both drivers go through `Session::frame` so the frame order is the same
//! on the web and natively: restart resets the camera, the simulation ticks
//! against the camera height, then the camera follows the last bounce.

use crate::camera::CameraFollow;
use crate::config::GameConfig;
use crate::sanitize_frame_dt;
use crate::sim::{GameEvent, GameState, TickInput, tick};

#[derive(Debug)]
pub struct Session {
    pub state: GameState,
    pub camera: CameraFollow,
}

impl Session {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            camera: CameraFollow::from_config(&config),
            state: GameState::new(seed, config),
        }
    }

    /// Advance one displayed frame of `dt` seconds (raw, sanitized here)
    ///
    /// Returns the events the tick produced, in order.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let dt = sanitize_frame_dt(dt);

        if input.restart {
            self.camera.reset();
        }
        tick(&mut self.state, input, dt, self.camera.y);
        let events = self.state.drain_events();

        // Camera keeps easing after game over
        self.camera.update(self.state.ball.last_bounce_y);
        events
    }
}
