//! Camera follow
//!
//! Eases toward a fixed height above the last bounce. Runs every frame,
//! game over or not, so the view settles where the ball was last caught.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::lerp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraFollow {
    /// Current camera height
    pub y: f32,
    pub follow_speed: f32,
    pub height_offset: f32,
    pub start_y: f32,
}

impl CameraFollow {
    pub fn new(start_y: f32, follow_speed: f32, height_offset: f32) -> Self {
        Self {
            y: start_y,
            follow_speed,
            height_offset,
            start_y,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.camera_start_y,
            config.camera_follow_speed,
            config.camera_height_offset,
        )
    }

    /// Height the camera is heading for
    #[inline]
    pub fn target(&self, last_bounce_y: f32) -> f32 {
        last_bounce_y + self.height_offset
    }

    pub fn update(&mut self, last_bounce_y: f32) {
        self.y = lerp(self.y, self.target(last_bounce_y), self.follow_speed);
    }

    pub fn reset(&mut self) {
        self.y = self.start_y;
    }
}
