//! Drag-to-rotate control for the trunk
//!
//! Pointer events only record what happened; the rotation they cause is
//! applied on the next simulation step together with release inertia.

use serde::{Deserialize, Serialize};

use super::layout::Trunk;
use crate::config::GameConfig;
use crate::consts::MIN_SPIN;

/// One pointer event, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragEvent {
    Press { x: f32 },
    Move { x: f32 },
    Release,
}

/// Angular velocity accumulator driven by horizontal drags
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationControl {
    /// Radians per pixel
    pub rotation_speed: f32,
    /// Per-frame spin multiplier after release
    pub inertia: f32,
    dragging: bool,
    previous_x: f32,
    /// Radians per frame
    velocity: f32,
    /// Rotation dragged since the last update
    pending: f32,
}

impl RotationControl {
    pub fn new(rotation_speed: f32, inertia: f32) -> Self {
        Self {
            rotation_speed,
            inertia,
            ..Default::default()
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.rotation_speed, config.inertia)
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn handle(&mut self, event: DragEvent) {
        match event {
            DragEvent::Press { x } => self.press(x),
            DragEvent::Move { x } => self.drag_to(x),
            DragEvent::Release => self.release(),
        }
    }

    /// Grab the trunk; any leftover spin stops
    pub fn press(&mut self, x: f32) {
        self.dragging = true;
        self.previous_x = x;
        self.velocity = 0.0;
    }

    pub fn drag_to(&mut self, x: f32) {
        if !self.dragging {
            return;
        }
        self.velocity = (x - self.previous_x) * self.rotation_speed;
        self.pending += self.velocity;
        self.previous_x = x;
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Rotate by whatever was dragged since the last call
    pub fn apply_drag(&mut self, trunk: &mut Trunk) {
        if self.pending != 0.0 {
            trunk.rotate(self.pending);
            self.pending = 0.0;
        }
    }

    /// Apply dragged rotation, or coast with inertia when released
    pub fn update(&mut self, trunk: &mut Trunk) {
        self.apply_drag(trunk);

        if !self.dragging {
            self.velocity *= self.inertia;
            if self.velocity.abs() > MIN_SPIN {
                trunk.rotate(self.velocity);
            }
        }
    }

    pub fn reset(&mut self) {
        self.dragging = false;
        self.velocity = 0.0;
        self.pending = 0.0;
    }
}
