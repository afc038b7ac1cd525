//! Tree Bounce - a ball hopping up platforms around a rotating trunk
//!
//! Core modules:
//! - `sim`: Simulation (ball physics, platform layout, collisions, lifecycle)
//! - `camera`: Default camera-follow collaborator
//! - `config`: Data-driven game constants
//! - `session`: Frame order shared by the web and native drivers

pub mod camera;
pub mod config;
pub mod session;
pub mod sim;

pub use camera::CameraFollow;
pub use config::{ConfigError, GameConfig};
pub use session::Session;

use glam::Vec3;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Trunk dimensions
    pub const TRUNK_HEIGHT: f32 = 70.0;
    pub const TRUNK_RADIUS: f32 = 1.0;
    pub const TRUNK_DIAMETER: f32 = TRUNK_RADIUS * 2.0;

    /// Platforms sticking out of the trunk
    pub const STICK_OUT: f32 = 0.1 * TRUNK_DIAMETER;
    pub const PLATFORM_RADIUS: f32 = TRUNK_DIAMETER * 0.4 / 2.0;
    pub const PLATFORM_THICKNESS: f32 = 0.02 * TRUNK_DIAMETER;
    pub const PLATFORM_DENSITY: f32 = 0.5;
    /// floor(TRUNK_HEIGHT * PLATFORM_DENSITY)
    pub const PLATFORM_COUNT: u32 = 35;

    /// Top surface of the fixed base platform
    pub const BASE_PLATFORM_TOP_Y: f32 = -2.8 + 0.075;

    /// Ball
    pub const BALL_RADIUS: f32 = 0.15;
    /// Ball sits this far out from the trunk axis (along +Z)
    pub const BALL_ORBIT_RADIUS: f32 = TRUNK_RADIUS * 1.3;

    /// Ball physics
    pub const GRAVITY: f32 = -9.8;
    pub const BOUNCE_SPEED: f32 = 7.5;
    pub const MAX_VELOCITY: f32 = 15.0;

    /// Camera
    pub const CAMERA_FOLLOW_SPEED: f32 = 0.06;
    pub const CAMERA_HEIGHT_OFFSET: f32 = 2.8;
    pub const CAMERA_START_Y: f32 = 0.0;

    /// Mouse rotation (radians per pixel) and per-frame inertia
    pub const ROTATION_SPEED: f32 = 0.005;
    pub const INERTIA: f32 = 0.92;
    /// Inertial spin below this is dropped
    pub const MIN_SPIN: f32 = 0.0001;

    /// Upper bounds accepted from a config override
    pub const MAX_PLATFORM_COUNT: u32 = 10_000;
    pub const MAX_ROTATION_SPEED: f32 = 1.0;

    /// Ball this far below the camera ends the run
    pub const GAME_OVER_Y_OFFSET: f32 = -5.0;
}

/// Clamp `value` to `[min, max]`; `min` wins on an inverted range
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[inline]
pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + (end - start) * amount
}

/// Uniform sample in `[min, max)` from the given RNG
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    // Subtracting TAU stops changing large floats
    if angle.abs() > 16.0 * TAU {
        angle = angle.rem_euclid(TAU);
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Point at distance `r` from the vertical axis, angle `theta` in the XZ plane
#[inline]
pub fn radial_point(r: f32, theta: f32, y: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Horizontal (XZ) distance between two points
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Sanitize a measured frame delta before it reaches the simulation
///
/// Negative or non-finite deltas become zero, long stalls are capped.
#[inline]
pub fn sanitize_frame_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        return 0.0;
    }
    dt.min(consts::MAX_FRAME_DT)
}
