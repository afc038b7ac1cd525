//! Procedural platform layout around the trunk
//!
//! Platforms are attached rigidly to the trunk. Each one gets a random
//! angle around the trunk and a height evenly spaced from bottom to top:
//!
//! ```text
//! y_i = (i / count * 2 - 1) * half_height
//! ```
//!
//! World positions are obtained by rotating the trunk-local centre about
//! the vertical axis by the trunk's current rotation.

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::{normalize_angle, radial_point, random_range};

/// Geometry shared by every platform in a layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub count: u32,
    pub trunk_half_height: f32,
    pub trunk_radius: f32,
    pub platform_radius: f32,
    pub platform_thickness: f32,
    pub stick_out: f32,
}

impl LayoutParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            count: config.platform_count,
            trunk_half_height: config.trunk_half_height(),
            trunk_radius: config.trunk_radius,
            platform_radius: config.platform_radius,
            platform_thickness: config.platform_thickness,
            stick_out: config.stick_out,
        }
    }

    /// Height of the `index`-th platform (independent of randomness)
    #[inline]
    pub fn platform_height(&self, index: u32) -> f32 {
        (index as f32 / self.count as f32 * 2.0 - 1.0) * self.trunk_half_height
    }
}

/// A platform slab sticking out of the trunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Angle around the trunk (radians, [0, 2π))
    pub theta: f32,
    /// Height of the slab centre
    pub y: f32,
    pub radius: f32,
    pub thickness: f32,
    /// Slab centre in trunk space
    pub local_center: Vec3,
}

impl Platform {
    pub fn new(theta: f32, y: f32, params: &LayoutParams) -> Self {
        Self {
            theta,
            y,
            radius: params.platform_radius,
            thickness: params.platform_thickness,
            local_center: radial_point(params.trunk_radius + params.stick_out, theta, y),
        }
    }

    /// Where the slab meets the trunk surface (trunk space)
    pub fn attach_point(&self, trunk_radius: f32) -> Vec3 {
        radial_point(trunk_radius, self.theta, self.y)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.thickness / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y - self.thickness / 2.0
    }

    /// Slab centre in world space for a given trunk rotation
    #[inline]
    pub fn world_center(&self, trunk_rotation: f32) -> Vec3 {
        Quat::from_rotation_y(trunk_rotation) * self.local_center
    }

    /// Yaw of the slab in world space (the slab faces away from the trunk)
    #[inline]
    pub fn world_yaw(&self, trunk_rotation: f32) -> f32 {
        normalize_angle(trunk_rotation - self.theta)
    }
}

/// The full set of platforms for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformLayout {
    pub params: LayoutParams,
    pub platforms: Vec<Platform>,
}

impl PlatformLayout {
    /// Place `params.count` platforms, drawing angles from `rng`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: LayoutParams) -> Self {
        let platforms = (0..params.count)
            .map(|i| {
                let theta = random_range(rng, 0.0, std::f32::consts::TAU);
                Platform::new(theta, params.platform_height(i), &params)
            })
            .collect();

        Self { params, platforms }
    }

    /// A layout without platforms (only the base catches the ball)
    pub fn empty(params: LayoutParams) -> Self {
        Self {
            params: LayoutParams { count: 0, ..params },
            platforms: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }
}

/// Position and yaw of a platform for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformTransform {
    pub position: Vec3,
    pub yaw: f32,
}

/// The rotating trunk and the platforms attached to it
///
/// Rotation is the only thing that changes during a run; collision and
/// rendering read it, only the rotation control writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trunk {
    pub radius: f32,
    pub height: f32,
    rotation: f32,
    layout: PlatformLayout,
}

impl Trunk {
    pub fn new(radius: f32, height: f32, layout: PlatformLayout) -> Self {
        Self {
            radius,
            height,
            rotation: 0.0,
            layout,
        }
    }

    /// Rotation about the vertical axis (radians, [-π, π))
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn rotate(&mut self, delta: f32) {
        self.rotation = normalize_angle(self.rotation + delta);
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = normalize_angle(rotation);
    }

    pub fn layout(&self) -> &PlatformLayout {
        &self.layout
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.layout.platforms
    }

    /// Swap in a freshly generated layout and square the trunk up
    pub fn replace_layout(&mut self, layout: PlatformLayout) {
        self.layout = layout;
        self.rotation = 0.0;
    }

    /// World transforms of every platform under the current rotation
    pub fn platform_transforms(&self) -> Vec<PlatformTransform> {
        self.layout
            .iter()
            .map(|p| PlatformTransform {
                position: p.world_center(self.rotation),
                yaw: p.world_yaw(self.rotation),
            })
            .collect()
    }
}
