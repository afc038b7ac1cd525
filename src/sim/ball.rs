//! The bouncing ball
//!
//! Only the vertical axis is driven (gravity and bounces); the ball keeps a
//! fixed horizontal offset from the trunk and the trunk rotates under it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::clamp;
use crate::config::GameConfig;

/// Ball kinematic state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    /// Bounces since the run started
    pub bounce_count: u32,
    /// Height of the last surface bounced off (camera target)
    pub last_bounce_y: f32,
}

impl Ball {
    pub fn new(pos: Vec3, vel: Vec3, radius: f32, last_bounce_y: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            bounce_count: 0,
            last_bounce_y,
        }
    }

    /// Ball resting on the base platform, heading up at bounce speed
    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(
            Vec3::new(
                0.0,
                config.base_platform_top_y + config.ball_radius,
                config.ball_orbit_radius,
            ),
            Vec3::new(0.0, config.bounce_speed, 0.0),
            config.ball_radius,
            config.base_platform_top_y,
        )
    }

    #[inline]
    pub fn apply_gravity(&mut self, dt: f32, gravity: f32) {
        self.vel.y += gravity * dt;
    }

    /// Clamp vertical speed to `[-max_abs, max_abs]`
    #[inline]
    pub fn limit_velocity(&mut self, max_abs: f32) {
        self.vel.y = clamp(self.vel.y, -max_abs, max_abs);
    }

    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Snap onto `surface_y` and leave at `signed_speed`
    ///
    /// Positive speed puts the ball on top of the surface, negative below it.
    /// Returns the new bounce count.
    pub fn bounce(&mut self, surface_y: f32, signed_speed: f32) -> u32 {
        self.pos.y = surface_y + self.radius * sign(signed_speed);
        self.vel.y = signed_speed;
        self.last_bounce_y = surface_y;
        self.bounce_count += 1;
        self.bounce_count
    }

    /// Lowest point of the ball
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Highest point of the ball
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Sign with `sign(0) == 0` (`f32::signum` returns 1 for +0)
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ball() -> Ball {
        Ball::new(Vec3::new(0.0, 0.0, 1.3), Vec3::ZERO, 0.15, 0.0)
    }

    #[test]
    fn test_spawn_matches_config() {
        let config = GameConfig::default();
        let ball = Ball::spawn(&config);
        assert!((ball.pos.y - (config.base_platform_top_y + config.ball_radius)).abs() < 1e-6);
        assert_eq!(ball.pos.z, config.ball_orbit_radius);
        assert_eq!(ball.vel.y, config.bounce_speed);
        assert_eq!(ball.bounce_count, 0);
        assert_eq!(ball.last_bounce_y, config.base_platform_top_y);
    }

    #[test]
    fn test_free_fall_matches_closed_form() {
        let mut ball = test_ball();
        ball.vel.y = 3.0;
        let g = -9.8;
        let dt = 0.01;
        let steps = 50;

        for _ in 0..steps {
            ball.apply_gravity(dt, g);
            ball.integrate(dt);
        }

        // Semi-implicit Euler: y_n = v0*t + g*dt^2 * n(n+1)/2
        let n = steps as f32;
        let expected = 3.0 * n * dt + g * dt * dt * n * (n + 1.0) / 2.0;
        assert!((ball.pos.y - expected).abs() < 1e-4, "{} vs {}", ball.pos.y, expected);
        // And it converges on the continuous solution
        let t = n * dt;
        let continuous = 3.0 * t + 0.5 * g * t * t;
        assert!((ball.pos.y - continuous).abs() < 0.03);
    }

    #[test]
    fn test_limit_velocity() {
        let mut ball = test_ball();
        ball.vel.y = -40.0;
        ball.limit_velocity(15.0);
        assert_eq!(ball.vel.y, -15.0);

        ball.vel.y = 22.0;
        ball.limit_velocity(15.0);
        assert_eq!(ball.vel.y, 15.0);

        ball.vel.y = 3.0;
        ball.limit_velocity(15.0);
        assert_eq!(ball.vel.y, 3.0);
    }

    #[test]
    fn test_integrate_is_full_vector() {
        let mut ball = test_ball();
        ball.vel = Vec3::new(1.0, 2.0, -3.0);
        ball.integrate(0.5);
        assert_eq!(ball.pos, Vec3::new(0.5, 1.0, 1.3 - 1.5));
    }

    #[test]
    fn test_bounce_up_and_down() {
        let mut ball = test_ball();
        ball.vel.y = -4.0;
        assert_eq!(ball.bounce(1.0, 7.5), 1);
        assert!((ball.pos.y - 1.15).abs() < 1e-6);
        assert_eq!(ball.vel.y, 7.5);
        assert_eq!(ball.last_bounce_y, 1.0);

        assert_eq!(ball.bounce(3.0, -7.5), 2);
        assert!((ball.pos.y - 2.85).abs() < 1e-6);
        assert_eq!(ball.vel.y, -7.5);
        assert_eq!(ball.last_bounce_y, 3.0);
    }

    #[test]
    fn test_zero_speed_bounce_centres_ball() {
        let mut ball = test_ball();
        ball.bounce(2.0, 0.0);
        assert_eq!(ball.pos.y, 2.0);
        assert_eq!(ball.vel.y, 0.0);
    }
}
