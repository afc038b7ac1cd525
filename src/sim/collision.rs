//! Ball vs platform collision detection and response
//!
//! The ball only moves vertically, so every contact is a flat surface hit:
//! the top of the base platform, or the top or bottom face of a platform
//! slab on the trunk. A hit snaps the ball onto the surface and reverses it
//! at the fixed bounce speed (no restitution).
//!
//! Detection is discrete: the ball has to straddle a face at the end of the
//! step. A ball fast enough to cross a whole slab in one step passes through.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::layout::Trunk;
use crate::config::GameConfig;
use crate::horizontal_distance;

/// Collision tuning pulled out of the game config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    pub base_top_y: f32,
    pub bounce_speed: f32,
    /// Ball radius + platform radius
    pub catch_radius: f32,
}

impl CollisionParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            base_top_y: config.base_platform_top_y,
            bounce_speed: config.bounce_speed,
            catch_radius: config.catch_radius(),
        }
    }
}

/// Which surface the ball hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    /// The fixed floor platform
    Base,
    /// Landed on a trunk platform (index into the layout)
    PlatformTop(usize),
    /// Struck a trunk platform from below
    PlatformBottom(usize),
}

/// A detected contact, ready to be applied to the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub surface: Surface,
    /// Height of the face that was hit
    pub surface_y: f32,
    /// Vertical velocity after the bounce (sign gives the direction)
    pub bounce_velocity: f32,
}

/// Find the contact (if any) for the ball's current state
///
/// The base platform is checked first and acts as a floor regardless of the
/// ball's direction. Otherwise the first platform in layout order whose
/// top or bottom face the ball is crossing wins.
pub fn detect(ball: &Ball, trunk: &Trunk, params: &CollisionParams) -> Option<Contact> {
    if ball.bottom() <= params.base_top_y {
        return Some(Contact {
            surface: Surface::Base,
            surface_y: params.base_top_y,
            bounce_velocity: params.bounce_speed,
        });
    }

    let rotation = trunk.rotation();
    for (index, platform) in trunk.platforms().iter().enumerate() {
        let center = platform.world_center(rotation);
        if horizontal_distance(ball.pos, center) >= params.catch_radius {
            continue;
        }

        let top = platform.top();
        if ball.bottom() <= top && ball.top() >= top && ball.pos.y > top && ball.vel.y < 0.0 {
            return Some(Contact {
                surface: Surface::PlatformTop(index),
                surface_y: top,
                bounce_velocity: params.bounce_speed,
            });
        }

        let bottom = platform.bottom();
        if ball.top() >= bottom && ball.bottom() <= bottom && ball.pos.y < bottom && ball.vel.y > 0.0
        {
            return Some(Contact {
                surface: Surface::PlatformBottom(index),
                surface_y: bottom,
                bounce_velocity: -params.bounce_speed,
            });
        }
    }

    None
}

/// Apply a contact to the ball, returning the new bounce count
#[inline]
pub fn apply_contact(ball: &mut Ball, contact: &Contact) -> u32 {
    ball.bounce(contact.surface_y, contact.bounce_velocity)
}

/// Detect and resolve at most one contact for this step
pub fn resolve(ball: &mut Ball, trunk: &Trunk, params: &CollisionParams) -> Option<Contact> {
    let contact = detect(ball, trunk, params)?;
    apply_contact(ball, &contact);
    Some(contact)
}
