//! Per-frame simulation step
//!
//! One call per displayed frame with the elapsed time since the previous
//! one. The driver sanitizes `dt` before it gets here.

use serde::{Deserialize, Serialize};

use super::collision;
use super::control::DragEvent;
use super::state::{GameEvent, GameState};

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Pointer events in arrival order
    pub drag: Vec<DragEvent>,
    /// Restart key
    pub restart: bool,
}

impl TickInput {
    pub fn clear(&mut self) {
        self.drag.clear();
        self.restart = false;
    }
}

/// Advance the game by one frame
///
/// `reference_y` is the camera height the game-over check measures against.
/// Outside `Playing` only a restart is honoured; drag input is dropped.
/// On the frame that restarts, `reference_y` still describes the previous
/// run, so no game-over check is made.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, reference_y: f32) {
    if input.restart {
        state.reset();
    }

    if !state.is_playing() {
        return;
    }

    // Drags turn the trunk between frames, before physics looks at it
    for &event in &input.drag {
        state.control.handle(event);
    }
    state.control.apply_drag(&mut state.trunk);

    step_physics(state, dt);

    // Inertial spin lands after collision
    state.control.update(&mut state.trunk);

    if !input.restart {
        state.check_game_over(reference_y);
    }
}

/// Gravity, clamping, integration, then at most one bounce
pub fn step_physics(state: &mut GameState, dt: f32) {
    let ball = &mut state.ball;
    ball.apply_gravity(dt, state.config.gravity);
    ball.limit_velocity(state.config.max_velocity);
    ball.integrate(dt);

    if let Some(contact) = collision::resolve(ball, &state.trunk, &state.collision) {
        let event = GameEvent::Bounce {
            surface: contact.surface,
            height: contact.surface_y,
            count: ball.bounce_count,
        };
        log::trace!("{:?}", event);
        state.push_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::collision::Surface;
    use crate::sim::layout::{LayoutParams, Platform, PlatformLayout};
    use crate::sim::lifecycle::GamePhase;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 0.016;

    fn empty_state() -> GameState {
        let config = GameConfig::default();
        let layout = PlatformLayout::empty(LayoutParams::from_config(&config));
        GameState::with_layout(1, config, layout)
    }

    #[test]
    fn test_scenario_rise_peak_fall_base_bounce() {
        let mut state = empty_state();
        state.ball.pos.y = 0.075;
        state.ball.vel.y = 7.5;

        let input = TickInput::default();
        let mut peaked = false;
        let mut previous_y = state.ball.pos.y;
        let mut bounced = false;

        for _ in 0..200 {
            // Camera far below keeps the run alive
            tick(&mut state, &input, DT, -100.0);
            let y = state.ball.pos.y;

            if state.ball.bounce_count == 1 {
                bounced = true;
                break;
            }
            if y < previous_y {
                peaked = true;
            }
            assert!(state.ball.vel.y.abs() <= 15.0);
            previous_y = y;
        }

        assert!(peaked, "ball never started falling");
        assert!(bounced, "ball never reached the base");
        assert!((state.ball.pos.y - -2.575).abs() < 1e-5);
        assert_eq!(state.ball.vel.y, 7.5);
        assert_eq!(state.ball.last_bounce_y, state.config.base_platform_top_y);

        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::Bounce {
                surface: Surface::Base,
                count: 1,
                ..
            }]
        ));
    }

    #[test]
    fn test_bounces_forever_on_base() {
        let mut state = empty_state();
        let input = TickInput::default();
        for _ in 0..2000 {
            tick(&mut state, &input, DT, 0.0);
        }
        assert!(state.is_playing());
        assert!(state.ball.bounce_count > 10);
        assert!(state.ball.pos.y >= state.config.base_platform_top_y);
    }

    #[test]
    fn test_velocity_clamped_each_step() {
        let mut state = empty_state();
        state.ball.pos.y = 30.0;
        state.ball.vel.y = -14.9;
        tick(&mut state, &TickInput::default(), 0.1, -1000.0);
        assert_eq!(state.ball.vel.y, -15.0);
    }

    #[test]
    fn test_game_over_when_ball_drops_below_camera() {
        let mut state = empty_state();
        // Camera well above the ball
        tick(&mut state, &TickInput::default(), DT, 10.0);
        assert_eq!(state.phase(), GamePhase::GameOver);

        let events = state.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver { bounces: 0 }));
    }

    #[test]
    fn test_no_physics_or_control_after_game_over() {
        let mut state = empty_state();
        state.end_run();
        let frozen = state.ball.clone();

        let input = TickInput {
            drag: vec![
                DragEvent::Press { x: 0.0 },
                DragEvent::Move { x: 300.0 },
            ],
            restart: false,
        };
        for _ in 0..10 {
            tick(&mut state, &input, DT, 0.0);
        }
        assert_eq!(state.ball, frozen);
        assert_eq!(state.trunk.rotation(), 0.0);
        assert!(!state.control.is_dragging());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = empty_state();
        state.end_run();

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT, 0.0);
        assert!(state.is_playing());
        assert_eq!(state.run, 1);
        // First step of the new run already ran
        assert!(state.ball.vel.y < state.config.bounce_speed);
    }

    #[test]
    fn test_restart_after_high_climb_keeps_playing() {
        let mut state = empty_state();
        // Camera left high up by the previous run
        let camera_y = 22.8;
        state.end_run();
        state.drain_events();

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT, camera_y);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset { run: 1 }]);
    }

    #[test]
    fn test_collision_sees_rotation_before_inertia() {
        let config = GameConfig::default();
        let params = LayoutParams::from_config(&config);
        let layout = PlatformLayout {
            params: LayoutParams { count: 1, ..params },
            platforms: vec![Platform::new(FRAC_PI_2, 5.0, &params)],
        };
        let mut state = GameState::with_layout(1, config, layout);

        // Leave the control coasting at 1 rad per frame with the trunk square
        state.control.press(0.0);
        state.control.drag_to(200.0);
        state.control.release();
        state.control.apply_drag(&mut state.trunk);
        state.trunk.set_rotation(0.0);

        // Falling onto the platform top in front of the ball
        state.ball.pos.y = 5.02 + 0.15 - 0.01;
        state.ball.vel.y = -1.0;

        tick(&mut state, &TickInput::default(), DT, -100.0);

        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::Bounce {
                surface: Surface::PlatformTop(0),
                ..
            }]
        ));
        // Spin applied once physics was done
        assert!((state.trunk.rotation() - 0.92).abs() < 1e-5);
    }

    #[test]
    fn test_drag_rotates_trunk_while_playing() {
        let mut state = empty_state();
        let input = TickInput {
            drag: vec![
                DragEvent::Press { x: 0.0 },
                DragEvent::Move { x: 40.0 },
            ],
            restart: false,
        };
        tick(&mut state, &input, DT, -100.0);
        assert!((state.trunk.rotation() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_ball_climbs_onto_platform_above_base() {
        let config = GameConfig::default();
        let params = LayoutParams::from_config(&config);
        // Platform right in front of the ball, within reach of a base bounce
        let layout = PlatformLayout {
            params: LayoutParams { count: 1, ..params },
            platforms: vec![Platform::new(FRAC_PI_2, -1.0, &params)],
        };
        let mut state = GameState::with_layout(1, config, layout);

        let input = TickInput::default();
        for _ in 0..200 {
            tick(&mut state, &input, DT, -100.0);
        }

        let events = state.drain_events();
        // The ball rises into the slab from below first
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Bounce {
                surface: Surface::PlatformBottom(0),
                ..
            }
        )));
    }
}
