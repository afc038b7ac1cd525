//! Game state: everything one run owns
//!
//! The trunk, ball and rotation control are rebuilt on every reset. The
//! lifecycle (and its observers) lives across runs.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::{CollisionParams, Surface};
use super::control::RotationControl;
use super::layout::{LayoutParams, PlatformLayout, PlatformTransform, Trunk};
use super::lifecycle::{GamePhase, Lifecycle};
use crate::config::GameConfig;

/// Something that happened during a tick, for the driver to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Bounce {
        surface: Surface,
        height: f32,
        count: u32,
    },
    GameOver {
        bounces: u32,
    },
    Reset {
        run: u32,
    },
}

/// Read-only view of a frame for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub run: u32,
    pub ball_position: Vec3,
    pub ball_radius: f32,
    pub bounce_count: u32,
    pub last_bounce_y: f32,
    pub trunk_rotation: f32,
    pub platforms: Vec<PlatformTransform>,
}

/// RNG seed for a given run of a game seed
///
/// Each run gets its own stream so a restart lays out new platforms while
/// `(seed, run)` still reproduces a layout exactly.
pub fn run_seed(seed: u64, run: u32) -> u64 {
    (run as u64).wrapping_mul(2654435761).wrapping_add(seed)
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    /// Game seed; combined with `run` for each layout
    pub seed: u64,
    /// Number of resets so far
    pub run: u32,
    pub ball: Ball,
    pub trunk: Trunk,
    pub control: RotationControl,
    pub lifecycle: Lifecycle,
    pub collision: CollisionParams,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let layout = Self::generate_layout(&config, seed, 0);
        Self {
            ball: Ball::spawn(&config),
            trunk: Trunk::new(config.trunk_radius, config.trunk_height, layout),
            control: RotationControl::from_config(&config),
            lifecycle: Lifecycle::new(),
            collision: CollisionParams::from_config(&config),
            events: Vec::new(),
            config,
            seed,
            run: 0,
        }
    }

    /// Same as `new` but with a caller-supplied layout
    pub fn with_layout(seed: u64, config: GameConfig, layout: PlatformLayout) -> Self {
        let mut state = Self::new(seed, config);
        state.trunk.replace_layout(layout);
        state
    }

    fn generate_layout(config: &GameConfig, seed: u64, run: u32) -> PlatformLayout {
        let mut rng = Pcg32::seed_from_u64(run_seed(seed, run));
        let layout = PlatformLayout::generate(&mut rng, LayoutParams::from_config(config));
        log::debug!("Run {} layout: {} platforms", run, layout.len());
        layout
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.lifecycle.phase()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.lifecycle.is_playing()
    }

    /// Start a new run with a fresh layout, from any phase
    pub fn reset(&mut self) {
        self.run += 1;
        let layout = Self::generate_layout(&self.config, self.seed, self.run);
        self.trunk.replace_layout(layout);
        self.ball = Ball::spawn(&self.config);
        self.control.reset();
        self.lifecycle.reset();
        self.events.push(GameEvent::Reset { run: self.run });
        log::info!("Run {} started", self.run);
    }

    /// End the run (no-op if already over)
    pub fn end_run(&mut self) -> bool {
        if !self.lifecycle.game_over() {
            return false;
        }
        self.on_run_ended();
        true
    }

    /// End the run if the ball fell too far below `reference_y`
    pub fn check_game_over(&mut self, reference_y: f32) -> bool {
        let ended = self.lifecycle.check_game_over(
            self.ball.pos.y,
            reference_y,
            self.config.game_over_offset,
        );
        if ended {
            self.on_run_ended();
        }
        ended
    }

    fn on_run_ended(&mut self) {
        let bounces = self.ball.bounce_count;
        self.control.reset();
        self.events.push(GameEvent::GameOver { bounces });
        log::info!("Run {} over after {} bounces", self.run, bounces);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase(),
            run: self.run,
            ball_position: self.ball.pos,
            ball_radius: self.ball.radius,
            bounce_count: self.ball.bounce_count,
            last_bounce_y: self.ball.last_bounce_y,
            trunk_rotation: self.trunk.rotation(),
            platforms: self.trunk.platform_transforms(),
        }
    }
}
