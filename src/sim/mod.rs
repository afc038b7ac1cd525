//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (platform layouts are reproducible per seed and run)
//! - Stable iteration order (platforms in layout order)
//! - No rendering, DOM or camera dependencies

pub mod ball;
pub mod collision;
pub mod control;
pub mod layout;
pub mod lifecycle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{CollisionParams, Contact, Surface, detect, resolve};
pub use control::{DragEvent, RotationControl};
pub use layout::{LayoutParams, Platform, PlatformLayout, PlatformTransform, Trunk};
pub use lifecycle::{GamePhase, Lifecycle, ObserverHandle};
pub use state::{FrameSnapshot, GameEvent, GameState, run_seed};
pub use tick::{TickInput, step_physics, tick};
