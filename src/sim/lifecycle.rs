//! Run lifecycle: Playing until the ball drops out of view, then GameOver
//!
//! Observers are plain closures called synchronously, in registration
//! order, when the lifecycle ends a run or starts a new one.

use serde::{Deserialize, Serialize};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Physics and controls run
    #[default]
    Playing,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// Identifies a registered observer so it can be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u32);

type Observer = Box<dyn FnMut()>;

/// Playing/GameOver state machine with transition observers
pub struct Lifecycle {
    phase: GamePhase,
    game_over_observers: Vec<(ObserverHandle, Observer)>,
    reset_observers: Vec<(ObserverHandle, Observer)>,
    next_handle: u32,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("phase", &self.phase)
            .field("game_over_observers", &self.game_over_observers.len())
            .field("reset_observers", &self.reset_observers.len())
            .finish()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Playing,
            game_over_observers: Vec::new(),
            reset_observers: Vec::new(),
            next_handle: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// End the run
    ///
    /// Only the first call after a reset transitions and notifies; later
    /// calls return `false` and do nothing.
    pub fn game_over(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        for (_, observer) in &mut self.game_over_observers {
            observer();
        }
        true
    }

    /// Start a new run; always notifies, even when already Playing
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        for (_, observer) in &mut self.reset_observers {
            observer();
        }
    }

    /// End the run if the ball has dropped `offset` below the reference height
    ///
    /// `offset` is negative. Returns whether this call ended the run.
    pub fn check_game_over(&mut self, ball_y: f32, reference_y: f32, offset: f32) -> bool {
        if ball_y < reference_y + offset {
            self.game_over()
        } else {
            false
        }
    }

    pub fn on_game_over(&mut self, observer: impl FnMut() + 'static) -> ObserverHandle {
        let handle = self.allocate_handle();
        self.game_over_observers.push((handle, Box::new(observer)));
        handle
    }

    pub fn on_reset(&mut self, observer: impl FnMut() + 'static) -> ObserverHandle {
        let handle = self.allocate_handle();
        self.reset_observers.push((handle, Box::new(observer)));
        handle
    }

    /// Remove an observer from whichever list it is on
    pub fn remove_observer(&mut self, handle: ObserverHandle) -> bool {
        let before = self.game_over_observers.len() + self.reset_observers.len();
        self.game_over_observers.retain(|(h, _)| *h != handle);
        self.reset_observers.retain(|(h, _)| *h != handle);
        before != self.game_over_observers.len() + self.reset_observers.len()
    }

    fn allocate_handle(&mut self) -> ObserverHandle {
        let handle = ObserverHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}
