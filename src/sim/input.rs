//! Per-tick input edge detection
//!
//! The host reports which logical buttons are held each frame. Edges are
//! derived here against the previous tick, so holding a button never repeats
//! its action.

use serde::{Deserialize, Serialize};

/// Input levels for a single tick (held = true)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump (space / tap)
    pub jump: bool,
    /// Duck (down arrow)
    pub duck: bool,
    /// Restart (game-over button)
    pub restart: bool,
}

/// Edges and levels resolved for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    pub jump_pressed: bool,
    pub duck_held: bool,
    pub duck_released: bool,
    pub restart_pressed: bool,
}

/// Remembers last tick's levels
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputLatch {
    previous: TickInput,
}

impl InputLatch {
    /// Resolve this tick's edges and remember the levels for the next tick
    pub fn resolve(&mut self, input: &TickInput) -> InputEdges {
        let prev = self.previous;
        self.previous = *input;

        InputEdges {
            jump_pressed: input.jump && !prev.jump,
            duck_held: input.duck,
            duck_released: !input.duck && prev.duck,
            restart_pressed: input.restart && !prev.restart,
        }
    }
}
