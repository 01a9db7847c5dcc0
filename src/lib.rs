//! Rex Runner - A side-scrolling endless runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance with fail-fast validation
//!
//! Rendering, audio and raw input polling live outside this crate. The host
//! feeds one [`sim::TickInput`] per frame and reads back a [`sim::Snapshot`].

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, GameSession, Snapshot, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (the floor is the bottom edge)
    pub const VIEWPORT_WIDTH: f32 = 1000.0;
    pub const VIEWPORT_HEIGHT: f32 = 500.0;

    /// Player physics (units/s and units/s²)
    pub const GRAVITY: f32 = 5000.0;
    pub const JUMP_IMPULSE: f32 = 1600.0;

    /// World scroll per Running tick at speed modifier 1
    pub const BASE_SPEED: f32 = 10.0;

    /// Player sprite frame height; hitbox offsets are measured from its top
    pub const PLAYER_FRAME_HEIGHT: f32 = 92.0;
    /// Standing hitbox
    pub const PLAYER_HITBOX_WIDTH: f32 = 44.0;
    pub const PLAYER_HITBOX_HEIGHT: f32 = 92.0;
    pub const PLAYER_HITBOX_OFFSET: (f32, f32) = (20.0, 0.0);
    /// Ducking hitbox (same width, shorter, shifted forward)
    pub const PLAYER_DUCK_HEIGHT: f32 = 58.0;
    pub const PLAYER_DUCK_OFFSET: (f32, f32) = (60.0, 34.0);

    /// Intro rollout runs on its own fixed 60 Hz step
    pub const ROLLOUT_STEP_MS: f32 = 1000.0 / 60.0;
    pub const ROLLOUT_PLAYER_SPEED: f32 = 80.0;
    pub const ROLLOUT_GROUND_GROWTH: f32 = 34.0;
    /// Ground strip width before the rollout (one tile)
    pub const GROUND_START_WIDTH: f32 = 88.0;

    /// Start trigger zone (bottom-left anchored, square)
    pub const START_TRIGGER_SIZE: f32 = 32.0;
    /// Height of the unarmed trigger's bottom edge above the floor
    pub const START_TRIGGER_LIFT: f32 = 200.0;
    /// Parking spot for the trigger once the run has begun
    pub const START_TRIGGER_PARKED: f32 = 9999.0;

    /// Clouds drift at a fixed rate regardless of the speed modifier
    pub const CLOUD_SPEED: f32 = 0.5;
    pub const CLOUD_WIDTH: f32 = 92.0;
    pub const CLOUD_RESPAWN_MARGIN: f32 = 30.0;

    /// Score HUD blink after a milestone (6 fade cycles of 2 x 100 ms)
    pub const MILESTONE_BLINK_MS: f32 = 1200.0;
    pub const MILESTONE_BLINK_STEP_MS: f32 = 100.0;

    /// Sprite animation rates (frames per second, two-frame cycles)
    pub const RUN_ANIM_FPS: f32 = 10.0;
    pub const BIRD_ANIM_FPS: f32 = 6.0;
    pub const ANIM_FRAMES: u32 = 2;

    /// Digits shown on the score HUD
    pub const SCORE_DIGITS: usize = 5;
}

/// Frame index of a looping two-frame animation after `elapsed_ms`
#[inline]
pub fn anim_frame(elapsed_ms: f32, fps: f32) -> u32 {
    let frame_ms = 1000.0 / fps;
    (elapsed_ms / frame_ms) as u32 % consts::ANIM_FRAMES
}
