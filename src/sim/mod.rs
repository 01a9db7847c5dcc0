//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Frame time is the only clock
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod hitbox;
pub mod input;
pub mod player;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionResult, first_collision};
pub use hitbox::Hitbox;
pub use input::{InputEdges, InputLatch, TickInput};
pub use player::{Player, PlayerController, Pose};
pub use score::{ScoreTracker, format_high_score, format_score};
pub use spawner::{Altitude, Obstacle, ObstacleKind, ObstacleSpawner};
pub use state::{
    GameEvent, GamePhase, GameSession, HudVisibility, ObstacleView, PlayerView, Snapshot,
    StartTrigger, TriggerPlacement,
};
pub use tick::tick;
pub use world::{Cloud, ScrollingWorld};
