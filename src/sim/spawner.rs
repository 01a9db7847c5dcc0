//! Procedural obstacle generation
//!
//! Obstacles appear on a fixed timer, a randomized distance past the right
//! edge of the viewport. A single uniform draw picks the category: the first
//! `ground_variants` values are cacti, anything above is a bird. Hitboxes are
//! looked up once, at creation, and never touched again.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hitbox::Hitbox;
use crate::consts::BIRD_ANIM_FPS;
use crate::tuning::{Tuning, TuningError};

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Cactus, variant 1..=ground_variants
    Ground(u8),
    /// Bird, variant 1..=flying_variants
    Flying(u8),
}

impl ObstacleKind {
    pub fn is_flying(&self) -> bool {
        matches!(self, Self::Flying(_))
    }
}

/// Vertical placement of an obstacle.
/// Flying obstacles at the first configured altitude are `LowFly`; any
/// other altitude index is `HighFly`, whatever its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Altitude {
    Ground,
    LowFly,
    HighFly,
}

/// A live obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Bottom-left anchor
    pub pos: Vec2,
    /// Width and height, fixed at spawn
    pub size: Vec2,
    pub altitude: Altitude,
    /// Wing-flap clock (ms), birds only
    pub anim_ms: f32,
}

impl Obstacle {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::from_bottom_left(self.pos, self.size)
    }

    pub fn anim_frame(&self) -> u32 {
        if self.kind.is_flying() {
            crate::anim_frame(self.anim_ms, BIRD_ANIM_FPS)
        } else {
            0
        }
    }
}

/// Creates, scrolls and culls obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpawner {
    tuning: Tuning,
    /// Accumulated frame time since the last spawn (ms)
    spawn_time: f32,
    pub(crate) obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleSpawner {
    /// Build a spawner; a tuning that could fail at spawn time is rejected here
    pub fn new(tuning: &Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning: tuning.clone(),
            spawn_time: 0.0,
            obstacles: Vec::new(),
            next_id: 1,
        })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn spawn_time(&self) -> f32 {
        self.spawn_time
    }

    /// Add elapsed time; spawn once when the interval is exceeded.
    /// Returns the id of the spawned obstacle, if any.
    pub fn advance<R: Rng>(&mut self, elapsed_ms: f32, rng: &mut R) -> Option<u32> {
        self.spawn_time += elapsed_ms;
        if self.spawn_time > self.tuning.spawn_interval_ms {
            self.spawn_time = 0.0;
            Some(self.spawn(rng))
        } else {
            None
        }
    }

    /// Create one obstacle from a fresh category and distance draw
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> u32 {
        let t = &self.tuning;
        let category = rng.random_range(1..=t.total_variants());
        let distance = rng.random_range(t.spawn_offset_min..=t.spawn_offset_max);
        let x = t.viewport_width + distance;
        let floor = t.floor_y();

        let (kind, altitude, bottom, size) = if category > t.ground_variants {
            let lift_index = rng.random_range(0..t.flying_altitudes.len());
            let lift = t.flying_altitudes[lift_index];
            let altitude = if lift_index == 0 {
                Altitude::LowFly
            } else {
                Altitude::HighFly
            };
            // Both counts are validated to fit a u8
            let variant = (category - t.ground_variants) as u8;
            (
                ObstacleKind::Flying(variant),
                altitude,
                floor - lift,
                Vec2::from(t.flying_hitbox),
            )
        } else {
            let (w, h) = t.ground_hitboxes[(category - 1) as usize];
            (
                ObstacleKind::Ground(category as u8),
                Altitude::Ground,
                floor,
                Vec2::new(w, h),
            )
        };

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            kind,
            pos: Vec2::new(x, bottom),
            size,
            altitude,
            anim_ms: 0.0,
        });
        log::debug!("Spawned {:?} #{} at x={:.0} ({:?})", kind, id, x, altitude);

        id
    }

    /// Shift every obstacle left and drop the ones fully past the left edge
    pub fn scroll(&mut self, shift: f32, elapsed_ms: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= shift;
            if obstacle.kind.is_flying() {
                obstacle.anim_ms += elapsed_ms;
            }
        }
        self.obstacles.retain(|o| o.hitbox().right() >= 0.0);
    }

    /// Zero the spawn timer (game over)
    pub fn reset_timer(&mut self) {
        self.spawn_time = 0.0;
    }

    /// Remove every live obstacle (restart)
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }
}
