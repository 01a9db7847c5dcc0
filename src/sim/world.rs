//! Scrolling world bookkeeping
//!
//! The ground scrolls with the shared speed (base speed x modifier); tiling
//! the ground texture is left to the presentation layer. Clouds drift at a
//! fixed slow rate and are recycled to the right edge instead of destroyed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// A decorative background cloud (center anchored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
}

impl Cloud {
    pub fn right(&self) -> f32 {
        self.pos.x + CLOUD_WIDTH / 2.0
    }
}

/// Ground, clouds and the global speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollingWorld {
    base_speed: f32,
    speed_modifier: f32,
    viewport_width: f32,
    ground_offset: f32,
    /// Visible ground strip; grows during the intro rollout
    ground_width: f32,
    clouds: Vec<Cloud>,
    decor_visible: bool,
}

impl ScrollingWorld {
    pub fn new(tuning: &Tuning) -> Self {
        let w = tuning.viewport_width;
        Self {
            base_speed: tuning.base_speed,
            speed_modifier: 1.0,
            viewport_width: w,
            ground_offset: 0.0,
            ground_width: GROUND_START_WIDTH.min(w),
            clouds: vec![
                Cloud {
                    pos: Vec2::new(w / 2.0, 170.0),
                },
                Cloud {
                    pos: Vec2::new(w - 80.0, 80.0),
                },
                Cloud {
                    pos: Vec2::new(w / 1.3, 100.0),
                },
            ],
            decor_visible: false,
        }
    }

    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    /// Distance the world moves this tick
    pub fn scroll_speed(&self) -> f32 {
        self.base_speed * self.speed_modifier
    }

    pub fn ground_offset(&self) -> f32 {
        self.ground_offset
    }

    pub fn ground_width(&self) -> f32 {
        self.ground_width
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn decor_visible(&self) -> bool {
        self.decor_visible
    }

    pub fn raise_speed(&mut self, step: f32) {
        self.speed_modifier += step;
    }

    pub fn reset_speed(&mut self) {
        self.speed_modifier = 1.0;
    }

    /// Grow the ground strip by one rollout step.
    /// Returns true once it spans the viewport (width clamped).
    pub fn extend_ground(&mut self, growth: f32) -> bool {
        self.ground_width += growth;
        if self.ground_width >= self.viewport_width {
            self.ground_width = self.viewport_width;
            true
        } else {
            false
        }
    }

    pub fn reveal_decor(&mut self) {
        self.decor_visible = true;
    }

    /// One Running tick of scrolling
    pub fn advance(&mut self) {
        self.ground_offset += self.scroll_speed();

        let respawn_x = self.viewport_width + CLOUD_RESPAWN_MARGIN;
        for cloud in &mut self.clouds {
            cloud.pos.x -= CLOUD_SPEED;
            if cloud.right() < 0.0 {
                cloud.pos.x = respawn_x;
            }
        }
    }
}
