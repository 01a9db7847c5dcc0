//! Player physics and state controller
//!
//! The player is anchored at the bottom-left of its sprite frame, so `pos.y`
//! is the feet. Jump and duck react to input edges resolved by
//! [`InputLatch`](super::input::InputLatch); floor contact is whatever the
//! previous integration left behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hitbox::Hitbox;
use super::input::InputEdges;
use crate::consts::*;
use crate::tuning::Tuning;

/// Visual pose exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    /// Standing still before the run begins
    Idle,
    /// Running on the ground
    Run,
    /// Running with the reduced hitbox
    DuckRun,
    /// Moving vertically
    Airborne,
    /// Frozen after a collision
    Hurt,
}

/// Player body state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-left of the sprite frame
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub hitbox_size: Vec2,
    /// Offset of the hitbox from the sprite frame's top-left
    pub hitbox_offset: Vec2,
    pub grounded: bool,
    pub ducked: bool,
    pub alive: bool,
}

impl Player {
    fn standing_at(pos: Vec2, floor_y: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            hitbox_size: Vec2::new(PLAYER_HITBOX_WIDTH, PLAYER_HITBOX_HEIGHT),
            hitbox_offset: Vec2::from(PLAYER_HITBOX_OFFSET),
            grounded: pos.y >= floor_y,
            ducked: false,
            alive: true,
        }
    }
}

/// Owns the player and advances it one tick at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    player: Player,
    /// Where `reset()` puts the player back
    home: Vec2,
    floor_y: f32,
    gravity: f32,
    jump_impulse: f32,
    pose: Pose,
    /// Pose follows movement only once the run is live
    running: bool,
    /// Run/duck animation clock (ms)
    anim_ms: f32,
}

impl PlayerController {
    pub fn new(tuning: &Tuning) -> Self {
        let floor_y = tuning.floor_y();
        let home = Vec2::new(0.0, floor_y);
        Self {
            player: Player::standing_at(home, floor_y),
            home,
            floor_y,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            pose: Pose::Idle,
            running: false,
            anim_ms: 0.0,
        }
    }

    /// Place the player at its start position and make that the home spot
    pub fn initialize(&mut self, start_x: f32, start_y: f32) {
        self.home = Vec2::new(start_x, start_y);
        self.player = Player::standing_at(self.home, self.floor_y);
        self.pose = Pose::Idle;
        self.running = false;
        self.anim_ms = 0.0;
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn is_grounded(&self) -> bool {
        self.player.grounded
    }

    pub fn is_alive(&self) -> bool {
        self.player.alive
    }

    /// Current hitbox in world space
    pub fn hitbox(&self) -> Hitbox {
        let frame_top_left = Vec2::new(self.player.pos.x, self.player.pos.y - PLAYER_FRAME_HEIGHT);
        Hitbox::new(
            frame_top_left + self.player.hitbox_offset,
            self.player.hitbox_size,
        )
    }

    /// Current frame of the run or duck cycle
    pub fn anim_frame(&self) -> u32 {
        crate::anim_frame(self.anim_ms, RUN_ANIM_FPS)
    }

    /// Let the pose track movement (Running) or hold it (intro, idle)
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn set_velocity_x(&mut self, vx: f32) {
        self.player.vel.x = vx;
    }

    /// Make the current spot the one `reset()` returns to
    pub fn anchor_home(&mut self) {
        self.home = Vec2::new(self.player.pos.x, self.floor_y);
    }

    /// Force a ground pose regardless of vertical motion (intro rollout)
    pub fn force_run_pose(&mut self) {
        if self.player.alive {
            self.pose = self.ground_pose();
        }
    }

    /// Advance one tick. Returns true when a jump was started.
    pub fn tick(&mut self, input: &InputEdges, dt_ms: f32) -> bool {
        if !self.player.alive {
            return false;
        }

        let grounded = self.player.grounded;
        let mut jumped = false;

        if input.jump_pressed && grounded {
            self.player.vel.y = -self.jump_impulse;
            jumped = true;
        }
        if input.duck_held && grounded {
            self.set_duck_hitbox();
        }
        if input.duck_released && grounded {
            self.set_default_hitbox();
        }

        self.integrate(dt_ms / 1000.0);

        if self.running {
            self.pose = if self.player.vel.y.abs() > 0.0 {
                Pose::Airborne
            } else {
                self.ground_pose()
            };
        }
        if matches!(self.pose, Pose::Run | Pose::DuckRun) {
            self.anim_ms += dt_ms;
        }

        jumped
    }

    /// Collision: the player dies and the pose freezes
    pub fn on_collision(&mut self) {
        self.player.alive = false;
        self.pose = Pose::Hurt;
    }

    /// Back to the home spot, at rest, full-size and alive
    pub fn reset(&mut self) {
        self.player = Player::standing_at(self.home, self.floor_y);
        self.pose = if self.running { Pose::Run } else { Pose::Idle };
    }

    fn ground_pose(&self) -> Pose {
        if self.player.ducked {
            Pose::DuckRun
        } else {
            Pose::Run
        }
    }

    fn set_duck_hitbox(&mut self) {
        self.player.hitbox_size.y = PLAYER_DUCK_HEIGHT;
        self.player.hitbox_offset = Vec2::from(PLAYER_DUCK_OFFSET);
        self.player.ducked = true;
    }

    fn set_default_hitbox(&mut self) {
        self.player.hitbox_size = Vec2::new(PLAYER_HITBOX_WIDTH, PLAYER_HITBOX_HEIGHT);
        self.player.hitbox_offset = Vec2::from(PLAYER_HITBOX_OFFSET);
        self.player.ducked = false;
    }

    fn integrate(&mut self, dt: f32) {
        let p = &mut self.player;
        p.vel.y += self.gravity * dt;
        p.pos += p.vel * dt;

        if p.pos.y >= self.floor_y {
            p.pos.y = self.floor_y;
            p.vel.y = 0.0;
            p.grounded = true;
        } else {
            p.grounded = false;
        }
    }
}
