//! Game session state and core simulation types
//!
//! A `GameSession` owns every component of the run. It is only ever mutated
//! through [`tick`](super::tick::tick); the presentation layer reads it back
//! through [`Snapshot`] and drains [`GameEvent`]s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hitbox::Hitbox;
use super::input::InputLatch;
use super::player::{Player, PlayerController, Pose};
use super::score::{ScoreTracker, format_high_score, format_score};
use super::spawner::{Altitude, Obstacle, ObstacleKind, ObstacleSpawner};
use super::world::ScrollingWorld;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to jump into the start trigger
    AwaitingStart,
    /// Ground rolls out on a fixed 60 Hz step
    IntroRollout,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Cues for the presentation layer (sound, flashes, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First touch of the start trigger; it moved to floor level
    TriggerArmed,
    RolloutStarted,
    RunStarted,
    Jumped,
    Milestone { score: u32, speed_modifier: f32 },
    GameOver { score: u32, high_score: u32, obstacle_id: u32 },
    Restarted,
}

/// Where the start trigger currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerPlacement {
    /// Mid-air, reachable by the first jump
    Initial,
    /// On the floor at world origin; touching it starts the rollout
    Armed,
    /// Parked off-world once the run has begun
    Disarmed,
}

/// Zone the player touches to begin a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartTrigger {
    pub placement: TriggerPlacement,
}

impl StartTrigger {
    pub fn hitbox(&self, floor_y: f32) -> Hitbox {
        let anchor = match self.placement {
            TriggerPlacement::Initial => Vec2::new(0.0, floor_y - START_TRIGGER_LIFT),
            TriggerPlacement::Armed => Vec2::new(0.0, floor_y),
            TriggerPlacement::Disarmed => Vec2::splat(START_TRIGGER_PARKED),
        };
        Hitbox::from_bottom_left(anchor, Vec2::splat(START_TRIGGER_SIZE))
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) player: PlayerController,
    pub(crate) spawner: ObstacleSpawner,
    pub(crate) score: ScoreTracker,
    pub(crate) world: ScrollingWorld,
    pub(crate) trigger: StartTrigger,
    pub(crate) input: InputLatch,
    /// Intro timer accumulator; `None` once cancelled
    pub(crate) rollout_ms: Option<f32>,
    pub(crate) score_hud_visible: bool,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session seeded from `seed`; rejects an invalid tuning up front
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::with_rng(tuning, seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a session with an explicit random source
    pub fn with_rng(tuning: Tuning, seed: u64, rng: Pcg32) -> Result<Self, TuningError> {
        let spawner = ObstacleSpawner::new(&tuning)?;
        let mut player = PlayerController::new(&tuning);
        player.initialize(0.0, tuning.floor_y());

        log::info!("New session with seed {}", seed);
        Ok(Self {
            seed,
            rng,
            phase: GamePhase::AwaitingStart,
            player,
            spawner,
            score: ScoreTracker::new(&tuning),
            world: ScrollingWorld::new(&tuning),
            trigger: StartTrigger {
                placement: TriggerPlacement::Initial,
            },
            input: InputLatch::default(),
            rollout_ms: None,
            score_hud_visible: false,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.spawner.obstacles()
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    pub fn speed_modifier(&self) -> f32 {
        self.world.speed_modifier()
    }

    pub fn world(&self) -> &ScrollingWorld {
        &self.world
    }

    pub fn trigger(&self) -> StartTrigger {
        self.trigger
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything the presentation layer draws this frame
    pub fn snapshot(&self) -> Snapshot {
        let p: &Player = self.player.player();
        Snapshot {
            phase: self.phase,
            player: PlayerView {
                pos: p.pos,
                vel: p.vel,
                hitbox: self.player.hitbox(),
                pose: self.player.pose(),
                anim_frame: self.player.anim_frame(),
                grounded: p.grounded,
                ducked: p.ducked,
                alive: p.alive,
            },
            obstacles: self
                .spawner
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    pos: o.pos,
                    hitbox: o.hitbox(),
                    altitude: o.altitude,
                    anim_frame: o.anim_frame(),
                })
                .collect(),
            score: self.score.score(),
            high_score: self.score.high_score(),
            score_text: format_score(self.score.score()),
            high_score_text: format_high_score(self.score.high_score()),
            speed_modifier: self.world.speed_modifier(),
            ground_offset: self.world.ground_offset(),
            ground_width: self.world.ground_width(),
            clouds: self.world.clouds().iter().map(|c| c.pos).collect(),
            hud: HudVisibility {
                score: self.score_hud_visible && self.score.hud_blink_visible(),
                clouds: self.world.decor_visible(),
                high_score: self.phase == GamePhase::GameOver,
                game_over: self.phase == GamePhase::GameOver,
            },
        }
    }
}

/// Player as the presentation layer sees it
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hitbox: Hitbox,
    pub pose: Pose,
    pub anim_frame: u32,
    pub grounded: bool,
    pub ducked: bool,
    pub alive: bool,
}

/// Obstacle as the presentation layer sees it
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub hitbox: Hitbox,
    pub altitude: Altitude,
    pub anim_frame: u32,
}

/// Which HUD and overlay elements are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudVisibility {
    pub score: bool,
    pub clouds: bool,
    pub high_score: bool,
    pub game_over: bool,
}

/// Read-only view of a session for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub high_score: u32,
    pub score_text: String,
    pub high_score_text: String,
    pub speed_modifier: f32,
    pub ground_offset: f32,
    pub ground_width: f32,
    pub clouds: Vec<Vec2>,
    pub hud: HudVisibility,
}
