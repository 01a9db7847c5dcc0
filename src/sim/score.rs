//! Time-based scoring, milestones and the session high score

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use super::world::ScrollingWorld;
use crate::consts::*;
use crate::tuning::Tuning;

/// Score state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
    high_score: u32,
    /// Running time not yet converted into points (ms)
    accumulated_ms: f32,
    /// Remaining HUD blink after a milestone (ms)
    blink_ms: f32,
    score_interval_ms: f32,
    milestone_interval: u32,
    milestone_speed_step: f32,
}

impl ScoreTracker {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            high_score: 0,
            accumulated_ms: 0.0,
            blink_ms: 0.0,
            score_interval_ms: tuning.score_interval_ms,
            milestone_interval: tuning.milestone_interval,
            milestone_speed_step: tuning.milestone_speed_step,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn accumulated_ms(&self) -> f32 {
        self.accumulated_ms
    }

    /// Add Running time. Every full interval is one point; each point that
    /// lands on a milestone raises the world speed and emits an event.
    pub fn advance(
        &mut self,
        elapsed_ms: f32,
        world: &mut ScrollingWorld,
        events: &mut Vec<GameEvent>,
    ) {
        self.blink_ms = (self.blink_ms - elapsed_ms).max(0.0);
        self.accumulated_ms += elapsed_ms;

        // Leftover time carries into the next point so long frames don't drop score
        while self.accumulated_ms >= self.score_interval_ms {
            self.accumulated_ms -= self.score_interval_ms;
            self.score += 1;

            if self.score.is_multiple_of(self.milestone_interval) {
                world.raise_speed(self.milestone_speed_step);
                self.blink_ms = MILESTONE_BLINK_MS;
                log::info!(
                    "Milestone {} reached, speed modifier {:.3}",
                    self.score,
                    world.speed_modifier()
                );
                events.push(GameEvent::Milestone {
                    score: self.score,
                    speed_modifier: world.speed_modifier(),
                });
            }
        }
    }

    /// End of a life: keep the best score, zero the rest, slow the world back down.
    /// Returns the high score after the commit.
    pub fn commit_and_reset(&mut self, world: &mut ScrollingWorld) -> u32 {
        self.high_score = self.high_score.max(self.score);
        self.score = 0;
        self.accumulated_ms = 0.0;
        self.blink_ms = 0.0;
        world.reset_speed();
        self.high_score
    }

    /// Score HUD visibility while the milestone blink plays
    pub fn hud_blink_visible(&self) -> bool {
        if self.blink_ms <= 0.0 {
            return true;
        }
        let step = ((MILESTONE_BLINK_MS - self.blink_ms) / MILESTONE_BLINK_STEP_MS) as u32;
        step.is_multiple_of(2)
    }
}

/// Zero-padded score for the HUD ("00042")
pub fn format_score(score: u32) -> String {
    format!("{:0>width$}", score, width = SCORE_DIGITS)
}

/// High score label ("HI 00042")
pub fn format_high_score(high_score: u32) -> String {
    format!("HI {}", format_score(high_score))
}
