//! Data-driven game balance
//!
//! Every knob the simulation reads lives here. A `Tuning` is validated once,
//! when a session or spawner is built, so a bad value can never surface in
//! the middle of a run.

use core::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a `Tuning` is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Spawn offset range must satisfy min < max
    EmptySpawnRange { min: f32, max: f32 },
    /// Ground + flying variant count is zero
    NoObstacleVariants,
    /// Ground hitbox table length differs from the ground variant count
    HitboxTableMismatch { expected: u32, found: usize },
    /// Flying variants configured without any altitude to fly at
    NoFlyingAltitudes,
    /// A variant count does not fit the obstacle kind's variant index
    TooManyVariants { field: &'static str, count: u32 },
    /// A standing jump cannot reach the unarmed start trigger
    TriggerOutOfReach { apex: f32, needed: f32 },
    /// A dimension, rate or interval that must be strictly positive
    NonPositive { field: &'static str },
    /// Tuning file could not be read
    Read { path: String, reason: String },
    /// Tuning JSON could not be parsed
    Parse(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpawnRange { min, max } => {
                write!(f, "spawn offset range is empty (min {min} >= max {max})")
            }
            Self::NoObstacleVariants => write!(f, "no obstacle variants configured"),
            Self::HitboxTableMismatch { expected, found } => write!(
                f,
                "ground hitbox table has {found} entries, expected {expected}"
            ),
            Self::NoFlyingAltitudes => write!(f, "flying variants need at least one altitude"),
            Self::TooManyVariants { field, count } => {
                write!(f, "{field} is {count}, at most {} allowed", u8::MAX)
            }
            Self::TriggerOutOfReach { apex, needed } => write!(
                f,
                "jump apex {apex:.1} cannot reach the start trigger (needs more than {needed:.1})"
            ),
            Self::NonPositive { field } => write!(f, "{field} must be greater than zero"),
            Self::Read { path, reason } => write!(f, "cannot read tuning file {path}: {reason}"),
            Self::Parse(msg) => write!(f, "invalid tuning json: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Game balance values (fixed for the lifetime of a session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Scroll distance per Running tick before the speed modifier
    pub base_speed: f32,

    // === Player ===
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Magnitude of the upward jump velocity (units/s)
    pub jump_impulse: f32,

    // === Spawning ===
    /// Accumulated frame time between spawns (ms)
    pub spawn_interval_ms: f32,
    /// Distance ahead of the right viewport edge (inclusive range)
    pub spawn_offset_min: f32,
    pub spawn_offset_max: f32,
    pub ground_variants: u32,
    pub flying_variants: u32,
    /// (width, height) per ground variant, index 0 is variant 1
    pub ground_hitboxes: Vec<(f32, f32)>,
    pub flying_hitbox: (f32, f32),
    /// Height of a flying obstacle's bottom edge above the floor.
    /// The first entry flies low, every later one is labelled high.
    pub flying_altitudes: Vec<f32>,

    // === Scoring ===
    /// Running time per score point (ms)
    pub score_interval_ms: f32,
    /// Score multiple that triggers a milestone
    pub milestone_interval: u32,
    /// Added to the speed modifier at each milestone
    pub milestone_speed_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            base_speed: BASE_SPEED,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            spawn_interval_ms: 1850.0,
            spawn_offset_min: 150.0,
            spawn_offset_max: 300.0,
            ground_variants: 6,
            flying_variants: 3,
            ground_hitboxes: vec![
                (30.0, 65.0),
                (60.0, 65.0),
                (95.0, 65.0),
                (45.0, 90.0),
                (95.0, 90.0),
                (140.0, 90.0),
            ],
            flying_hitbox: (92.0, 52.0),
            flying_altitudes: vec![20.0, 70.0],

            score_interval_ms: 100.0,
            milestone_interval: 100,
            milestone_speed_step: 0.075,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning override file
    pub fn from_file(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|e| TuningError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Total number of obstacle categories a spawn draw chooses from
    pub fn total_variants(&self) -> u32 {
        self.ground_variants.saturating_add(self.flying_variants)
    }

    /// Peak rise of a standing jump (continuous v²/2g)
    pub fn jump_apex(&self) -> f32 {
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity)
    }

    /// Floor plane (player feet and ground obstacles rest here)
    pub fn floor_y(&self) -> f32 {
        self.viewport_height
    }

    /// Reject configurations that would break the Running loop later
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_offset_min >= self.spawn_offset_max {
            return Err(TuningError::EmptySpawnRange {
                min: self.spawn_offset_min,
                max: self.spawn_offset_max,
            });
        }
        for (field, count) in [
            ("ground_variants", self.ground_variants),
            ("flying_variants", self.flying_variants),
        ] {
            if count > u32::from(u8::MAX) {
                return Err(TuningError::TooManyVariants { field, count });
            }
        }
        if self.total_variants() == 0 {
            return Err(TuningError::NoObstacleVariants);
        }
        if self.ground_hitboxes.len() != self.ground_variants as usize {
            return Err(TuningError::HitboxTableMismatch {
                expected: self.ground_variants,
                found: self.ground_hitboxes.len(),
            });
        }
        if self.flying_variants > 0 && self.flying_altitudes.is_empty() {
            return Err(TuningError::NoFlyingAltitudes);
        }

        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("base_speed", self.base_speed),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("score_interval_ms", self.score_interval_ms),
            ("flying_hitbox.width", self.flying_hitbox.0),
            ("flying_hitbox.height", self.flying_hitbox.1),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field });
            }
        }
        if self
            .ground_hitboxes
            .iter()
            .any(|&(w, h)| w <= 0.0 || h <= 0.0)
        {
            return Err(TuningError::NonPositive {
                field: "ground_hitboxes",
            });
        }
        if self.milestone_interval == 0 {
            return Err(TuningError::NonPositive {
                field: "milestone_interval",
            });
        }

        // Standing hitbox top must rise past the trigger's bottom edge
        let needed = START_TRIGGER_LIFT - PLAYER_HITBOX_HEIGHT;
        let apex = self.jump_apex();
        if apex <= needed {
            return Err(TuningError::TriggerOutOfReach { apex, needed });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.total_variants(), 9);
        assert_eq!(tuning.floor_y(), VIEWPORT_HEIGHT);
    }

    #[test]
    fn test_rejects_empty_spawn_range() {
        let tuning = Tuning {
            spawn_offset_min: 300.0,
            spawn_offset_max: 300.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::EmptySpawnRange {
                min: 300.0,
                max: 300.0
            })
        );
    }

    #[test]
    fn test_rejects_zero_variants() {
        let tuning = Tuning {
            ground_variants: 0,
            flying_variants: 0,
            ground_hitboxes: Vec::new(),
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::NoObstacleVariants));
    }

    #[test]
    fn test_rejects_short_hitbox_table() {
        let tuning = Tuning {
            ground_variants: 7,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::HitboxTableMismatch {
                expected: 7,
                found: 6
            })
        );
    }

    #[test]
    fn test_rejects_flying_without_altitudes() {
        let tuning = Tuning {
            flying_altitudes: Vec::new(),
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::NoFlyingAltitudes));
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let tuning = Tuning {
            spawn_interval_ms: 0.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonPositive {
                field: "spawn_interval_ms"
            })
        );

        let tuning = Tuning {
            ground_hitboxes: vec![(30.0, 65.0); 5]
                .into_iter()
                .chain([(0.0, 10.0)])
                .collect(),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_rejects_variant_counts_past_u8() {
        let tuning = Tuning {
            ground_variants: 300,
            ground_hitboxes: vec![(30.0, 65.0); 300],
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::TooManyVariants {
                field: "ground_variants",
                count: 300
            })
        );

        let tuning = Tuning {
            ground_variants: 255,
            ground_hitboxes: vec![(30.0, 65.0); 255],
            flying_variants: 255,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.total_variants(), 510);
    }

    #[test]
    fn test_huge_flying_count_is_an_error() {
        let tuning = Tuning {
            flying_variants: u32::MAX,
            ..Default::default()
        };
        assert_eq!(tuning.total_variants(), u32::MAX);
        assert_eq!(
            tuning.validate(),
            Err(TuningError::TooManyVariants {
                field: "flying_variants",
                count: u32::MAX
            })
        );

        let err = Tuning::from_json(r#"{ "flying_variants": 4294967295 }"#).unwrap_err();
        assert!(matches!(err, TuningError::TooManyVariants { .. }));
    }

    #[test]
    fn test_rejects_trigger_out_of_jump_reach() {
        let tuning = Tuning {
            jump_impulse: 900.0,
            ..Default::default()
        };
        // 900² / 10000 = 81, the hitbox top must rise more than 108
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::TriggerOutOfReach { .. })
        ));

        // Floor height alone never puts the trigger out of reach
        let tuning = Tuning {
            viewport_height: 250.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.jump_apex(), 256.0);
    }

    #[test]
    fn test_unreadable_file_is_not_a_parse_error() {
        let err = Tuning::from_file(Path::new("/nonexistent/rex-runner-tuning.json")).unwrap_err();
        assert!(matches!(err, TuningError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read tuning file"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 12.5, "spawn_interval_ms": 1500 }"#)
            .expect("valid override");
        assert_eq!(tuning.base_speed, 12.5);
        assert_eq!(tuning.spawn_interval_ms, 1500.0);
        assert_eq!(tuning.ground_hitboxes, Tuning::default().ground_hitboxes);
    }

    #[test]
    fn test_json_is_validated() {
        let err = Tuning::from_json(r#"{ "spawn_offset_min": 500 }"#).unwrap_err();
        assert!(matches!(err, TuningError::EmptySpawnRange { .. }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("invalid tuning json"));
    }
}
