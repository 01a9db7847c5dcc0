//! Property tests for the runner simulation

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use rex_runner::consts::*;
use rex_runner::sim::{
    GameEvent, GamePhase, GameSession, InputEdges, ObstacleKind, ObstacleSpawner,
    PlayerController, TickInput, tick,
};
use rex_runner::Tuning;

const FRAME_MS: f32 = 1000.0 / 60.0;

fn jump() -> TickInput {
    TickInput {
        jump: true,
        ..Default::default()
    }
}

/// Jump into the start trigger and wait for the rollout to finish
fn start_running(seed: u64, tuning: Tuning) -> GameSession {
    let mut session = GameSession::new(tuning, seed).expect("valid tuning");
    tick(&mut session, &jump(), FRAME_MS);
    for _ in 0..240 {
        if session.phase() == GamePhase::Running {
            break;
        }
        tick(&mut session, &TickInput::default(), FRAME_MS);
    }
    assert_eq!(session.phase(), GamePhase::Running);
    session.drain_events();
    session
}

fn input_strategy() -> impl Strategy<Value = Vec<TickInput>> {
    proptest::collection::vec(
        (any::<bool>(), any::<bool>(), prop::bool::weighted(0.05)).prop_map(
            |(jump, duck, restart)| TickInput {
                jump,
                duck,
                restart,
            },
        ),
        50..600,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn scroll_matches_speed_every_running_tick(seed in any::<u64>(), inputs in input_strategy()) {
        let mut session = start_running(seed, Tuning::default());

        for input in &inputs {
            let phase_before = session.phase();
            let ground_before = session.world().ground_offset();
            let xs_before: HashMap<u32, f32> =
                session.obstacles().iter().map(|o| (o.id, o.pos.x)).collect();

            tick(&mut session, input, FRAME_MS);

            // Every surviving obstacle is on screen or to the right of it
            for o in session.obstacles() {
                prop_assert!(o.hitbox().right() >= 0.0);
            }

            if phase_before != GamePhase::Running || session.phase() != GamePhase::Running {
                continue;
            }

            let shift = BASE_SPEED * session.speed_modifier();
            prop_assert!((session.world().ground_offset() - ground_before - shift).abs() < 1e-2);
            for o in session.obstacles() {
                if let Some(x) = xs_before.get(&o.id) {
                    prop_assert!((x - shift - o.pos.x).abs() < 1e-3);
                    prop_assert!(o.pos.x < *x);
                }
            }
        }
    }

    #[test]
    fn high_score_never_decreases(seed in any::<u64>(), inputs in input_strategy()) {
        let mut session = start_running(seed, Tuning::default());
        let mut high = 0;

        for input in &inputs {
            let score_before = session.score();
            tick(&mut session, input, FRAME_MS);
            prop_assert!(session.high_score() >= high);
            high = session.high_score();

            for event in session.drain_events() {
                if let GameEvent::GameOver { score, high_score, .. } = event {
                    prop_assert!(score >= score_before);
                    prop_assert_eq!(high_score, high);
                    prop_assert_eq!(session.score(), 0);
                    prop_assert_eq!(session.speed_modifier(), 1.0);
                }
            }
        }
    }

    #[test]
    fn jump_applies_iff_grounded_on_edge(
        levels in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..400)
    ) {
        let mut ctrl = PlayerController::new(&Tuning::default());
        ctrl.set_running(true);
        let mut prev_jump = false;
        let mut prev_duck = false;

        for (jump, duck) in levels {
            let edges = InputEdges {
                jump_pressed: jump && !prev_jump,
                duck_held: duck,
                duck_released: !duck && prev_duck,
                restart_pressed: false,
            };
            let grounded = ctrl.is_grounded();
            let vy_before = ctrl.player().vel.y;

            let jumped = ctrl.tick(&edges, FRAME_MS);
            prop_assert_eq!(jumped, grounded && edges.jump_pressed);
            if !grounded {
                let expected = vy_before + GRAVITY * FRAME_MS / 1000.0;
                if ctrl.is_grounded() {
                    prop_assert_eq!(ctrl.player().vel.y, 0.0);
                } else {
                    prop_assert!((ctrl.player().vel.y - expected).abs() < 1e-2);
                }
            }

            let height = ctrl.hitbox().size.y;
            prop_assert!(height == PLAYER_DUCK_HEIGHT || height == PLAYER_HITBOX_HEIGHT);
            if grounded && duck {
                prop_assert_eq!(height, PLAYER_DUCK_HEIGHT);
            }
            prop_assert!(ctrl.player().pos.y <= VIEWPORT_HEIGHT);

            prev_jump = jump;
            prev_duck = duck;
        }
    }

    #[test]
    fn spawns_stay_in_configured_ranges(
        seed in any::<u64>(),
        min in 0.0f32..500.0,
        span in 1.0f32..500.0,
        count in 1usize..200,
    ) {
        let tuning = Tuning {
            spawn_offset_min: min,
            spawn_offset_max: min + span,
            ..Default::default()
        };
        let mut spawner = ObstacleSpawner::new(&tuning).expect("valid tuning");
        let mut rng = Pcg32::seed_from_u64(seed);

        for _ in 0..count {
            spawner.spawn(&mut rng);
        }
        for o in spawner.obstacles() {
            let offset = o.pos.x - tuning.viewport_width;
            prop_assert!(offset >= tuning.spawn_offset_min - 1e-3);
            prop_assert!(offset <= tuning.spawn_offset_max + 1e-3);
            prop_assert!(o.size.x > 0.0 && o.size.y > 0.0);
            match o.kind {
                ObstacleKind::Ground(v) => {
                    prop_assert!(v >= 1 && u32::from(v) <= tuning.ground_variants);
                    let (w, h) = tuning.ground_hitboxes[v as usize - 1];
                    prop_assert_eq!((o.size.x, o.size.y), (w, h));
                }
                ObstacleKind::Flying(v) => {
                    prop_assert!(v >= 1 && u32::from(v) <= tuning.flying_variants);
                    prop_assert_eq!((o.size.x, o.size.y), tuning.flying_hitbox);
                }
            }
        }
    }
}

#[test]
fn score_counts_whole_intervals() {
    let mut session = start_running(11, Tuning::default());
    for _ in 0..95 {
        tick(&mut session, &TickInput::default(), 10.0);
    }
    assert_eq!(session.phase(), GamePhase::Running);
    assert_eq!(session.score(), 9);
}

#[test]
fn three_milestones_raise_speed() {
    // Spawning pushed far out so the idle runner survives long enough
    let tuning = Tuning {
        spawn_interval_ms: 1.0e9,
        ..Default::default()
    };
    let mut session = start_running(12, tuning);
    let mut milestones = Vec::new();

    for _ in 0..300 {
        tick(&mut session, &TickInput::default(), 100.0);
        for event in session.drain_events() {
            if let GameEvent::Milestone { score, .. } = event {
                milestones.push(score);
            }
        }
    }

    assert_eq!(session.score(), 300);
    assert_eq!(milestones, vec![100, 200, 300]);
    assert!((session.speed_modifier() - 1.225).abs() < 1e-5);
}

#[test]
fn collision_then_restart() {
    let mut session = start_running(13, Tuning::default());
    let mut game_overs = 0;
    let mut score_at_death = 0;

    for _ in 0..3000 {
        tick(&mut session, &TickInput::default(), FRAME_MS);
        for event in session.drain_events() {
            if let GameEvent::GameOver { score, .. } = event {
                game_overs += 1;
                score_at_death = score;
            }
        }
        if session.phase() == GamePhase::GameOver {
            break;
        }
    }
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(game_overs, 1);
    assert_eq!(session.high_score(), score_at_death);
    assert_eq!(session.score(), 0);
    assert_eq!(session.speed_modifier(), 1.0);
    assert!(!session.obstacles().is_empty());

    // Sitting in game over changes nothing
    for _ in 0..60 {
        tick(&mut session, &TickInput::default(), FRAME_MS);
    }
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert!(session.drain_events().is_empty());

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    tick(&mut session, &restart, FRAME_MS);
    assert_eq!(session.phase(), GamePhase::Running);
    assert!(session.obstacles().is_empty());
    assert_eq!(session.high_score(), score_at_death);
    assert_eq!(session.player().player().vel.x, 0.0);
    assert_eq!(session.player().player().vel.y, 0.0);
    assert!(session.player().is_alive());
}

#[test]
fn snapshot_reports_game_over_overlay() {
    let mut session = start_running(14, Tuning::default());
    while session.phase() == GamePhase::Running {
        tick(&mut session, &TickInput::default(), FRAME_MS);
    }
    let snap = session.snapshot();
    assert!(snap.hud.game_over);
    assert!(snap.hud.high_score);
    assert_eq!(snap.score_text, "00000");
    assert_eq!(snap.high_score_text, format!("HI {:0>5}", session.high_score()));
}
