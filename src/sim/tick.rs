//! Per-frame simulation tick
//!
//! The state machine evaluates trigger overlap, collisions and restart edges
//! itself every frame, so each transition is a function of the current
//! session and that frame's input.

use super::collision::{CollisionResult, first_collision};
use super::input::{InputEdges, TickInput};
use super::state::{GameEvent, GamePhase, GameSession, TriggerPlacement};
use crate::consts::*;

/// Advance the session by one rendered frame of `dt_ms` milliseconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt_ms: f32) {
    let edges = session.input.resolve(input);
    session.time_ticks += 1;

    match session.phase {
        GamePhase::AwaitingStart => tick_awaiting_start(session, &edges, dt_ms),
        GamePhase::IntroRollout => tick_rollout(session, dt_ms),
        GamePhase::Running => tick_running(session, &edges, dt_ms),
        GamePhase::GameOver => {
            if edges.restart_pressed {
                restart(session);
            }
        }
    }
}

fn tick_awaiting_start(session: &mut GameSession, edges: &InputEdges, dt_ms: f32) {
    if session.player.tick(edges, dt_ms) {
        session.events.push(GameEvent::Jumped);
    }

    let floor_y = session.tuning.floor_y();
    if !session
        .player
        .hitbox()
        .overlaps(&session.trigger.hitbox(floor_y))
    {
        return;
    }

    match session.trigger.placement {
        TriggerPlacement::Initial => {
            // First touch only arms the trigger
            session.trigger.placement = TriggerPlacement::Armed;
            session.events.push(GameEvent::TriggerArmed);
            log::info!("Start trigger armed");
        }
        TriggerPlacement::Armed => {
            session.trigger.placement = TriggerPlacement::Disarmed;
            session.rollout_ms = Some(0.0);
            session.phase = GamePhase::IntroRollout;
            session.events.push(GameEvent::RolloutStarted);
            log::info!("Intro rollout started");
        }
        TriggerPlacement::Disarmed => {}
    }
}

fn tick_rollout(session: &mut GameSession, dt_ms: f32) {
    // Input is ignored during the intro, physics still runs
    session.player.tick(&InputEdges::default(), dt_ms);

    let Some(mut acc) = session.rollout_ms else {
        return;
    };
    acc += dt_ms;

    while acc >= ROLLOUT_STEP_MS {
        acc -= ROLLOUT_STEP_MS;
        session.player.force_run_pose();
        session.player.set_velocity_x(ROLLOUT_PLAYER_SPEED);

        if session.world.extend_ground(ROLLOUT_GROUND_GROWTH) {
            finish_rollout(session);
            return;
        }
    }

    session.rollout_ms = Some(acc);
}

fn finish_rollout(session: &mut GameSession) {
    session.rollout_ms = None;
    session.player.set_velocity_x(0.0);
    session.player.anchor_home();
    session.player.set_running(true);
    session.world.reveal_decor();
    session.score_hud_visible = true;
    session.phase = GamePhase::Running;
    session.events.push(GameEvent::RunStarted);
    log::info!(
        "Run started (player home x={:.1})",
        session.player.home().x
    );
}

fn tick_running(session: &mut GameSession, edges: &InputEdges, dt_ms: f32) {
    session
        .score
        .advance(dt_ms, &mut session.world, &mut session.events);
    session.spawner.advance(dt_ms, &mut session.rng);

    let shift = session.world.scroll_speed();
    session.spawner.scroll(shift, dt_ms);
    session.world.advance();

    if session.player.tick(edges, dt_ms) {
        session.events.push(GameEvent::Jumped);
    }

    if let Some(hit) = first_collision(&session.player.hitbox(), session.spawner.obstacles()) {
        end_run(session, hit);
    }
}

fn end_run(session: &mut GameSession, hit: CollisionResult) {
    let final_score = session.score.score();

    session.player.on_collision();
    session.spawner.reset_timer();
    let high_score = session.score.commit_and_reset(&mut session.world);
    session.phase = GamePhase::GameOver;

    session.events.push(GameEvent::GameOver {
        score: final_score,
        high_score,
        obstacle_id: hit.obstacle_id,
    });
    log::info!(
        "Game over: score {} (high {}), hit obstacle #{} overlap {:.1}",
        final_score,
        high_score,
        hit.obstacle_id,
        hit.overlap_area
    );
}

fn restart(session: &mut GameSession) {
    session.spawner.clear();
    session.player.reset();
    session.phase = GamePhase::Running;
    session.events.push(GameEvent::Restarted);
    log::info!("Restarted (high score {})", session.score.high_score());
}
