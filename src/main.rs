//! Rex Runner headless entry point
//!
//! Drives a seeded session with a simple autopilot at a fixed 60 Hz frame
//! rate, logs the run and prints the final snapshot as JSON.
//!
//! Usage: `rex-runner [SEED] [--tuning FILE]`

use std::path::PathBuf;

use clap::Parser;
use rex_runner::sim::{Altitude, GameEvent, GamePhase, GameSession, Snapshot, TickInput, tick};
use rex_runner::{Tuning, TuningError};

#[derive(Parser, Debug)]
#[command(name = "rex-runner")]
#[command(about = "Play a seeded Rex Runner session headlessly and print the final snapshot")]
struct Cli {
    /// Spawn RNG seed
    #[arg(default_value_t = 2024)]
    seed: u64,
    /// JSON file overriding the default tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
}

const FRAME_MS: f32 = 1000.0 / 60.0;
/// Ten minutes of play
const MAX_FRAMES: u32 = 60 * 60 * 10;
const LIVES: u32 = 3;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let seed = cli.seed;
    let tuning = match load_tuning(cli.tuning) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut session = match GameSession::new(tuning, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Rex Runner (headless) starting with seed {}", seed);
    let mut input = TickInput::default();
    let mut deaths = 0;

    for frame in 0..MAX_FRAMES {
        let snapshot = session.snapshot();
        input = autopilot(&snapshot, &input, deaths < LIVES);
        tick(&mut session, &input, FRAME_MS);

        for event in session.drain_events() {
            match event {
                GameEvent::Milestone { score, speed_modifier } => {
                    log::info!("[{}] milestone {} (speed x{:.3})", frame, score, speed_modifier)
                }
                GameEvent::GameOver {
                    score, high_score, ..
                } => {
                    deaths += 1;
                    log::info!(
                        "[{}] life {} over: score {} / high {}",
                        frame,
                        deaths,
                        score,
                        high_score
                    );
                }
                other => log::debug!("[{}] {:?}", frame, other),
            }
        }

        if deaths >= LIVES && session.phase() == GamePhase::GameOver {
            break;
        }
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}

fn load_tuning(path: Option<PathBuf>) -> Result<Tuning, TuningError> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let tuning = Tuning::from_file(&path)?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

/// Jump over ground obstacles and low birds, duck under high birds.
/// Buttons are released between presses so every jump is a fresh edge.
fn autopilot(snapshot: &Snapshot, previous: &TickInput, restart: bool) -> TickInput {
    let player = &snapshot.player;

    match snapshot.phase {
        GamePhase::AwaitingStart => TickInput {
            jump: player.grounded && !previous.jump,
            ..Default::default()
        },
        GamePhase::IntroRollout => TickInput::default(),
        GamePhase::GameOver => TickInput {
            restart: restart && !previous.restart,
            ..Default::default()
        },
        GamePhase::Running => {
            let reach = 70.0 + 40.0 * snapshot.speed_modifier;
            let threat = snapshot
                .obstacles
                .iter()
                .filter(|o| o.hitbox.right() > player.hitbox.left())
                .min_by(|a, b| a.hitbox.left().total_cmp(&b.hitbox.left()));

            let Some(threat) = threat else {
                return TickInput::default();
            };
            let gap = threat.hitbox.left() - player.hitbox.right();

            if threat.altitude == Altitude::HighFly {
                TickInput {
                    duck: gap < reach * 1.5,
                    ..Default::default()
                }
            } else {
                TickInput {
                    jump: gap < reach && player.grounded && !previous.jump,
                    ..Default::default()
                }
            }
        }
    }
}
