//! Tower Stack headless runner
//!
//! Plays one run with the idle autopilot at a fixed timestep and prints every
//! event as a JSON line.
//!
//! Usage: `tower-stack [SEED] [TUNING.json]`

use anyhow::{Context, Result};

use tower_stack::Tuning;
use tower_stack::consts::SIM_DT;
use tower_stack::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// One simulated hour is plenty for a single run
const MAX_TICKS: u64 = 60 * 60 * 120;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed `{s}`"))?,
        None => 1,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).with_context(|| format!("loading tuning from {path}"))?,
        None => Tuning::default(),
    };

    log::info!("Tower Stack (native) starting with seed {}", seed);

    let mut state = GameState::new(seed, tuning)?;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut ticks = 0;
    while ticks < MAX_TICKS {
        tick(&mut state, &input, SIM_DT);
        ticks += 1;

        for event in state.drain_events() {
            println!("{}", serde_json::to_string(&event)?);
            if let GameEvent::GameOver { final_score } = event {
                log::info!(
                    "Run over after {:.1}s, score {}",
                    ticks as f32 * SIM_DT,
                    final_score
                );
            }
        }

        if state.phase() == GamePhase::Ended {
            break;
        }
    }

    if state.phase() != GamePhase::Ended {
        log::warn!("Tick cap reached with the run still live");
    }
    println!("final score: {}", state.score());
    Ok(())
}
