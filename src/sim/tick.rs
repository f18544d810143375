//! Phase transitions and the per-frame step
//!
//! Ready -> Playing -> Ended -> Resetting -> Ready. Actions that are not
//! legal in the current phase are ignored, never errors.

use super::oscillator;
use super::placement::{self, PlacementResult};
use super::state::{BlockSnapshot, GameEvent, GamePhase, GameState};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Contextual press (pointer/Space): start, place or restart
    pub action: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Begin a run from `Ready`, spawning block 1
///
/// Returns `false` if ignored.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Ready {
        log::debug!("start ignored in {:?}", state.phase);
        return false;
    }

    state.spawn_active();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::RunStarted);
    log::info!("Run started (seed {})", state.rng_state.seed);
    true
}

/// Freeze the active block and resolve it against the block below
///
/// Returns `None` when the request is dropped: wrong phase, no active block,
/// or still inside the post-spawn debounce window.
pub fn place(state: &mut GameState) -> Option<PlacementResult> {
    if state.phase != GamePhase::Playing {
        log::debug!("place ignored in {:?}", state.phase);
        return None;
    }
    if state.since_spawn < state.tuning.debounce_secs {
        log::debug!("place debounced ({:.3}s since spawn)", state.since_spawn);
        return None;
    }

    let len = state.stack.len();
    if len < 2 || !state.stack[len - 1].active {
        log::debug!("place ignored, no active block");
        return None;
    }

    let result = placement::place(
        &state.stack[len - 2],
        &state.stack[len - 1],
        state.tuning.snap_threshold,
    );

    match result {
        PlacementResult::Missed => {
            let mut block = state.stack.pop()?;
            block.active = false;
            block.missed = true;
            log::info!(
                "Block {} missed, game over with score {}",
                block.index,
                state.score.score()
            );
            state.dropped = Some(block);
            state.phase = GamePhase::Ended;
            state.events.push(GameEvent::GameOver {
                final_score: state.score.score(),
            });
        }
        PlacementResult::Snapped { placed } | PlacementResult::Chopped { placed, .. } => {
            let block = &mut state.stack[len - 1];
            block.active = false;
            block.apply_footprint(&placed);

            let snapshot = block.snapshot();
            let overhang = match result {
                PlacementResult::Chopped { overhang, .. } => Some(BlockSnapshot::new(
                    block.index,
                    block.axis,
                    block.pos.y,
                    block.size.y,
                    &overhang,
                )),
                _ => None,
            };
            let perfect = overhang.is_none();

            let score = state.score.record_placement();
            log::debug!(
                "Block {} placed ({}), score {}",
                snapshot.index,
                if perfect { "snap" } else { "chop" },
                score
            );
            state.events.push(GameEvent::BlockPlaced {
                score,
                block: snapshot,
                overhang,
                perfect,
            });
            state.spawn_active();
        }
    }

    Some(result)
}

/// Begin tearing down an ended run
///
/// Ignored outside `Ended`, including a second restart while `Resetting`.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Ended {
        log::debug!("restart ignored in {:?}", state.phase);
        return false;
    }

    state.phase = GamePhase::Resetting;
    state.reset_timer = state.tuning.reset_secs;
    true
}

/// Advance clocks and the active block by `dt` seconds
pub fn advance(state: &mut GameState, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    match state.phase {
        GamePhase::Playing => {
            state.since_spawn += dt;
            let range = state.tuning.move_range;
            if let Some(block) = state.stack.last_mut().filter(|b| b.active) {
                oscillator::advance(block, dt, range);
            }
        }
        GamePhase::Resetting => {
            state.reset_timer -= dt;
            if state.reset_timer <= 0.0 {
                finish_reset(state);
            }
        }
        GamePhase::Ready | GamePhase::Ended => {}
    }
}

fn finish_reset(state: &mut GameState) {
    state.stack.truncate(1);
    state.dropped = None;
    state.score.reset();
    state.since_spawn = 0.0;
    state.reset_timer = 0.0;
    state.phase = GamePhase::Ready;
    state.events.push(GameEvent::GameReset);
    log::info!("Game reset");
}

/// Apply the contextual press for the current phase
pub fn press(state: &mut GameState) {
    match state.phase {
        GamePhase::Ready => {
            start(state);
        }
        GamePhase::Playing => {
            place(state);
        }
        GamePhase::Ended => {
            restart(state);
        }
        GamePhase::Resetting => {
            log::debug!("press ignored while resetting");
        }
    }
}

/// Signed distance of the active block from the autopilot's target
fn idle_offset(state: &GameState) -> Option<f32> {
    let block = state.active_block()?;
    Some(block.coord(block.axis) - (block.origin + state.idle_aim))
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let before = idle_offset(state);

    advance(state, dt);

    let mut action = input.action;
    if input.idle_mode {
        action |= match state.phase {
            GamePhase::Ready | GamePhase::Ended => true,
            // Press on the frame the block crosses its target
            GamePhase::Playing => match (before, idle_offset(state)) {
                (Some(a), Some(b)) => a == 0.0 || b == 0.0 || a.signum() != b.signum(),
                _ => false,
            },
            GamePhase::Resetting => false,
        };
    }

    if action {
        press(state);
    }
}
