//! Tower Stack - the mechanical core of a stack-the-falling-block arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (oscillation, placement, game phases)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and HUD live outside this crate. They consume
//! [`sim::GameEvent`]s and [`sim::BlockSnapshot`]s and feed back frame
//! deltas and player actions.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Base block footprint
    pub const BASE_WIDTH: f32 = 10.0;
    pub const BASE_DEPTH: f32 = 10.0;
    /// Height of every layer (base included)
    pub const BLOCK_HEIGHT: f32 = 2.0;

    /// Half-range of the travel window, measured from the block below
    pub const MOVE_RANGE: f32 = 12.0;
    /// Oscillation speed of block 1 (units/s)
    pub const BASE_SPEED: f32 = 8.0;
    /// Extra speed per stack level
    pub const SPEED_INCREMENT: f32 = 0.25;
    /// Hard speed cap so high towers stay playable
    pub const SPEED_CAP: f32 = 20.0;

    /// Overhang below this counts as a perfect drop
    pub const SNAP_THRESHOLD: f32 = 0.5;
    /// Placement requests are dropped this long after a spawn
    pub const DEBOUNCE_SECS: f32 = 0.35;
    /// Teardown time between restart and Ready
    pub const RESET_SECS: f32 = 0.4;

    /// Widest aim offset the idle autopilot will pick
    pub const IDLE_AIM_ERROR: f32 = 1.5;
}
