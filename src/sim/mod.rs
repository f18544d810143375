//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit `dt` only, no wall clock
//! - Seeded RNG only (idle autopilot)
//! - No rendering, audio or platform dependencies

pub mod oscillator;
pub mod placement;
pub mod score;
pub mod state;
pub mod tick;
pub mod tier;

pub use oscillator::speed_for_index;
pub use placement::{Footprint, PlacementResult, overlap};
pub use score::ScoreTracker;
pub use state::{Axis, Block, BlockSnapshot, GameEvent, GamePhase, GameState, RngState};
pub use tick::{TickInput, advance, place, press, restart, start, tick};
pub use tier::{TIER_COUNT, tier_of};
