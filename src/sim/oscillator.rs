//! Back-and-forth motion of the active block
//!
//! Linear motion with hard bounces at `origin ± move_range`. Deterministic in
//! `dt`, so the same frame deltas replay the same trajectory.

use super::state::Block;
use crate::tuning::Tuning;

/// Oscillation speed for a stack level, capped
pub fn speed_for_index(index: u32, tuning: &Tuning) -> f32 {
    (tuning.base_speed + index as f32 * tuning.speed_increment).min(tuning.speed_cap)
}

/// Move `block` along its own axis by `direction * dt`, bouncing at the window edges
///
/// A step that overshoots a bound stops on the bound and reverses; the
/// leftover distance is dropped rather than reflected. The orthogonal
/// coordinate and `y` are never touched.
pub fn advance(block: &mut Block, dt: f32, move_range: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    let axis = block.axis;
    let lo = block.origin - move_range;
    let hi = block.origin + move_range;
    let next = block.coord(axis) + block.direction * dt;

    if next >= hi && block.direction > 0.0 {
        block.set_coord(axis, hi);
        block.direction = -block.direction;
    } else if next <= lo && block.direction < 0.0 {
        block.set_coord(axis, lo);
        block.direction = -block.direction;
    } else {
        block.set_coord(axis, next.clamp(lo, hi));
    }
}
