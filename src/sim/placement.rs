//! Overlap resolution between the active block and the block beneath it
//!
//! Pure: takes two blocks, returns what is kept and what falls off. The
//! caller decides how to apply it.

use serde::{Deserialize, Serialize};

use super::state::{Axis, Block};

/// Horizontal rectangle, centered at (`x`, `z`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
}

impl Footprint {
    pub fn coord(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Z => self.depth,
        }
    }

    /// Copy with the center and extent along `axis` replaced
    pub fn with_axis(mut self, axis: Axis, coord: f32, extent: f32) -> Self {
        match axis {
            Axis::X => {
                self.x = coord;
                self.width = extent;
            }
            Axis::Z => {
                self.z = coord;
                self.depth = extent;
            }
        }
        self
    }
}

/// Outcome of a drop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlacementResult {
    /// Near-perfect drop, forced onto the block below
    Snapped { placed: Footprint },
    /// Kept portion plus the overhang that falls off
    Chopped { placed: Footprint, overhang: Footprint },
    /// Footprints don't touch; the run is over
    Missed,
}

impl PlacementResult {
    pub fn is_miss(&self) -> bool {
        matches!(self, PlacementResult::Missed)
    }

    /// Footprint that stays on the tower
    pub fn placed(&self) -> Option<&Footprint> {
        match self {
            PlacementResult::Snapped { placed } | PlacementResult::Chopped { placed, .. } => {
                Some(placed)
            }
            PlacementResult::Missed => None,
        }
    }
}

/// Signed overlap length of `curr` over `prev` along `axis`
#[inline]
pub fn overlap(prev: &Block, curr: &Block, axis: Axis) -> f32 {
    prev.dimension(axis) - (curr.coord(axis) - prev.coord(axis)).abs()
}

/// Resolve dropping `curr` onto `prev` along `curr.axis`
///
/// Degenerate input (non-finite coordinates, zero or negative extents) is a
/// miss, never a placement.
pub fn place(prev: &Block, curr: &Block, snap_threshold: f32) -> PlacementResult {
    let axis = curr.axis;
    let prev_extent = prev.dimension(axis);
    let curr_extent = curr.dimension(axis);

    let valid = |extent: f32| extent.is_finite() && extent > 0.0;
    if !valid(prev_extent) || !valid(curr_extent) {
        log::warn!(
            "Degenerate extents for block {} (prev {}, curr {}), treating as miss",
            curr.index,
            prev_extent,
            curr_extent
        );
        return PlacementResult::Missed;
    }

    let prev_coord = prev.coord(axis);
    let curr_coord = curr.coord(axis);
    let overlap = overlap(prev, curr, axis);

    // Also catches NaN
    if !(overlap > 0.0) {
        return PlacementResult::Missed;
    }

    let base = curr.footprint();

    if curr_extent - overlap < snap_threshold {
        let placed = base.with_axis(axis, prev_coord, prev_extent);
        return PlacementResult::Snapped { placed };
    }

    let overhang_extent = curr_extent - overlap;
    let placed_coord = (prev_coord + curr_coord) / 2.0;
    // Overhang sits on the far side from `prev`
    let side = if curr_coord >= prev_coord { 1.0 } else { -1.0 };
    let overhang_coord = placed_coord + side * (overlap + overhang_extent) / 2.0;

    PlacementResult::Chopped {
        placed: base.with_axis(axis, placed_coord, overlap),
        overhang: base.with_axis(axis, overhang_coord, overhang_extent),
    }
}
