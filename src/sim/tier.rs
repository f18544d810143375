//! Cosmetic tier buckets by stack index
//!
//! Tiers only tag snapshots for the renderer; gameplay never reads them.

/// Number of tiers
pub const TIER_COUNT: u8 = 5;

/// Inclusive upper index of tiers 0..=3; everything above is the last tier
pub const TIER_UPPER_BOUNDS: [u32; 4] = [15, 30, 45, 65];

/// Tier of a block, `None` for the base
pub fn tier_of(index: u32) -> Option<u8> {
    if index == 0 {
        return None;
    }
    let tier = TIER_UPPER_BOUNDS
        .iter()
        .position(|&upper| index <= upper)
        .unwrap_or(TIER_UPPER_BOUNDS.len());
    Some(tier as u8)
}
