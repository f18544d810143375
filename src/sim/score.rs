//! Score keeping

use serde::{Deserialize, Serialize};

/// Counts blocks kept on the tower (base and missed blocks excluded)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    placed: u32,
}

impl ScoreTracker {
    pub fn score(&self) -> u32 {
        self.placed
    }

    /// Count one chopped or snapped block, returns the new score
    pub fn record_placement(&mut self) -> u32 {
        self.placed = self.placed.saturating_add(1);
        self.placed
    }

    pub fn reset(&mut self) {
        self.placed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_resets() {
        let mut score = ScoreTracker::default();
        assert_eq!(score.score(), 0);
        assert_eq!(score.record_placement(), 1);
        assert_eq!(score.record_placement(), 2);
        assert_eq!(score.score(), 2);
        score.reset();
        assert_eq!(score.score(), 0);
    }
}
