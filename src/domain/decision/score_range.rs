//! Score ranges - per-option, per-criterion uncertainty bands.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::Score;

/// Plausible spread of a single score, used by Monte Carlo trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    /// Creates a range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the inclusive integer bounds of this range.
    ///
    /// Bounds are rounded and clamped to the 0-10 scale; reversed bounds are
    /// swapped so the result is always ordered.
    pub fn bounds(&self) -> (Score, Score) {
        let low = Score::from_rounded(self.min);
        let high = Score::from_rounded(self.max);
        if low <= high {
            (low, high)
        } else {
            (high, low)
        }
    }
}

/// Score ranges keyed by option id, then criterion id.
pub type ScoreRanges = HashMap<String, HashMap<String, ScoreRange>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_round_to_whole_scores() {
        let (low, high) = ScoreRange::new(3.4, 7.6).bounds();
        assert_eq!((low.value(), high.value()), (3, 8));
    }

    #[test]
    fn bounds_swap_reversed_range() {
        let (low, high) = ScoreRange::new(9.0, 2.0).bounds();
        assert_eq!((low.value(), high.value()), (2, 9));
    }

    #[test]
    fn bounds_clamp_to_scale() {
        let (low, high) = ScoreRange::new(-5.0, 40.0).bounds();
        assert_eq!((low, high), (Score::MIN, Score::MAX));
    }
}
