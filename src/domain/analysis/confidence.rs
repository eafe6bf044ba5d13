//! Confidence Estimator - classifies the lead of the top-ranked option.

use serde::{Deserialize, Serialize};

use super::RankedOption;

/// Margins below this are a toss-up.
pub const LOW_MARGIN: f64 = 0.03;

/// Margins below this give the winner only a slight edge.
pub const SLIGHT_MARGIN: f64 = 0.08;

/// Margins at or above this are a clear lead.
pub const CLEAR_MARGIN: f64 = 0.15;

/// Qualitative confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// How certain the recommendation is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    pub level: ConfidenceLevel,
    /// 0.0 to 1.0.
    pub value: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Confidence {
    fn tier(level: ConfidenceLevel, value: f64, label: &str, message: Option<&str>) -> Self {
        Self {
            level,
            value,
            label: label.to_string(),
            message: message.map(str::to_string),
        }
    }
}

/// Margin-based confidence classification.
pub struct ConfidenceEstimator;

impl ConfidenceEstimator {
    /// Classifies `(top.total - second.total) / top.max_possible`.
    ///
    /// Upper bounds are exclusive: a margin of exactly 0.08 is in the 0.75 tier.
    ///
    /// # Edge Cases
    /// - Fewer than 2 rankings: high, 1.0 (nothing to compare against)
    /// - `max_possible == 0`: low, 0.5
    pub fn calculate_confidence(rankings: &[RankedOption]) -> Confidence {
        let (top, second) = match rankings {
            [top, second, ..] => (top, second),
            _ => {
                return Confidence::tier(ConfidenceLevel::High, 1.0, "Only option", None);
            }
        };

        if top.max_possible == 0.0 {
            return Confidence::tier(
                ConfidenceLevel::Low,
                0.5,
                "Undetermined",
                Some("There is nothing to weigh yet. Add criteria weights and scores."),
            );
        }

        let margin = (top.total_score - second.total_score) / top.max_possible;
        Self::classify_margin(margin)
    }

    /// Maps a margin onto its confidence tier.
    pub fn classify_margin(margin: f64) -> Confidence {
        if margin < LOW_MARGIN {
            Confidence::tier(
                ConfidenceLevel::Low,
                0.4,
                "Toss-up",
                Some(
                    "The top options are nearly tied. \
                     Small changes to scores or weights could flip the result.",
                ),
            )
        } else if margin < SLIGHT_MARGIN {
            Confidence::tier(
                ConfidenceLevel::Medium,
                0.6,
                "Slight edge",
                Some(
                    "The leader is only slightly ahead. \
                     Double-check the scores of the top two options.",
                ),
            )
        } else if margin < CLEAR_MARGIN {
            Confidence::tier(
                ConfidenceLevel::Medium,
                0.75,
                "Fairly confident",
                Some("The leader is ahead by a reasonable margin."),
            )
        } else {
            Confidence::tier(
                ConfidenceLevel::High,
                0.9,
                "Confident",
                Some("The leader is clearly ahead on the weighted criteria."),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{RankingEngine, ScenarioContext};
    use crate::domain::decision::{Criterion, DecisionOption};

    /// Two options whose totals differ by `w` points out of 100.
    ///
    /// Criterion "x" (weight `w`) separates them by one point; criterion "y"
    /// fills the rest of the weight so max_possible is 100.
    fn margin_of(w: u8) -> Vec<RankedOption> {
        let criteria = vec![Criterion::new("x", "X", w), Criterion::new("y", "Y", 10 - w)];
        let options = vec![
            DecisionOption::new("a", "A").with_score("x", 9).with_score("y", 5),
            DecisionOption::new("b", "B").with_score("x", 8).with_score("y", 5),
        ];
        RankingEngine::rank(&options, &criteria, &ScenarioContext::unconstrained())
    }

    #[test]
    fn fewer_than_two_is_vacuously_high() {
        let one = RankingEngine::rank(
            &[DecisionOption::new("a", "A").with_score("x", 2)],
            &[Criterion::new("x", "X", 3)],
            &ScenarioContext::unconstrained(),
        );

        let empty: Vec<RankedOption> = Vec::new();

        for rankings in [&one, &empty] {
            let confidence = ConfidenceEstimator::calculate_confidence(rankings);
            assert_eq!(confidence.level, ConfidenceLevel::High);
            assert_eq!(confidence.value, 1.0);
            assert!(confidence.message.is_none());
        }
    }

    #[test]
    fn zero_max_possible_is_low_half() {
        let mut rankings = margin_of(5);
        for ranked in &mut rankings {
            ranked.max_possible = 0.0;
        }
        let confidence = ConfidenceEstimator::calculate_confidence(&rankings);
        assert_eq!(confidence.level, ConfidenceLevel::Low);
        assert_eq!(confidence.value, 0.5);
    }

    #[test]
    fn margin_below_three_percent_is_low() {
        // 2 / 100
        let confidence = ConfidenceEstimator::calculate_confidence(&margin_of(2));
        assert_eq!(confidence.level, ConfidenceLevel::Low);
        assert_eq!(confidence.value, 0.4);
    }

    #[test]
    fn margin_exactly_three_percent_is_medium() {
        let confidence = ConfidenceEstimator::calculate_confidence(&margin_of(3));
        assert_eq!(confidence.level, ConfidenceLevel::Medium);
        assert_eq!(confidence.value, 0.6);
    }

    #[test]
    fn margin_exactly_eight_percent_is_upper_medium() {
        let confidence = ConfidenceEstimator::calculate_confidence(&margin_of(8));
        assert_eq!(confidence.level, ConfidenceLevel::Medium);
        assert_eq!(confidence.value, 0.75);
    }

    #[test]
    fn margin_boundaries_are_exclusive() {
        assert_eq!(ConfidenceEstimator::classify_margin(0.0299).value, 0.4);
        assert_eq!(ConfidenceEstimator::classify_margin(0.03).value, 0.6);
        assert_eq!(ConfidenceEstimator::classify_margin(0.0799).value, 0.6);
        assert_eq!(ConfidenceEstimator::classify_margin(0.08).value, 0.75);
        assert_eq!(ConfidenceEstimator::classify_margin(0.1499).value, 0.75);
        assert_eq!(ConfidenceEstimator::classify_margin(0.15).value, 0.9);
        assert_eq!(ConfidenceEstimator::classify_margin(0.15).level, ConfidenceLevel::High);
    }

    #[test]
    fn every_compared_tier_has_a_message() {
        for margin in [0.0, 0.05, 0.1, 0.5] {
            assert!(ConfidenceEstimator::classify_margin(margin).message.is_some());
        }
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ConfidenceLevel::Medium).unwrap(), "\"medium\"");
    }
}
