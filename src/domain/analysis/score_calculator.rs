//! Score Calculator - weighted arithmetic mean scoring for one option.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{Criterion, DecisionOption};
use crate::domain::foundation::{Score, Weight};

use super::normalizer::{Normalizer, SCALE_MAX};

/// How scores the author never entered are resolved.
///
/// This is the only place a default score is decided; every component that
/// needs a score for a missing (option, criterion) pair goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub missing_score: Score,
}

impl ScoringPolicy {
    /// Missing scores count as the neutral midpoint (5).
    pub const fn neutral() -> Self {
        Self {
            missing_score: Score::NEUTRAL,
        }
    }

    /// Missing scores count as 0.
    pub const fn strict() -> Self {
        Self {
            missing_score: Score::MIN,
        }
    }

    /// Returns the option's score on a criterion, or the policy default.
    pub fn resolve(&self, option: &DecisionOption, criterion_id: &str) -> Score {
        option.score_for(criterion_id).unwrap_or(self.missing_score)
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::neutral()
    }
}

/// One criterion's contribution to an option's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion_id: String,
    pub criterion_name: String,
    pub weight: Weight,
    /// Resolved score on the 0-10 input scale.
    pub score: Score,
    /// Score after normalization.
    pub normalized: f64,
    /// `weight * normalized`.
    pub weighted: f64,
}

/// Weighted score of one option against a criteria set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCalculation {
    /// Sum of weighted normalized scores.
    pub raw: f64,
    /// Sum of `weight * 10`.
    pub max: f64,
    /// `raw / max * 10`, or 0 when there is nothing to weigh.
    pub normalized: f64,
    pub criteria_scores: Vec<CriterionScore>,
}

/// Weighted-sum scorer.
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Computes the weighted total, maximum and normalized score.
    ///
    /// # Algorithm
    /// For each criterion: `raw += weight * normalize(score)`,
    /// `max += weight * 10`.
    ///
    /// # Edge Cases
    /// - No criteria: raw = max = normalized = 0
    /// - Missing score: resolved through `policy`
    pub fn calculate_score(
        option: &DecisionOption,
        criteria: &[Criterion],
        policy: &ScoringPolicy,
    ) -> ScoreCalculation {
        let mut raw = 0.0;
        let mut max = 0.0;
        let mut criteria_scores = Vec::with_capacity(criteria.len());

        for criterion in criteria {
            let score = policy.resolve(option, &criterion.id);
            let normalized = Normalizer::normalize(score.as_f64());
            let weight = criterion.weight.as_f64();

            raw += weight * normalized;
            max += weight * SCALE_MAX;

            criteria_scores.push(CriterionScore {
                criterion_id: criterion.id.clone(),
                criterion_name: criterion.name.clone(),
                weight: criterion.weight,
                score,
                normalized,
                weighted: weight * normalized,
            });
        }

        let normalized = if max > 0.0 { raw / max * SCALE_MAX } else { 0.0 };

        ScoreCalculation {
            raw,
            max,
            normalized,
            criteria_scores,
        }
    }
}
