//! Sensitivity Analyzer - how far each weight can move before the winner changes.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{reweighted, Criterion, DecisionOption};
use crate::domain::foundation::{Percentage, Score, Weight};

use super::{OptionRef, RankedOption, RankingEngine, ScenarioContext};

/// A tipping point within this many weight steps marks a criterion sensitive.
pub const SENSITIVITY_WINDOW: u8 = 3;

/// Robustness points lost per sensitive criterion.
pub const SENSITIVE_CRITERION_COST: u32 = 20;

/// Robustness points lost when the runner-up is very close.
pub const CLOSE_RACE_COST: u32 = 20;

/// Normalized-score gap under which the race counts as close.
pub const CLOSE_RACE_GAP: f64 = 0.5;

/// Minimum robustness for a result to count as robust.
pub const ROBUST_THRESHOLD: u8 = 60;

/// Which way a weight has to move to reach the tipping point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// Tipping-point search result for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TippingPoint {
    pub criterion_id: String,
    pub criterion_name: String,
    pub current_weight: Weight,
    pub winner_score: Score,
    pub runner_up_score: Score,
    /// `winner_score - runner_up_score`.
    pub score_diff: i16,
    /// Closest weight at which a different option ranks first.
    pub tipping_weight: Option<Weight>,
    pub direction: Direction,
    pub is_sensitive: bool,
}

/// Robustness of the current winner against single-weight changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub winner: OptionRef,
    pub runner_up: OptionRef,
    /// Difference in normalized (0-10) score.
    pub gap_to_runner_up: f64,
    pub robustness: Percentage,
    pub tipping_points: Vec<TippingPoint>,
    pub is_robust: bool,
}

impl SensitivityResult {
    /// Criteria whose tipping point lies within the sensitivity window.
    pub fn sensitive_criteria(&self) -> Vec<&TippingPoint> {
        self.tipping_points.iter().filter(|t| t.is_sensitive).collect()
    }
}

/// Per-criterion tipping-point scans.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// Analyzes sensitivity using unconstrained re-rankings with the default
    /// scoring policy.
    pub fn analyze(
        rankings: &[RankedOption],
        criteria: &[Criterion],
        options: &[DecisionOption],
    ) -> Option<SensitivityResult> {
        Self::analyze_with(rankings, criteria, options, &ScenarioContext::unconstrained())
    }

    /// Analyzes sensitivity, re-ranking under `context`.
    ///
    /// # Algorithm
    /// For each criterion, compare winner and runner-up scores. If the winner
    /// is ahead there, scan weights from `current - 1` down to 1; if behind,
    /// from `current + 1` up to 10. The first weight at which another option
    /// ranks first is the tipping point. Equal scores have no tipping point.
    ///
    /// `robustness = 100 - 20 * sensitive criteria - (20 if gap < 0.5)`,
    /// floored at 0.
    ///
    /// # Edge Cases
    /// - Fewer than 2 ranked options: None
    pub fn analyze_with(
        rankings: &[RankedOption],
        criteria: &[Criterion],
        options: &[DecisionOption],
        context: &ScenarioContext<'_>,
    ) -> Option<SensitivityResult> {
        let (winner, runner_up) = match rankings {
            [winner, runner_up, ..] => (winner, runner_up),
            _ => return None,
        };

        let tipping_points: Vec<TippingPoint> = criteria
            .iter()
            .map(|criterion| {
                Self::scan_criterion(winner, runner_up, criterion, criteria, options, context)
            })
            .collect();

        let gap_to_runner_up = winner.normalized_score - runner_up.normalized_score;
        let sensitive_count = tipping_points.iter().filter(|t| t.is_sensitive).count() as u32;
        let close_race_cost = if gap_to_runner_up < CLOSE_RACE_GAP {
            CLOSE_RACE_COST
        } else {
            0
        };

        let robustness = Percentage::HUNDRED
            .saturating_sub(SENSITIVE_CRITERION_COST.saturating_mul(sensitive_count))
            .saturating_sub(close_race_cost);

        Some(SensitivityResult {
            winner: winner.to_ref(),
            runner_up: runner_up.to_ref(),
            gap_to_runner_up,
            robustness,
            tipping_points,
            is_robust: robustness.value() >= ROBUST_THRESHOLD,
        })
    }

    fn scan_criterion(
        winner: &RankedOption,
        runner_up: &RankedOption,
        criterion: &Criterion,
        criteria: &[Criterion],
        options: &[DecisionOption],
        context: &ScenarioContext<'_>,
    ) -> TippingPoint {
        let current = criterion.weight.value();
        let winner_score = winner.score_on(&criterion.id).unwrap_or(Score::MIN);
        let runner_up_score = runner_up.score_on(&criterion.id).unwrap_or(Score::MIN);
        let score_diff = i16::from(winner_score.value()) - i16::from(runner_up_score.value());

        let (direction, candidates): (Direction, Vec<u8>) = if score_diff > 0 {
            (Direction::Decrease, (Weight::MIN.value()..current).rev().collect())
        } else if score_diff < 0 {
            (Direction::Increase, (current + 1..=Weight::MAX.value()).collect())
        } else {
            (Direction::Increase, Vec::new())
        };

        let tipping_weight = candidates
            .into_iter()
            .map(Weight::new)
            .find(|weight| {
                let trial = reweighted(criteria, &criterion.id, *weight);
                let top = RankingEngine::top_option_id(options, &trial, context);
                top.as_deref() != Some(winner.id())
            });

        let is_sensitive = tipping_weight
            .map(|w| w.value().abs_diff(current) <= SENSITIVITY_WINDOW)
            .unwrap_or(false);

        TippingPoint {
            criterion_id: criterion.id.clone(),
            criterion_name: criterion.name.clone(),
            current_weight: criterion.weight,
            winner_score,
            runner_up_score,
            score_diff,
            tipping_weight,
            direction,
            is_sensitive,
        }
    }
}
