//! Ranking Engine - scores, penalizes, sorts and ranks all options.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{Constraints, Criterion, DecisionOption};
use crate::domain::foundation::Score;

use super::{
    Analysis, Confidence, ConfidenceEstimator, ConstraintPenalizer, ConstraintPenalty,
    ConstraintViolation, CriterionScore, RationaleAnalyzer, ScoreCalculator, ScoringPolicy,
};

/// Lightweight reference to an option by id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionRef {
    pub id: String,
    pub name: String,
}

impl OptionRef {
    /// Creates a reference.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&DecisionOption> for OptionRef {
    fn from(option: &DecisionOption) -> Self {
        Self::new(option.id.clone(), option.name.clone())
    }
}

/// An option with its computed scores and rank.
///
/// Derived data; the embedded `option` remains the authoritative input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOption {
    pub option: DecisionOption,
    /// `raw_score * constraint_penalty`; the sort key.
    pub total_score: f64,
    /// Weighted sum before penalties.
    pub raw_score: f64,
    /// Weighted sum if every score were 10.
    pub max_possible: f64,
    /// 0-10 score after the constraint penalty.
    pub normalized_score: f64,
    /// 0-10 score before the constraint penalty.
    pub raw_normalized_score: f64,
    /// Penalty factor in (0, 1].
    pub constraint_penalty: f64,
    pub constraint_violations: Vec<ConstraintViolation>,
    pub criteria_scores: Vec<CriterionScore>,
    /// 1-based position after sorting.
    pub rank: usize,
}

impl RankedOption {
    /// Returns the option id.
    pub fn id(&self) -> &str {
        &self.option.id
    }

    /// Returns the option name.
    pub fn name(&self) -> &str {
        &self.option.name
    }

    /// Returns the resolved score this option was ranked with on a criterion.
    pub fn score_on(&self, criterion_id: &str) -> Option<Score> {
        self.criteria_scores
            .iter()
            .find(|c| c.criterion_id == criterion_id)
            .map(|c| c.score)
    }

    /// Returns a reference to the underlying option.
    pub fn to_ref(&self) -> OptionRef {
        OptionRef::from(&self.option)
    }
}

/// Everything the ranking step produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub rankings: Vec<RankedOption>,
    /// None only for the empty-input result.
    pub confidence: Option<Confidence>,
    /// None only for the empty-input result.
    pub analysis: Option<Analysis>,
}

impl RankingOutcome {
    /// The result for empty options or criteria.
    pub fn empty() -> Self {
        Self {
            rankings: Vec::new(),
            confidence: None,
            analysis: None,
        }
    }

    /// Returns true if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    /// Returns the top-ranked option.
    pub fn winner(&self) -> Option<&RankedOption> {
        self.rankings.first()
    }
}

/// Settings for a ranking run.
///
/// Scenario re-runs (sensitivity scans, what-if, tipping points, Monte Carlo)
/// receive one of these; by default they ignore constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScenarioContext<'a> {
    pub policy: ScoringPolicy,
    pub constraints: Option<&'a Constraints>,
}

impl<'a> ScenarioContext<'a> {
    /// Default policy, no constraints.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Default policy, with the given constraints.
    pub fn constrained(constraints: &'a Constraints) -> Self {
        Self {
            policy: ScoringPolicy::default(),
            constraints: Some(constraints),
        }
    }

    /// Replaces the scoring policy.
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Orchestrates scoring, penalties, sorting and follow-up analysis.
pub struct RankingEngine;

impl RankingEngine {
    /// Ranks options and derives confidence and analysis, using the default
    /// scoring policy.
    ///
    /// # Edge Cases
    /// - Empty options or criteria: [`RankingOutcome::empty`]
    pub fn generate_rankings(
        options: &[DecisionOption],
        criteria: &[Criterion],
        constraints: Option<&Constraints>,
    ) -> RankingOutcome {
        let context = ScenarioContext {
            policy: ScoringPolicy::default(),
            constraints,
        };
        Self::generate_rankings_with(options, criteria, &context)
    }

    /// Ranks options and derives confidence and analysis.
    pub fn generate_rankings_with(
        options: &[DecisionOption],
        criteria: &[Criterion],
        context: &ScenarioContext<'_>,
    ) -> RankingOutcome {
        let rankings = Self::rank(options, criteria, context);
        if rankings.is_empty() {
            return RankingOutcome::empty();
        }

        let confidence = ConfidenceEstimator::calculate_confidence(&rankings);
        let analysis = RationaleAnalyzer::generate_analysis(&rankings, criteria);

        RankingOutcome {
            rankings,
            confidence: Some(confidence),
            analysis,
        }
    }

    /// Scores, penalizes, sorts and ranks without any follow-up analysis.
    ///
    /// # Algorithm
    /// 1. Weighted score per option, constraint penalty when constraints are set
    /// 2. `total_score = raw * factor`, `normalized_score = normalized * factor`
    /// 3. Stable sort by `total_score` descending; equal scores keep input order
    /// 4. Dense 1-based rank by position
    ///
    /// # Edge Cases
    /// - Empty options or criteria: empty Vec
    pub fn rank(
        options: &[DecisionOption],
        criteria: &[Criterion],
        context: &ScenarioContext<'_>,
    ) -> Vec<RankedOption> {
        if options.is_empty() || criteria.is_empty() {
            return Vec::new();
        }

        let mut rankings: Vec<RankedOption> = options
            .iter()
            .map(|option| {
                let calc = ScoreCalculator::calculate_score(option, criteria, &context.policy);
                let penalty = context
                    .constraints
                    .map(|c| ConstraintPenalizer::calculate_constraint_penalty(option, c))
                    .unwrap_or_else(ConstraintPenalty::none);

                RankedOption {
                    option: option.clone(),
                    total_score: calc.raw * penalty.factor,
                    raw_score: calc.raw,
                    max_possible: calc.max,
                    normalized_score: calc.normalized * penalty.factor,
                    raw_normalized_score: calc.normalized,
                    constraint_penalty: penalty.factor,
                    constraint_violations: penalty.violations,
                    criteria_scores: calc.criteria_scores,
                    rank: 0,
                }
            })
            .collect();

        // sort_by is stable
        rankings.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

        for (index, ranked) in rankings.iter_mut().enumerate() {
            ranked.rank = index + 1;
        }

        rankings
    }

    /// Returns the id of the option that would rank first.
    pub fn top_option_id(
        options: &[DecisionOption],
        criteria: &[Criterion],
        context: &ScenarioContext<'_>,
    ) -> Option<String> {
        Self::rank(options, criteria, context)
            .into_iter()
            .next()
            .map(|r| r.option.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{ConfidenceLevel, Severity};
    use proptest::prelude::*;

    fn criteria() -> Vec<Criterion> {
        vec![
            Criterion::new("price", "Price", 6),
            Criterion::new("comfort", "Comfort", 4),
        ]
    }

    fn options() -> Vec<DecisionOption> {
        vec![
            DecisionOption::new("bus", "Bus").with_score("price", 9).with_score("comfort", 3),
            DecisionOption::new("car", "Car").with_score("price", 4).with_score("comfort", 9),
            DecisionOption::new("bike", "Bike").with_score("price", 10).with_score("comfort", 5),
        ]
    }

    #[test]
    fn empty_options_yield_empty_outcome() {
        let outcome = RankingEngine::generate_rankings(&[], &criteria(), None);
        assert_eq!(outcome, RankingOutcome::empty());
        assert!(outcome.confidence.is_none());
        assert!(outcome.analysis.is_none());
    }

    #[test]
    fn empty_criteria_yield_empty_outcome() {
        let outcome = RankingEngine::generate_rankings(&options(), &[], None);
        assert!(outcome.is_empty());
        assert!(outcome.winner().is_none());
    }

    #[test]
    fn sorts_by_weighted_total() {
        let outcome = RankingEngine::generate_rankings(&options(), &criteria(), None);
        let order: Vec<_> = outcome.rankings.iter().map(|r| r.id()).collect();

        // bike 80, bus 66, car 60
        assert_eq!(order, vec!["bike", "bus", "car"]);
        assert_eq!(outcome.rankings[0].total_score, 80.0);
        assert_eq!(outcome.rankings[0].max_possible, 100.0);
        assert!((outcome.rankings[0].normalized_score - 8.0).abs() < 1e-12);
        assert_eq!(outcome.rankings[0].rank, 1);
        assert_eq!(outcome.rankings[2].rank, 3);
    }

    #[test]
    fn outcome_carries_confidence_and_analysis() {
        let outcome = RankingEngine::generate_rankings(&options(), &criteria(), None);

        let confidence = outcome.confidence.expect("confidence");
        // (80 - 66) / 100 = 0.14
        assert_eq!(confidence.level, ConfidenceLevel::Medium);
        assert_eq!(confidence.value, 0.75);

        let analysis = outcome.analysis.expect("analysis");
        assert_eq!(analysis.winner.id, "bike");
        assert_eq!(analysis.runner_up.map(|r| r.id), Some("bus".to_string()));
    }

    #[test]
    fn ties_keep_input_order() {
        let criteria = vec![Criterion::new("x", "X", 5)];
        let options = vec![
            DecisionOption::new("first", "First").with_score("x", 6),
            DecisionOption::new("second", "Second").with_score("x", 6),
            DecisionOption::new("third", "Third").with_score("x", 6),
        ];

        let rankings = RankingEngine::rank(&options, &criteria, &ScenarioContext::unconstrained());
        let order: Vec<_> = rankings.iter().map(|r| (r.id(), r.rank)).collect();
        assert_eq!(order, vec![("first", 1), ("second", 2), ("third", 3)]);
    }

    #[test]
    fn constraint_penalty_can_reorder() {
        let criteria = vec![Criterion::new("x", "X", 5)];
        let options = vec![
            DecisionOption::new("pricey", "Pricey")
                .with_score("x", 9)
                .with_estimated_cost("$2,000"),
            DecisionOption::new("cheap", "Cheap")
                .with_score("x", 6)
                .with_estimated_cost("$500"),
        ];
        let constraints = Constraints::with_budget("$1,000");

        let outcome = RankingEngine::generate_rankings(&options, &criteria, Some(&constraints));
        let pricey = outcome.rankings.iter().find(|r| r.id() == "pricey").unwrap();

        assert_eq!(outcome.rankings[0].id(), "cheap");
        assert_eq!(pricey.constraint_penalty, 0.5);
        assert_eq!(pricey.raw_score, 45.0);
        assert_eq!(pricey.total_score, 22.5);
        assert!((pricey.raw_normalized_score - 9.0).abs() < 1e-12);
        assert!((pricey.normalized_score - 4.5).abs() < 1e-12);
        assert_eq!(pricey.constraint_violations[0].severity, Severity::Severe);
    }

    #[test]
    fn constraints_ignored_when_absent() {
        let criteria = vec![Criterion::new("x", "X", 5)];
        let options = vec![DecisionOption::new("a", "A")
            .with_score("x", 9)
            .with_estimated_cost("$2,000")];

        let rankings = RankingEngine::rank(&options, &criteria, &ScenarioContext::unconstrained());
        assert_eq!(rankings[0].constraint_penalty, 1.0);
        assert!(rankings[0].constraint_violations.is_empty());
    }

    #[test]
    fn policy_controls_missing_scores() {
        let criteria = vec![Criterion::new("x", "X", 5), Criterion::new("y", "Y", 5)];
        let options = vec![
            DecisionOption::new("sparse", "Sparse").with_score("x", 8),
            DecisionOption::new("full", "Full").with_score("x", 6).with_score("y", 4),
        ];

        let neutral = ScenarioContext::unconstrained();
        let strict = ScenarioContext::unconstrained().with_policy(ScoringPolicy::strict());

        // neutral: sparse = 8 + 5 = 13 vs full = 10
        assert_eq!(
            RankingEngine::top_option_id(&options, &criteria, &neutral),
            Some("sparse".to_string())
        );
        // strict: sparse = 8 + 0 = 8 vs full = 10
        assert_eq!(
            RankingEngine::top_option_id(&options, &criteria, &strict),
            Some("full".to_string())
        );
    }

    #[test]
    fn score_on_reads_resolved_breakdown() {
        let context = ScenarioContext::unconstrained();
        let rankings = RankingEngine::rank(&options(), &criteria(), &context);
        let car = rankings.iter().find(|r| r.id() == "car").unwrap();
        assert_eq!(car.score_on("comfort"), Some(Score::new(9)));
        assert_eq!(car.score_on("missing"), None);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let first = RankingEngine::generate_rankings(&options(), &criteria(), None);
        let second = RankingEngine::generate_rankings(&options(), &criteria(), None);
        assert_eq!(first, second);
    }

    fn arb_decision() -> impl Strategy<Value = (Vec<DecisionOption>, Vec<Criterion>)> {
        (1usize..6, 1usize..6).prop_flat_map(|(n_options, n_criteria)| {
            (
                proptest::collection::vec(1u8..=10, n_criteria),
                proptest::collection::vec(
                    proptest::collection::vec(0u8..=10, n_criteria),
                    n_options,
                ),
            )
                .prop_map(|(weights, score_rows)| {
                    let criteria: Vec<Criterion> = weights
                        .iter()
                        .enumerate()
                        .map(|(i, w)| Criterion::new(format!("c{}", i), format!("C{}", i), *w))
                        .collect();
                    let options = score_rows
                        .iter()
                        .enumerate()
                        .map(|(i, row)| {
                            row.iter().enumerate().fold(
                                DecisionOption::new(format!("o{}", i), format!("O{}", i)),
                                |opt, (j, s)| opt.with_score(format!("c{}", j), *s),
                            )
                        })
                        .collect();
                    (options, criteria)
                })
        })
    }

    proptest! {
        #[test]
        fn ranks_are_dense_and_gapless((options, criteria) in arb_decision()) {
            let outcome = RankingEngine::generate_rankings(&options, &criteria, None);
            let n = options.len();
            let rank_sum: usize = outcome.rankings.iter().map(|r| r.rank).sum();

            prop_assert_eq!(outcome.rankings.len(), n);
            prop_assert_eq!(rank_sum, n * (n + 1) / 2);
            for (i, ranked) in outcome.rankings.iter().enumerate() {
                prop_assert_eq!(ranked.rank, i + 1);
            }
        }

        #[test]
        fn totals_are_non_increasing((options, criteria) in arb_decision()) {
            let context = ScenarioContext::unconstrained();
            let rankings = RankingEngine::rank(&options, &criteria, &context);
            for pair in rankings.windows(2) {
                prop_assert!(pair[0].total_score >= pair[1].total_score);
            }
        }

        #[test]
        fn normalized_scores_stay_on_scale((options, criteria) in arb_decision()) {
            let context = ScenarioContext::unconstrained();
            let rankings = RankingEngine::rank(&options, &criteria, &context);
            for ranked in &rankings {
                prop_assert!(ranked.normalized_score >= 0.0);
                prop_assert!(ranked.normalized_score <= 10.0 + 1e-9);
            }
        }
    }
}
