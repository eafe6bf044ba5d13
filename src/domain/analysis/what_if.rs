//! What-if re-ranking for a single weight change.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{reweighted, Criterion, DecisionOption};
use crate::domain::foundation::Weight;

use super::{OptionRef, RankedOption, RankingEngine, ScenarioContext};

/// Rankings before and after one criterion is reweighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub original_winner: Option<OptionRef>,
    pub new_winner: Option<OptionRef>,
    /// True when the top-ranked option differs.
    pub changed: bool,
    pub new_rankings: Vec<RankedOption>,
}

/// The closest weight at which a single criterion flips the winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TippingPointResult {
    pub criterion_id: String,
    pub criterion_name: String,
    pub current_weight: Weight,
    pub tipping_weight: Weight,
    pub new_winner: OptionRef,
}

pub struct WhatIfAnalyzer;

impl WhatIfAnalyzer {
    /// Re-ranks unconstrained with `criterion_id` set to `new_weight`.
    pub fn what_if_analysis(
        options: &[DecisionOption],
        criteria: &[Criterion],
        criterion_id: &str,
        new_weight: u8,
    ) -> WhatIfResult {
        Self::what_if_with(
            options,
            criteria,
            criterion_id,
            Weight::new(new_weight),
            &ScenarioContext::unconstrained(),
        )
    }

    /// Re-ranks under `context` with `criterion_id` set to `new_weight`.
    ///
    /// # Edge Cases
    /// - Unknown criterion id: rankings are unchanged, `changed` is false
    /// - Empty options or criteria: both winners None, `changed` is false
    pub fn what_if_with(
        options: &[DecisionOption],
        criteria: &[Criterion],
        criterion_id: &str,
        new_weight: Weight,
        context: &ScenarioContext<'_>,
    ) -> WhatIfResult {
        let original = RankingEngine::rank(options, criteria, context);
        let trial = reweighted(criteria, criterion_id, new_weight);
        let new_rankings = RankingEngine::rank(options, &trial, context);

        let original_winner = original.first().map(RankedOption::to_ref);
        let new_winner = new_rankings.first().map(RankedOption::to_ref);
        let changed = original_winner.as_ref().map(|w| &w.id) != new_winner.as_ref().map(|w| &w.id);

        WhatIfResult {
            original_winner,
            new_winner,
            changed,
            new_rankings,
        }
    }

    /// Finds the weight closest to the current one that changes the winner,
    /// re-ranking unconstrained.
    pub fn find_tipping_point(
        options: &[DecisionOption],
        criteria: &[Criterion],
        criterion_id: &str,
    ) -> Option<TippingPointResult> {
        let context = ScenarioContext::unconstrained();
        Self::find_tipping_point_with(options, criteria, criterion_id, &context)
    }

    /// Finds the weight closest to the current one that changes the winner.
    ///
    /// Every weight from 1 to 10 other than the current one is tried, nearest
    /// first; at equal distance the lower weight is tried first.
    ///
    /// # Edge Cases
    /// - Unknown criterion id: None
    /// - No weight changes the winner: None
    pub fn find_tipping_point_with(
        options: &[DecisionOption],
        criteria: &[Criterion],
        criterion_id: &str,
        context: &ScenarioContext<'_>,
    ) -> Option<TippingPointResult> {
        let criterion = criteria.iter().find(|c| c.id == criterion_id)?;
        let original = RankingEngine::top_option_id(options, criteria, context)?;
        let current = criterion.weight.value();

        let mut candidates: Vec<Weight> = Weight::all().filter(|w| w.value() != current).collect();
        candidates.sort_by_key(|w| (w.value().abs_diff(current), w.value()));

        candidates.into_iter().find_map(|weight| {
            let trial = reweighted(criteria, criterion_id, weight);
            let rankings = RankingEngine::rank(options, &trial, context);
            let top = rankings.first()?;
            (top.id() != original).then(|| TippingPointResult {
                criterion_id: criterion.id.clone(),
                criterion_name: criterion.name.clone(),
                current_weight: criterion.weight,
                tipping_weight: weight,
                new_winner: top.to_ref(),
            })
        })
    }
}
