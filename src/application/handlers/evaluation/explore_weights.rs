//! ExploreWeightsHandler - What-if and tipping-point queries on a decision.

use tracing::debug;

use crate::domain::analysis::{TippingPointResult, WhatIfAnalyzer, WhatIfResult};
use crate::domain::decision::Decision;
use crate::domain::foundation::Weight;

use super::{EvaluationError, EvaluationSettings};

/// Query: re-rank with one criterion's weight replaced.
#[derive(Debug, Clone)]
pub struct WhatIfQuery {
    pub decision: Decision,
    pub criterion_id: String,
    pub new_weight: u8,
}

/// Query: closest weight of one criterion that changes the winner.
#[derive(Debug, Clone)]
pub struct TippingPointQuery {
    pub decision: Decision,
    pub criterion_id: String,
}

/// Handler for single-criterion weight exploration.
///
/// Re-runs use the same scenario context as evaluation sensitivity scans.
pub struct ExploreWeightsHandler {
    settings: EvaluationSettings,
}

impl ExploreWeightsHandler {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self { settings }
    }

    pub fn what_if(&self, query: WhatIfQuery) -> Result<WhatIfResult, EvaluationError> {
        let decision = &query.decision;
        Self::check(decision, &query.criterion_id)?;

        let context = self.settings.scenario_context(decision);
        let result = WhatIfAnalyzer::what_if_with(
            &decision.options,
            &decision.criteria,
            &query.criterion_id,
            Weight::new(query.new_weight),
            &context,
        );

        debug!(
            decision_id = %decision.id,
            criterion_id = %query.criterion_id,
            new_weight = query.new_weight,
            changed = result.changed,
            "What-if evaluated"
        );

        Ok(result)
    }

    pub fn tipping_point(
        &self,
        query: TippingPointQuery,
    ) -> Result<Option<TippingPointResult>, EvaluationError> {
        let decision = &query.decision;
        Self::check(decision, &query.criterion_id)?;

        let context = self.settings.scenario_context(decision);
        let result = WhatIfAnalyzer::find_tipping_point_with(
            &decision.options,
            &decision.criteria,
            &query.criterion_id,
            &context,
        );

        debug!(
            decision_id = %decision.id,
            criterion_id = %query.criterion_id,
            tipping_weight = result.as_ref().map(|t| t.tipping_weight.value()),
            "Tipping point searched"
        );

        Ok(result)
    }

    fn check(decision: &Decision, criterion_id: &str) -> Result<(), EvaluationError> {
        decision.validate()?;
        if !decision.criteria.iter().any(|c| c.id == criterion_id) {
            return Err(EvaluationError::UnknownCriterion(criterion_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{Constraints, Criterion, DecisionOption};

    /// A: 97, B: 80 at the default weights.
    fn decision() -> Decision {
        Decision::new("Pick one")
            .with_criterion(Criterion::new("x", "X", 8))
            .with_criterion(Criterion::new("y", "Y", 5))
            .with_option(
                DecisionOption::new("a", "A")
                    .with_score("x", 9)
                    .with_score("y", 5),
            )
            .with_option(
                DecisionOption::new("b", "B")
                    .with_score("x", 5)
                    .with_score("y", 8),
            )
    }

    fn handler() -> ExploreWeightsHandler {
        ExploreWeightsHandler::new(EvaluationSettings::default())
    }

    #[test]
    fn what_if_reports_flip() {
        let result = handler()
            .what_if(WhatIfQuery {
                decision: decision(),
                criterion_id: "x".to_string(),
                new_weight: 2,
            })
            .unwrap();

        assert!(result.changed);
        assert_eq!(result.new_winner.unwrap().id, "b");
    }

    #[test]
    fn what_if_rejects_unknown_criterion() {
        let result = handler().what_if(WhatIfQuery {
            decision: decision(),
            criterion_id: "z".to_string(),
            new_weight: 2,
        });

        assert!(matches!(result, Err(EvaluationError::UnknownCriterion(id)) if id == "z"));
    }

    #[test]
    fn tipping_point_found() {
        let tip = handler()
            .tipping_point(TippingPointQuery {
                decision: decision(),
                criterion_id: "x".to_string(),
            })
            .unwrap()
            .unwrap();

        assert_eq!(tip.tipping_weight, Weight::new(3));
    }

    #[test]
    fn constraints_ignored_in_scenarios_by_default() {
        // Over budget A would lose under penalties; by default the scan ignores them.
        let mut decision = decision().with_constraints(Constraints::with_budget("100"));
        decision.options[0].estimated_cost = Some("250".to_string());

        let query = WhatIfQuery {
            decision,
            criterion_id: "y".to_string(),
            new_weight: 5,
        };

        let unconstrained = handler().what_if(query.clone()).unwrap();
        assert_eq!(unconstrained.original_winner.unwrap().id, "a");

        let settings = EvaluationSettings {
            apply_constraints_in_scenarios: true,
            ..EvaluationSettings::default()
        };
        let constrained = ExploreWeightsHandler::new(settings).what_if(query).unwrap();
        assert_eq!(constrained.original_winner.unwrap().id, "b");
    }
}
