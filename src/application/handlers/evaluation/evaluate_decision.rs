//! EvaluateDecisionHandler - Runs the full analysis pipeline over a decision.
//!
//! Rankings (with confidence and rationale), tipping-point sensitivity and,
//! when score ranges are present, a Monte Carlo robustness check.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::analysis::{
    Analysis, Confidence, MonteCarloResult, MonteCarloSimulator, RankedOption, RankingEngine,
    ScenarioContext, ScoringPolicy, SensitivityAnalyzer, SensitivityResult, SimulationSettings,
};
use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, Timestamp};

use super::EvaluationError;

/// How an evaluation resolves missing scores, simulates and re-runs scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationSettings {
    pub policy: ScoringPolicy,
    pub simulation: SimulationSettings,
    /// Apply constraint penalties when re-ranking for sensitivity and simulation.
    pub apply_constraints_in_scenarios: bool,
    pub run_simulation: bool,
}

impl EvaluationSettings {
    /// Scenario context for sensitivity, what-if and simulation re-runs.
    pub(crate) fn scenario_context<'a>(&self, decision: &'a Decision) -> ScenarioContext<'a> {
        let context = ScenarioContext::unconstrained().with_policy(self.policy);
        if self.apply_constraints_in_scenarios {
            ScenarioContext {
                constraints: decision.constraints.as_ref(),
                ..context
            }
        } else {
            context
        }
    }
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for EvaluationSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            policy: config.scoring_policy(),
            simulation: config.simulation_settings(),
            apply_constraints_in_scenarios: config.apply_constraints_in_scenarios,
            run_simulation: config.run_simulation,
        }
    }
}

/// Command to evaluate a decision.
#[derive(Debug, Clone)]
pub struct EvaluateDecisionCommand {
    pub decision: Decision,
    /// Overrides the configured trial count.
    pub simulations: Option<u32>,
    /// Overrides the configured seed.
    pub seed: Option<u64>,
}

impl EvaluateDecisionCommand {
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            simulations: None,
            seed: None,
        }
    }
}

/// Everything an evaluation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub decision_id: DecisionId,
    pub title: String,
    pub evaluated_at: Timestamp,
    pub rankings: Vec<RankedOption>,
    pub confidence: Option<Confidence>,
    pub analysis: Option<Analysis>,
    pub sensitivity: Option<SensitivityResult>,
    pub monte_carlo: Option<MonteCarloResult>,
    /// Calendar days from evaluation to the constraint deadline.
    pub days_until_deadline: Option<i64>,
}

impl DecisionReport {
    /// The top-ranked option, if any.
    pub fn winner(&self) -> Option<&RankedOption> {
        self.rankings.first()
    }
}

/// Handler for evaluating decisions.
pub struct EvaluateDecisionHandler {
    settings: EvaluationSettings,
}

impl EvaluateDecisionHandler {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self { settings }
    }

    pub fn handle(&self, cmd: EvaluateDecisionCommand) -> Result<DecisionReport, EvaluationError> {
        let decision = &cmd.decision;

        // 1. Validate structure
        decision.validate()?;

        // 2. Rank with the decision's constraints
        let ranking_context = ScenarioContext {
            policy: self.settings.policy,
            constraints: decision.constraints.as_ref(),
        };
        let outcome = RankingEngine::generate_rankings_with(
            &decision.options,
            &decision.criteria,
            &ranking_context,
        );

        debug!(
            decision_id = %decision.id,
            ranked = outcome.rankings.len(),
            "Rankings generated"
        );

        // 3. Secondary analyses, baselined on the scenario ranking
        let scenario_context = self.settings.scenario_context(decision);
        let scenario_rankings = if scenario_context == ranking_context {
            None
        } else {
            Some(RankingEngine::rank(&decision.options, &decision.criteria, &scenario_context))
        };
        let baseline = scenario_rankings.as_deref().unwrap_or(&outcome.rankings);

        let ranked_winner = outcome.rankings.first().map(|r| r.id());
        let scenario_winner = baseline.first().map(|r| r.id());
        if scenario_winner != ranked_winner {
            warn!(
                decision_id = %decision.id,
                winner = ranked_winner,
                scenario_winner,
                "Constraints change the winner; sensitivity and simulation ignore them"
            );
        }

        let sensitivity = SensitivityAnalyzer::analyze_with(
            baseline,
            &decision.criteria,
            &decision.options,
            &scenario_context,
        );

        let monte_carlo = if self.settings.run_simulation && !decision.score_ranges.is_empty() {
            let settings = SimulationSettings {
                simulations: cmd.simulations.unwrap_or(self.settings.simulation.simulations),
                seed: cmd.seed.or(self.settings.simulation.seed),
            };
            Some(MonteCarloSimulator::run_with(
                &decision.options,
                &decision.criteria,
                &decision.score_ranges,
                &settings,
                &scenario_context,
            ))
        } else {
            None
        };

        // 4. Deadline
        let evaluated_at = Timestamp::now();
        let days_until_deadline = decision
            .constraints
            .as_ref()
            .and_then(|c| c.deadline_date())
            .map(|date| evaluated_at.days_until(date));

        let report = DecisionReport {
            decision_id: decision.id,
            title: decision.title.clone(),
            evaluated_at,
            rankings: outcome.rankings,
            confidence: outcome.confidence,
            analysis: outcome.analysis,
            sensitivity,
            monte_carlo,
            days_until_deadline,
        };

        info!(
            decision_id = %report.decision_id,
            winner = report.winner().map(|w| w.id()),
            confidence = report.confidence.as_ref().map(|c| c.label.as_str()),
            robustness = report.sensitivity.as_ref().map(|s| s.robustness.value()),
            simulated = report.monte_carlo.is_some(),
            "Decision evaluated"
        );

        Ok(report)
    }
}
