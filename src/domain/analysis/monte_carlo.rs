//! Monte Carlo Simulator - win probabilities under score uncertainty.
//!
//! Each trial redraws every ranged score uniformly within its inclusive
//! integer bounds, re-runs the ranking pipeline and credits the winner.
//! Trials share nothing but the RNG, so a seeded run is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::decision::{Criterion, DecisionOption, ScoreRanges};
use crate::domain::foundation::Score;

use super::{OptionRef, RankingEngine, ScenarioContext};

/// Trial count used when the caller does not choose one.
pub const DEFAULT_SIMULATIONS: u32 = 1000;

/// Win count for one option across all trials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationTally {
    pub option: OptionRef,
    pub wins: u32,
    /// `wins / simulations * 100`, one decimal place.
    pub percentage: String,
}

/// Outcome of a full simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Sorted by wins, descending; ties keep option order.
    pub results: Vec<SimulationTally>,
    pub simulations: u32,
    pub most_likely: Option<SimulationTally>,
}

/// Trial count and optional seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub simulations: u32,
    /// Fixed seed for reproducible runs; None draws from the OS.
    pub seed: Option<u64>,
}

impl SimulationSettings {
    pub fn new(simulations: u32) -> Self {
        Self {
            simulations,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn create_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATIONS)
    }
}

/// Repeated randomized re-scoring.
pub struct MonteCarloSimulator;

impl MonteCarloSimulator {
    /// Runs `simulations` unconstrained, unseeded trials with the default
    /// scoring policy.
    pub fn run_simulation(
        options: &[DecisionOption],
        criteria: &[Criterion],
        score_ranges: &ScoreRanges,
        simulations: u32,
    ) -> MonteCarloResult {
        Self::run_with(
            options,
            criteria,
            score_ranges,
            &SimulationSettings::new(simulations),
            &ScenarioContext::unconstrained(),
        )
    }

    /// Runs trials with explicit settings and scenario context.
    pub fn run_with(
        options: &[DecisionOption],
        criteria: &[Criterion],
        score_ranges: &ScoreRanges,
        settings: &SimulationSettings,
        context: &ScenarioContext<'_>,
    ) -> MonteCarloResult {
        let mut rng = settings.create_rng();
        Self::run_with_rng(options, criteria, score_ranges, settings.simulations, context, &mut rng)
    }

    /// Runs trials drawing from the given RNG.
    ///
    /// # Edge Cases
    /// - No options: empty results, no most likely option
    /// - Zero simulations: every option at "0.0"
    /// - No criteria: no trial has a winner, every option at "0.0"
    pub fn run_with_rng<R: Rng>(
        options: &[DecisionOption],
        criteria: &[Criterion],
        score_ranges: &ScoreRanges,
        simulations: u32,
        context: &ScenarioContext<'_>,
        rng: &mut R,
    ) -> MonteCarloResult {
        let mut wins: HashMap<&str, u32> = options.iter().map(|o| (o.id.as_str(), 0)).collect();

        for _ in 0..simulations {
            let trial: Vec<DecisionOption> = options
                .iter()
                .map(|option| Self::draw_option(option, criteria, score_ranges, context, rng))
                .collect();

            if let Some(winner) = RankingEngine::top_option_id(&trial, criteria, context) {
                if let Some(count) = wins.get_mut(winner.as_str()) {
                    *count += 1;
                }
            }
        }

        let mut results: Vec<SimulationTally> = options
            .iter()
            .map(|option| {
                let count = wins.get(option.id.as_str()).copied().unwrap_or(0);
                SimulationTally {
                    option: OptionRef::from(option),
                    wins: count,
                    percentage: format_percentage(count, simulations),
                }
            })
            .collect();
        results.sort_by(|a, b| b.wins.cmp(&a.wins));

        let most_likely = results.first().cloned();

        tracing::debug!(
            simulations,
            options = options.len(),
            most_likely = most_likely.as_ref().map(|t| t.option.id.as_str()),
            "Monte Carlo simulation complete"
        );

        MonteCarloResult {
            results,
            simulations,
            most_likely,
        }
    }

    fn draw_option<R: Rng>(
        option: &DecisionOption,
        criteria: &[Criterion],
        score_ranges: &ScoreRanges,
        context: &ScenarioContext<'_>,
        rng: &mut R,
    ) -> DecisionOption {
        let ranges = score_ranges.get(&option.id);

        let scores = criteria
            .iter()
            .map(|criterion| {
                let score = match ranges.and_then(|r| r.get(&criterion.id)) {
                    Some(range) => {
                        let (low, high) = range.bounds();
                        Score::new(rng.random_range(low.value()..=high.value()))
                    }
                    None => context.policy.resolve(option, &criterion.id),
                };
                (criterion.id.clone(), score)
            })
            .collect();

        option.with_scores(scores)
    }
}

fn format_percentage(wins: u32, simulations: u32) -> String {
    if simulations == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", f64::from(wins) / f64::from(simulations) * 100.0)
}
