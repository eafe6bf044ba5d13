//! Engine configuration

use serde::Deserialize;

use crate::domain::analysis::{ScoringPolicy, SimulationSettings, DEFAULT_SIMULATIONS};
use crate::domain::foundation::Score;

use super::error::ValidationError;

/// Upper bound on Monte Carlo trials per evaluation.
pub const MAX_SIMULATIONS: u32 = 1_000_000;

/// Scoring and analysis settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Score assumed for an (option, criterion) pair with no entry
    #[serde(default = "default_missing_score")]
    pub missing_score: u8,

    /// Monte Carlo trials per evaluation
    #[serde(default = "default_simulations")]
    pub simulations: u32,

    /// Fixed Monte Carlo seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Apply constraint penalties during sensitivity, what-if and simulation re-runs
    #[serde(default)]
    pub apply_constraints_in_scenarios: bool,

    /// Run the Monte Carlo step when score ranges are present
    #[serde(default = "default_run_simulation")]
    pub run_simulation: bool,
}

fn default_missing_score() -> u8 {
    Score::NEUTRAL.value()
}

fn default_simulations() -> u32 {
    DEFAULT_SIMULATIONS
}

fn default_run_simulation() -> bool {
    true
}

impl EngineConfig {
    /// Scoring policy for missing scores
    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            missing_score: Score::new(self.missing_score),
        }
    }

    /// Monte Carlo trial count and seed
    pub fn simulation_settings(&self) -> SimulationSettings {
        SimulationSettings {
            simulations: self.simulations,
            seed: self.seed,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.missing_score > Score::MAX.value() {
            return Err(ValidationError::MissingScoreOutOfRange(self.missing_score));
        }
        if self.simulations == 0 {
            return Err(ValidationError::ZeroSimulations);
        }
        if self.simulations > MAX_SIMULATIONS {
            return Err(ValidationError::TooManySimulations {
                max: MAX_SIMULATIONS,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            missing_score: default_missing_score(),
            simulations: default_simulations(),
            seed: None,
            apply_constraints_in_scenarios: false,
            run_simulation: default_run_simulation(),
        }
    }
}
