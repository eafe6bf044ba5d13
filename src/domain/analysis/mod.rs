//! Analysis Module - Pure domain services for multi-criteria decisions.
//!
//! This module contains stateless functions that rank options against
//! weighted criteria and explain, stress-test and simulate the result.
//!
//! # Components
//!
//! - `Normalizer` - Linear rescaling onto the 0-10 scale
//! - `ScoreCalculator` - Weighted mean score of one option
//! - `ConstraintPenalizer` - Soft budget and compliance penalties
//! - `RankingEngine` - Scores, penalizes, sorts and ranks all options
//! - `ConfidenceEstimator` - Classifies the winner's margin
//! - `RationaleAnalyzer` - Strengths, weaknesses, trade-offs and rationale
//! - `SensitivityAnalyzer` - Per-criterion tipping points and robustness
//! - `MonteCarloSimulator` - Win probabilities under score uncertainty
//! - `WhatIfAnalyzer` - Single-weight what-if and tipping-point search
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. Inputs are never mutated;
//! reweighting works on copies. The only source of nondeterminism is the
//! Monte Carlo RNG, which can be seeded.

mod confidence;
mod constraint_penalizer;
mod monte_carlo;
mod normalizer;
mod ranking_engine;
mod rationale_analyzer;
mod score_calculator;
mod sensitivity_analyzer;
mod what_if;

// Re-export all public types
pub use confidence::{
    Confidence, ConfidenceEstimator, ConfidenceLevel, CLEAR_MARGIN, LOW_MARGIN, SLIGHT_MARGIN,
};
pub use constraint_penalizer::{
    ConstraintPenalizer, ConstraintPenalty, ConstraintViolation, Severity, ViolationKind,
    NEAR_BUDGET_RATIO, SEVERE_OVERRUN_RATIO,
};
pub use monte_carlo::{
    MonteCarloResult, MonteCarloSimulator, SimulationSettings, SimulationTally,
    DEFAULT_SIMULATIONS,
};
pub use normalizer::{Normalizer, SCALE_MAX, SCALE_MIDPOINT, SCALE_MIN};
pub use ranking_engine::{OptionRef, RankedOption, RankingEngine, RankingOutcome, ScenarioContext};
pub use rationale_analyzer::{
    Analysis, Rationale, RationaleAnalyzer, RationaleSegment, Strength, Tradeoff, Weakness,
};
pub use score_calculator::{CriterionScore, ScoreCalculation, ScoreCalculator, ScoringPolicy};
pub use sensitivity_analyzer::{
    Direction, SensitivityAnalyzer, SensitivityResult, TippingPoint, ROBUST_THRESHOLD,
    SENSITIVITY_WINDOW,
};
pub use what_if::{TippingPointResult, WhatIfAnalyzer, WhatIfResult};
