//! Evaluation handlers.
//!
//! Handlers that validate a decision document and run the analysis pipeline.

mod evaluate_decision;
mod explore_weights;

pub use evaluate_decision::{
    DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler, EvaluationSettings,
};
pub use explore_weights::{ExploreWeightsHandler, TippingPointQuery, WhatIfQuery};

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors from evaluation handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Invalid decision: {0}")]
    InvalidDecision(#[from] ValidationError),

    #[error("Unknown criterion '{0}'")]
    UnknownCriterion(String),
}
