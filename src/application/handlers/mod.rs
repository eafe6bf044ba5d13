//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod evaluation;

pub use evaluation::{
    // Commands and Queries
    EvaluateDecisionCommand,
    TippingPointQuery,
    WhatIfQuery,
    // Handlers
    EvaluateDecisionHandler,
    ExploreWeightsHandler,
    // Results and settings
    DecisionReport,
    EvaluationError,
    EvaluationSettings,
};
