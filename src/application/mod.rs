//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer validates decision documents and orchestrates the pure domain
//! analysis services. It performs no I/O.

pub mod handlers;

pub use handlers::{
    DecisionReport, EvaluateDecisionCommand, EvaluateDecisionHandler, EvaluationError,
    EvaluationSettings, ExploreWeightsHandler, TippingPointQuery, WhatIfQuery,
};
