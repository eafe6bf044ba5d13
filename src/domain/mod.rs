//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `decision` - Options, weighted criteria, constraints and the decision document
//! - `analysis` - Pure domain services for ranking, rationale, sensitivity and simulation

pub mod analysis;
pub mod decision;
pub mod foundation;
