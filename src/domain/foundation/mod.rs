//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary
//! of the decision engine.

mod errors;
mod ids;
mod percentage;
mod score;
mod timestamp;
mod weight;

pub use errors::ValidationError;
pub use ids::DecisionId;
pub use percentage::Percentage;
pub use score::Score;
pub use timestamp::Timestamp;
pub use weight::Weight;
