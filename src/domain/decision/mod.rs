//! Decision module - the authored inputs to an evaluation.
//!
//! Options, weighted criteria, soft constraints and score uncertainty ranges,
//! plus the `Decision` document that bundles them.

mod constraints;
mod criterion;
mod document;
mod option;
mod score_range;

pub use constraints::{parse_amount, Constraints};
pub use criterion::{reweighted, Criterion};
pub use document::Decision;
pub use option::DecisionOption;
pub use score_range::{ScoreRange, ScoreRanges};
