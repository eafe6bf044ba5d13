//! Criterion - a weighted dimension of evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Weight;

/// A weighted dimension of evaluation (e.g., cost, quality).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub name: String,
    /// Missing weights in serialized input fall back to the neutral weight.
    #[serde(default)]
    pub weight: Weight,
}

impl Criterion {
    /// Creates a criterion, clamping the weight into 1-10.
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight: Weight::new(weight),
        }
    }

    /// Returns a copy of this criterion carrying a different weight.
    pub fn with_weight(&self, weight: Weight) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }
}

/// Returns a copy of `criteria` with the weight of `criterion_id` replaced.
///
/// Criteria with other ids are cloned unchanged; an unknown id yields an
/// unchanged copy.
pub fn reweighted(criteria: &[Criterion], criterion_id: &str, weight: Weight) -> Vec<Criterion> {
    criteria
        .iter()
        .map(|c| {
            if c.id == criterion_id {
                c.with_weight(weight)
            } else {
                c.clone()
            }
        })
        .collect()
}
