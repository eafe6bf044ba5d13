//! DecisionOption - a candidate alternative being decided between.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::Score;

/// A candidate alternative with its per-criterion scores.
///
/// Scores are sparse: a criterion without an entry is resolved through the
/// active [`ScoringPolicy`](crate::domain::analysis::ScoringPolicy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scores: HashMap<String, Score>,
    /// Free-form cost estimate such as "$1,200".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
    /// Externally assessed constraint compliance, 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_compliance: Option<f64>,
}

impl DecisionOption {
    /// Creates an option with no scores.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scores: HashMap::new(),
            estimated_cost: None,
            constraint_compliance: None,
        }
    }

    /// Sets the score for a criterion, clamping into 0-10.
    pub fn with_score(mut self, criterion_id: impl Into<String>, score: u8) -> Self {
        self.scores.insert(criterion_id.into(), Score::new(score));
        self
    }

    /// Sets the estimated cost.
    pub fn with_estimated_cost(mut self, cost: impl Into<String>) -> Self {
        self.estimated_cost = Some(cost.into());
        self
    }

    /// Sets the constraint compliance score.
    pub fn with_compliance(mut self, compliance: f64) -> Self {
        self.constraint_compliance = Some(compliance);
        self
    }

    /// Returns the explicit score for a criterion, if any.
    pub fn score_for(&self, criterion_id: &str) -> Option<Score> {
        self.scores.get(criterion_id).copied()
    }

    /// Returns a copy of this option with its score map replaced.
    pub fn with_scores(&self, scores: HashMap<String, Score>) -> Self {
        Self {
            scores,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let option = DecisionOption::new("a", "Apartment")
            .with_score("cost", 7)
            .with_estimated_cost("$1,200")
            .with_compliance(8.0);

        assert_eq!(option.score_for("cost"), Some(Score::new(7)));
        assert_eq!(option.score_for("size"), None);
        assert_eq!(option.estimated_cost.as_deref(), Some("$1,200"));
        assert_eq!(option.constraint_compliance, Some(8.0));
    }

    #[test]
    fn with_score_clamps() {
        let option = DecisionOption::new("a", "A").with_score("x", 99);
        assert_eq!(option.score_for("x"), Some(Score::MAX));
    }

    #[test]
    fn deserializes_minimal_json() {
        let json = r#"{"id":"a","name":"Apartment","scores":{"cost":6}}"#;
        let option: DecisionOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.score_for("cost").map(|s| s.value()), Some(6));
        assert!(option.estimated_cost.is_none());
    }

    #[test]
    fn serialization_skips_absent_optionals() {
        let json = serde_json::to_string(&DecisionOption::new("a", "A")).unwrap();
        assert!(!json.contains("estimated_cost"));
        assert!(!json.contains("constraint_compliance"));
    }
}
