//! Decision document - the complete input to an evaluation.
//!
//! This is the shape persistence and sharing layers store and exchange.
//! The engine itself never mutates it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{DecisionId, Timestamp, ValidationError};

use super::{Constraints, Criterion, DecisionOption, ScoreRange, ScoreRanges};

/// A decision: options scored against weighted criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub id: DecisionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub options: Vec<DecisionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    #[serde(default, skip_serializing_if = "ScoreRanges::is_empty")]
    pub score_ranges: ScoreRanges,
}

impl Decision {
    /// Creates an empty decision.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: DecisionId::new(),
            title: title.into(),
            created_at: Timestamp::now(),
            criteria: Vec::new(),
            options: Vec::new(),
            constraints: None,
            score_ranges: ScoreRanges::new(),
        }
    }

    /// Adds a criterion.
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Adds an option.
    pub fn with_option(mut self, option: DecisionOption) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Sets the uncertainty range of one option's score on one criterion.
    pub fn with_score_range(
        mut self,
        option_id: impl Into<String>,
        criterion_id: impl Into<String>,
        range: ScoreRange,
    ) -> Self {
        self.score_ranges
            .entry(option_id.into())
            .or_default()
            .insert(criterion_id.into(), range);
        self
    }

    /// Checks structural integrity.
    ///
    /// # Errors
    /// - `EmptyField` when an id or name is blank
    /// - `Duplicate` when two criteria or two options share an id
    /// - `InvalidFormat` when a score range bound is not a finite number
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for criterion in &self.criteria {
            require_text("criterion.id", &criterion.id)?;
            require_text("criterion.name", &criterion.name)?;
            if !seen.insert(criterion.id.as_str()) {
                return Err(ValidationError::duplicate("criterion", criterion.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            require_text("option.id", &option.id)?;
            require_text("option.name", &option.name)?;
            if !seen.insert(option.id.as_str()) {
                return Err(ValidationError::duplicate("option", option.id.clone()));
            }
        }

        for (option_id, ranges) in &self.score_ranges {
            for (criterion_id, range) in ranges {
                if !range.min.is_finite() || !range.max.is_finite() {
                    return Err(ValidationError::invalid_format(
                        "score_ranges",
                        format!("non-finite bound for {}/{}", option_id, criterion_id),
                    ));
                }
            }
        }

        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Decision {
        Decision::new("Which laptop?")
            .with_criterion(Criterion::new("price", "Price", 8))
            .with_criterion(Criterion::new("battery", "Battery", 5))
            .with_option(DecisionOption::new("a", "Air").with_score("price", 6))
            .with_option(DecisionOption::new("b", "Pro").with_score("price", 3))
    }

    #[test]
    fn valid_decision_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn duplicate_criterion_id_is_rejected() {
        let decision = sample().with_criterion(Criterion::new("price", "Cost again", 2));
        assert_eq!(
            decision.validate(),
            Err(ValidationError::duplicate("criterion", "price"))
        );
    }

    #[test]
    fn duplicate_option_id_is_rejected() {
        let decision = sample().with_option(DecisionOption::new("a", "Another"));
        assert_eq!(decision.validate(), Err(ValidationError::duplicate("option", "a")));
    }

    #[test]
    fn blank_name_is_rejected() {
        let decision = sample().with_option(DecisionOption::new("c", "  "));
        assert_eq!(decision.validate(), Err(ValidationError::empty_field("option.name")));
    }

    #[test]
    fn nan_range_is_rejected() {
        let decision = sample().with_score_range("a", "price", ScoreRange::new(f64::NAN, 4.0));
        assert!(matches!(
            decision.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn score_ranges_are_grouped_by_option() {
        let decision = sample()
            .with_score_range("a", "price", ScoreRange::new(4.0, 8.0))
            .with_score_range("a", "battery", ScoreRange::new(2.0, 5.0));
        assert_eq!(decision.score_ranges["a"].len(), 2);
    }

    #[test]
    fn deserializes_without_id_or_timestamp() {
        let json = r#"{
            "title": "Move?",
            "criteria": [{"id": "c", "name": "Commute", "weight": 7}],
            "options": [{"id": "x", "name": "Stay", "scores": {"c": 4}}],
            "constraints": {"budget": "$2,000"},
            "score_ranges": {"x": {"c": {"min": 3, "max": 6}}}
        }"#;
        let decision: Decision = serde_json::from_str(json).unwrap();

        assert_eq!(decision.criteria[0].weight.value(), 7);
        assert_eq!(decision.options[0].name, "Stay");
        assert_eq!(
            decision.constraints.and_then(|c| c.budget_amount()),
            Some(2000.0)
        );
        assert_eq!(decision.score_ranges["x"]["c"], ScoreRange::new(3.0, 6.0));
    }
}
