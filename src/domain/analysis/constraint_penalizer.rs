//! Constraint Penalizer - soft budget and compliance penalties.
//!
//! Constraints never eliminate an option. Each applicable check multiplies a
//! penalty factor that starts at 1.0; the product always stays in (0, 1].

use serde::{Deserialize, Serialize};

use crate::domain::decision::{parse_amount, Constraints, DecisionOption};

/// Cost/budget ratio above which the severe penalty applies.
pub const SEVERE_OVERRUN_RATIO: f64 = 1.5;

/// Cost/budget ratio above which an option is "close to budget".
pub const NEAR_BUDGET_RATIO: f64 = 0.9;

const SEVERE_OVERRUN_FACTOR: f64 = 0.5;
const OVERRUN_SLOPE: f64 = 0.6;
const OVERRUN_FLOOR: f64 = 0.7;
const NEAR_BUDGET_FACTOR: f64 = 0.95;

const COMPLIANCE_FLOOR: f64 = 0.7;
const COMPLIANCE_SPAN: f64 = 0.3;
const COMPLIANCE_WARNING_BELOW: f64 = 5.0;
const COMPLIANCE_SEVERE_BELOW: f64 = 3.0;

/// Which constraint a violation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Budget,
    Compliance,
}

/// How badly a constraint is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    /// Moderate and severe violations are surfaced as warnings.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Moderate | Severity::Severe)
    }
}

/// A single soft-constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,
}

impl ConstraintViolation {
    /// Creates a new violation record.
    pub fn new(kind: ViolationKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
        }
    }
}

/// Cumulative penalty for one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintPenalty {
    /// Product of all applicable sub-penalties, in (0, 1].
    pub factor: f64,
    /// Budget violations first, then compliance.
    pub violations: Vec<ConstraintViolation>,
}

impl ConstraintPenalty {
    /// No penalty.
    pub fn none() -> Self {
        Self {
            factor: 1.0,
            violations: Vec::new(),
        }
    }
}

impl Default for ConstraintPenalty {
    fn default() -> Self {
        Self::none()
    }
}

/// Soft-constraint penalty computation.
pub struct ConstraintPenalizer;

impl ConstraintPenalizer {
    /// Computes the penalty factor and violations for an option.
    ///
    /// # Budget
    /// Applies only when the budget parses to a positive amount and the
    /// option's estimated cost parses to a number. With `ratio = cost / budget`:
    /// - `ratio > 1.5`: factor x0.5, severe
    /// - `1.0 < ratio <= 1.5`: factor x max(0.7, 1 - (ratio - 1) * 0.6), moderate
    /// - `0.9 < ratio <= 1.0`: factor x0.95, minor
    /// - otherwise no penalty
    ///
    /// # Compliance
    /// When present (clamped to 0-10): factor x (0.7 + compliance / 10 * 0.3).
    /// Below 5 adds a violation, severe below 3.
    pub fn calculate_constraint_penalty(
        option: &DecisionOption,
        constraints: &Constraints,
    ) -> ConstraintPenalty {
        let mut penalty = ConstraintPenalty::none();

        if let Some((factor, violation)) = Self::budget_penalty(option, constraints) {
            penalty.factor *= factor;
            penalty.violations.extend(violation);
        }

        if let Some((factor, violation)) = Self::compliance_penalty(option) {
            penalty.factor *= factor;
            penalty.violations.extend(violation);
        }

        penalty
    }

    fn budget_penalty(
        option: &DecisionOption,
        constraints: &Constraints,
    ) -> Option<(f64, Option<ConstraintViolation>)> {
        let budget = constraints.budget_amount()?;
        let raw_cost = option.estimated_cost.as_deref()?;
        let cost = parse_amount(raw_cost)?;
        let raw_budget = constraints.budget.as_deref().unwrap_or_default().trim();
        let raw_cost = raw_cost.trim();

        let ratio = cost / budget;
        let overrun_percent = ((ratio - 1.0) * 100.0).round();

        let result = if ratio > SEVERE_OVERRUN_RATIO {
            (
                SEVERE_OVERRUN_FACTOR,
                Some(ConstraintViolation::new(
                    ViolationKind::Budget,
                    Severity::Severe,
                    format!(
                        "Estimated cost {} exceeds the budget of {} by {}%",
                        raw_cost, raw_budget, overrun_percent
                    ),
                )),
            )
        } else if ratio > 1.0 {
            (
                (1.0 - (ratio - 1.0) * OVERRUN_SLOPE).max(OVERRUN_FLOOR),
                Some(ConstraintViolation::new(
                    ViolationKind::Budget,
                    Severity::Moderate,
                    format!(
                        "Estimated cost {} exceeds the budget of {} by {}%",
                        raw_cost, raw_budget, overrun_percent
                    ),
                )),
            )
        } else if ratio > NEAR_BUDGET_RATIO {
            (
                NEAR_BUDGET_FACTOR,
                Some(ConstraintViolation::new(
                    ViolationKind::Budget,
                    Severity::Minor,
                    format!(
                        "Estimated cost {} is within 10% of the budget of {}",
                        raw_cost, raw_budget
                    ),
                )),
            )
        } else {
            (1.0, None)
        };

        Some(result)
    }

    fn compliance_penalty(option: &DecisionOption) -> Option<(f64, Option<ConstraintViolation>)> {
        let compliance = option.constraint_compliance.filter(|c| !c.is_nan())?;
        let compliance = compliance.clamp(0.0, 10.0);

        let factor = COMPLIANCE_FLOOR + compliance / 10.0 * COMPLIANCE_SPAN;

        let violation = (compliance < COMPLIANCE_WARNING_BELOW).then(|| {
            let severity = if compliance < COMPLIANCE_SEVERE_BELOW {
                Severity::Severe
            } else {
                Severity::Moderate
            };
            ConstraintViolation::new(
                ViolationKind::Compliance,
                severity,
                format!("Constraint compliance is only {:.1}/10", compliance),
            )
        });

        Some((factor, violation))
    }
}
