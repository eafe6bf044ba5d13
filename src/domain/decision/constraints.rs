//! Constraints - soft limits that penalize but never eliminate options.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Soft constraints attached to a decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// Budget with currency-like formatting, e.g. "$50,000".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Target date, "YYYY-MM-DD" or RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Constraints {
    /// Creates constraints with only a budget.
    pub fn with_budget(budget: impl Into<String>) -> Self {
        Self {
            budget: Some(budget.into()),
            ..Self::default()
        }
    }

    /// Returns the budget as a positive amount, or None if absent,
    /// unparsable or not positive.
    pub fn budget_amount(&self) -> Option<f64> {
        self.budget
            .as_deref()
            .and_then(parse_amount)
            .filter(|amount| *amount > 0.0)
    }

    /// Returns the deadline as a calendar date, or None if absent or unparsable.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        let raw = self.deadline.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

/// Parses a currency-formatted amount such as "$1,250.50" or "€ 900".
///
/// Everything except digits, '.', and '-' is discarded before parsing.
/// Returns None when nothing numeric remains or the result is not finite.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}
