//! Weight value object (1 to 10 importance scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Relative importance of a criterion: 1 (minor) to 10 (critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weight(u8);

impl Weight {
    /// Lowest allowed weight.
    pub const MIN: Self = Self(1);

    /// Weight used when none is given.
    pub const NEUTRAL: Self = Self(5);

    /// Highest allowed weight.
    pub const MAX: Self = Self(10);

    /// Creates a new Weight, clamping to the 1-10 range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Creates a Weight, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValidationError::out_of_range(
                "weight",
                i64::from(Self::MIN.0),
                i64::from(Self::MAX.0),
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as f64 for weighted arithmetic.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    /// Every valid weight from lowest to highest.
    pub fn all() -> impl DoubleEndedIterator<Item = Weight> {
        (Self::MIN.0..=Self::MAX.0).map(Weight)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<u8> for Weight {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Weight> for u8 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
