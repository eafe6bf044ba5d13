//! Normalizer - rescales raw values onto the 0-10 desirability scale.

/// Lower bound of the desirability scale.
pub const SCALE_MIN: f64 = 0.0;

/// Upper bound of the desirability scale.
pub const SCALE_MAX: f64 = 10.0;

/// Value returned for degenerate bounds (`min == max`).
pub const SCALE_MIDPOINT: f64 = 5.0;

/// Linear rescaling onto the desirability scale.
pub struct Normalizer;

impl Normalizer {
    /// Rescales `value` from `[min, max]` to `[0, 10]`.
    ///
    /// # Edge Cases
    /// - `min == max`: returns the midpoint 5 instead of dividing by zero
    /// - Values outside `[min, max]` are extrapolated, not clamped
    pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
        if max == min {
            return SCALE_MIDPOINT;
        }
        (value - min) / (max - min) * SCALE_MAX
    }

    /// Rescales a value already expressed on the 0-10 input scale.
    ///
    /// Identity for the default bounds.
    pub fn normalize(value: f64) -> f64 {
        Self::normalize_score(value, SCALE_MIN, SCALE_MAX)
    }
}
