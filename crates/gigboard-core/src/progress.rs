//! Range normalization for progress display
//!
//! Turns a raw value plus bounds into a clamped percentage and display text.
//! Every gauge, bar, and report column that shows progress goes through here.

use thiserror::Error;

/// Fixed description shown while progress is indeterminate.
pub const LOADING_TEXT: &str = "Loading...";

/// Rejected progress bounds: min must be strictly below max.
///
/// Callers must not render a progress indicator for a rejected range.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Invalid progress range: min {min} must be less than max {max}")]
pub struct InvalidRange {
    pub min: f64,
    pub max: f64,
}

/// A validated progress range.
///
/// Construction enforces `min < max`, so percentage computation over a
/// `ProgressRange` can never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRange {
    min: f64,
    max: f64,
}

impl ProgressRange {
    /// Validate bounds. `!(min < max)` rather than `min >= max` so NaN
    /// bounds are rejected too.
    pub fn new(min: f64, max: f64) -> Result<Self, InvalidRange> {
        if !(min < max) {
            return Err(InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The common 0..100 scale.
    pub fn percent() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp a raw value into the range. An absent or non-finite value is
    /// treated as the minimum.
    pub fn clamp(&self, value: Option<f64>) -> f64 {
        match value {
            Some(v) if v.is_finite() => v.clamp(self.min, self.max),
            _ => self.min,
        }
    }

    /// Normalize a raw value against this range.
    pub fn normalize(&self, value: Option<f64>, indeterminate: bool) -> Normalized {
        if indeterminate {
            return Normalized::loading();
        }

        let clamped = self.clamp(value);
        let percentage = percentage_between(clamped, self.min, self.max);
        Normalized {
            percentage: Some(percentage),
            value: Some(clamped),
            display_text: display_percent(percentage),
        }
    }
}

impl Default for ProgressRange {
    fn default() -> Self {
        Self::percent()
    }
}

/// Result of normalizing a raw value into a displayable progress state.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Percentage in [0, 100]. None while indeterminate.
    pub percentage: Option<f64>,
    /// Clamped raw value. None while indeterminate.
    pub value: Option<f64>,
    /// Status-line text: "42%", or the fixed loading text.
    pub display_text: String,
}

impl Normalized {
    fn loading() -> Self {
        Self {
            percentage: None,
            value: None,
            display_text: LOADING_TEXT.to_string(),
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        self.percentage.is_none()
    }

    /// Rounded percentage for gauge widgets. 0 while indeterminate.
    pub fn percent_u16(&self) -> u16 {
        self.percentage
            .map(|p| p.round().clamp(0.0, 100.0) as u16)
            .unwrap_or(0)
    }
}

/// Normalize a raw value against arbitrary bounds.
///
/// Fails fast when `min >= max`; the caller must not render a progress
/// indicator in that case.
pub fn normalize(
    value: Option<f64>,
    min: f64,
    max: f64,
    indeterminate: bool,
) -> Result<Normalized, InvalidRange> {
    let range = ProgressRange::new(min, max)?;
    Ok(range.normalize(value, indeterminate))
}

/// Normalize against the default 0..100 scale. Infallible: the default
/// bounds always validate.
pub fn normalize_percent(value: Option<f64>, indeterminate: bool) -> Normalized {
    ProgressRange::percent().normalize(value, indeterminate)
}

fn display_percent(percentage: f64) -> String {
    format!("{}%", percentage.round() as i64)
}

fn percentage_between(clamped: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        // Unreachable through a validated ProgressRange; kept so a zero
        // span can never divide.
        return 0.0;
    }
    (clamped - min) / span * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(result: &Normalized) -> f64 {
        result.percentage.unwrap_or(f64::NAN)
    }

    #[test]
    fn test_midpoint_is_fifty_percent() {
        let n = normalize(Some(50.0), 0.0, 100.0, false).unwrap();
        assert_eq!(pct(&n), 50.0);
        assert_eq!(n.display_text, "50%");
        assert_eq!(n.value, Some(50.0));
    }

    #[test]
    fn test_value_above_max_clamps_to_full() {
        let n = normalize(Some(150.0), 0.0, 100.0, false).unwrap();
        assert_eq!(pct(&n), 100.0);
        assert_eq!(n.display_text, "100%");
        assert_eq!(n.value, Some(100.0));
    }

    #[test]
    fn test_value_below_min_clamps_to_zero() {
        let n = normalize(Some(-10.0), 0.0, 100.0, false).unwrap();
        assert_eq!(pct(&n), 0.0);
        assert_eq!(n.display_text, "0%");
        assert_eq!(n.value, Some(0.0));
    }

    #[test]
    fn test_absent_value_is_treated_as_min() {
        let n = normalize(None, 0.0, 100.0, false).unwrap();
        assert_eq!(pct(&n), 0.0);
        assert_eq!(n.display_text, "0%");

        let offset = normalize(None, 20.0, 40.0, false).unwrap();
        assert_eq!(pct(&offset), 0.0);
        assert_eq!(offset.value, Some(20.0));
    }

    #[test]
    fn test_equal_bounds_are_rejected() {
        let err = normalize(Some(5.0), 5.0, 5.0, false).unwrap_err();
        assert_eq!(err, InvalidRange { min: 5.0, max: 5.0 });
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        assert!(normalize(Some(10.0), 100.0, 0.0, false).is_err());
    }

    #[test]
    fn test_nan_bounds_are_rejected() {
        assert!(normalize(Some(10.0), f64::NAN, 100.0, false).is_err());
        assert!(normalize(Some(10.0), 0.0, f64::NAN, false).is_err());
    }

    #[test]
    fn test_proportionality_over_offset_range() {
        // percentage == (value - min) / (max - min) * 100
        let n = normalize(Some(30.0), 20.0, 40.0, false).unwrap();
        assert!((pct(&n) - 50.0).abs() < f64::EPSILON);

        let n = normalize(Some(25.0), 20.0, 40.0, false).unwrap();
        assert!((pct(&n) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display_text_rounds_to_nearest_integer() {
        let n = normalize(Some(1.0), 0.0, 3.0, false).unwrap();
        // 33.33..% rounds down
        assert_eq!(n.display_text, "33%");

        let n = normalize(Some(2.0), 0.0, 3.0, false).unwrap();
        // 66.66..% rounds up
        assert_eq!(n.display_text, "67%");
    }

    #[test]
    fn test_indeterminate_omits_numeric_output() {
        let n = normalize(Some(50.0), 0.0, 100.0, true).unwrap();
        assert!(n.is_indeterminate());
        assert_eq!(n.percentage, None);
        assert_eq!(n.value, None);
        assert_eq!(n.display_text, LOADING_TEXT);
    }

    #[test]
    fn test_indeterminate_still_validates_bounds() {
        assert!(normalize(None, 5.0, 5.0, true).is_err());
    }

    #[test]
    fn test_zero_span_guard_is_dead_code_behind_validation() {
        // The guard itself returns 0 for a zero span...
        assert_eq!(percentage_between(5.0, 5.0, 5.0), 0.0);
        // ...but validation rejects equal bounds before it can ever run.
        assert!(ProgressRange::new(5.0, 5.0).is_err());
        assert!(normalize(Some(5.0), 5.0, 5.0, false).is_err());
    }

    #[test]
    fn test_non_finite_value_is_treated_as_absent() {
        let n = normalize(Some(f64::NAN), 0.0, 100.0, false).unwrap();
        assert_eq!(pct(&n), 0.0);

        let n = normalize(Some(f64::INFINITY), 0.0, 100.0, false).unwrap();
        assert_eq!(pct(&n), 0.0);
    }

    #[test]
    fn test_percent_u16_for_gauges() {
        let n = normalize_percent(Some(74.6), false);
        assert_eq!(n.percent_u16(), 75);

        let loading = normalize_percent(Some(74.6), true);
        assert_eq!(loading.percent_u16(), 0);
    }

    #[test]
    fn test_invalid_range_message_names_both_bounds() {
        let err = ProgressRange::new(9.0, 3.0).unwrap_err();
        let text = err.to_string();
        assert!(text.contains('9'));
        assert!(text.contains('3'));
    }
}
