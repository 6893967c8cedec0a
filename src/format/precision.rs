//! Precision hints derived from tick spacing.
//!
//! Each returns `None` when the step (or reference value) has no decimal
//! exponent, e.g. when it is `NaN` or infinite.

use super::decimal::exponent;

/// Fractional digits needed by a fixed-point format to tell ticks `step`
/// apart.
pub fn precision_fixed(step: f64) -> Option<i32> {
    Some((-exponent(step.abs())?).max(0))
}

/// Significant digits needed to tell ticks `step` apart at magnitudes up to
/// `max`.
pub fn precision_round(step: f64, max: f64) -> Option<i32> {
    let step = step.abs();
    let max = max.abs() - step;
    Some((exponent(max)? - exponent(step)?).max(0) + 1)
}

/// Fractional digits needed when values are shown in the SI unit of `value`.
pub fn precision_prefix(step: f64, value: f64) -> Option<i32> {
    let unit = (exponent(value)?.div_euclid(3)).clamp(-8, 8) * 3;
    Some((unit - exponent(step.abs())?).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_fixed() {
        assert_eq!(precision_fixed(0.1), Some(1));
        assert_eq!(precision_fixed(0.05), Some(2));
        assert_eq!(precision_fixed(20.0), Some(0));
        assert_eq!(precision_fixed(f64::NAN), None);
    }

    #[test]
    fn test_precision_round() {
        assert_eq!(precision_round(1.0, 9.0), Some(1));
        assert_eq!(precision_round(0.1, 9.0), Some(2));
        assert_eq!(precision_round(0.002, 0.21), Some(3));
    }

    #[test]
    fn test_precision_prefix() {
        assert_eq!(precision_prefix(1e5, 1e6), Some(1));
        assert_eq!(precision_prefix(1e4, 1e6), Some(2));
        assert_eq!(precision_prefix(1e6, 1e6), Some(0));
    }
}
