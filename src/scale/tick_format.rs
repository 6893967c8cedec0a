//! Tick label formatters sized to the tick spacing.

use crate::format::{precision_fixed, precision_prefix, precision_round, FormatSpecifier, FormatType, Formatter};
use crate::scale::linear::tick_step;
use crate::ScaleError;

/// Specifier used when none is given.
pub const DEFAULT_SPECIFIER: &str = ",f";

/// Builds a formatter for ticks over `[start, stop]`.
///
/// When `specifier` carries no precision, one is derived from the tick step
/// so adjacent labels stay distinct without trailing noise. An explicit
/// precision is always kept.
pub fn tick_format(start: f64, stop: f64, count: f64, specifier: Option<&str>) -> Result<Formatter, ScaleError> {
    let mut spec: FormatSpecifier = specifier.unwrap_or(DEFAULT_SPECIFIER).parse()?;
    let step = tick_step(start, stop, count);
    let magnitude = start.abs().max(stop.abs());

    match spec.kind {
        FormatType::SiPrefix => {
            if spec.precision.is_none() {
                spec.precision = precision_prefix(step, magnitude);
            }
            return Ok(Formatter::with_si_prefix(spec, magnitude));
        }
        FormatType::None
        | FormatType::Exponent
        | FormatType::General
        | FormatType::PercentRounded
        | FormatType::Rounded => {
            if spec.precision.is_none() {
                let exponent_offset = i32::from(spec.kind == FormatType::Exponent);
                spec.precision = precision_round(step, magnitude).map(|p| p - exponent_offset);
            }
        }
        FormatType::Fixed | FormatType::Percent => {
            if spec.precision.is_none() {
                let percent_offset = if spec.kind == FormatType::Percent { 2 } else { 0 };
                spec.precision = precision_fixed(step).map(|p| p - percent_offset);
            }
        }
        _ => {}
    }

    log::trace!("tick format for [{start}, {stop}] resolved to {spec}");
    Ok(Formatter::new(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(start: f64, stop: f64, count: f64, specifier: Option<&str>, value: f64) -> String {
        tick_format(start, stop, count, specifier).unwrap().format(value)
    }

    #[test]
    fn test_default_specifier() {
        assert_eq!(label(0.0, 1.0, 10.0, None, 0.2), "0.2");
        assert_eq!(label(0.0, 1.0, 20.0, None, 0.2), "0.20");
        assert_eq!(label(-0.1, 0.0, 10.0, None, -0.02), "-0.02");
        assert_eq!(label(0.0, 10000.0, 10.0, None, 2000.0), "2,000");
    }

    #[test]
    fn test_percent() {
        assert_eq!(label(0.0, 1.0, 10.0, Some("+%"), 0.2), "+20%");
        assert_eq!(label(0.19, 0.21, 10.0, Some("+%"), 0.2), "+20.0%");
    }

    #[test]
    fn test_significant_types() {
        assert_eq!(label(0.0, 9.0, 10.0, Some(""), 2.1), "2");
        assert_eq!(label(0.0, 9.0, 100.0, Some(""), 2.11), "2.1");
        assert_eq!(label(0.0, 9.0, 10.0, Some("e"), 2.1), "2e+0");
        assert_eq!(label(0.0, 9.0, 100.0, Some("e"), 2.01), "2.0e+0");
        assert_eq!(label(0.0, 9e6, 10.0, Some("r"), 2.1e6), "2000000");
        assert_eq!(label(0.0, 9e6, 100.0, Some("r"), 2.11e6), "2100000");
        assert_eq!(label(0.0, 0.9, 10.0, Some("p"), 0.21), "20%");
        assert_eq!(label(0.19, 0.21, 10.0, Some("p"), 0.201), "20.1%");
    }

    #[test]
    fn test_si_prefix() {
        assert_eq!(label(0.0, 1e6, 10.0, Some("$s"), 0.51e6), "$0.5M");
        assert_eq!(label(0.0, 1e6, 100.0, Some("$s"), 0.501e6), "$0.50M");
    }

    #[test]
    fn test_explicit_precision_is_kept() {
        assert_eq!(label(0.0, 1.0, 10.0, Some(".3f"), 0.2), "0.200");
    }

    #[test]
    fn test_invalid_specifier() {
        assert!(matches!(
            tick_format(0.0, 1.0, 10.0, Some("nope")),
            Err(ScaleError::InvalidSpecifier(_))
        ));
    }
}
