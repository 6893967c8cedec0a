//! Decimal renderings of `f64` used by the formatter.

/// `x` with exactly `digits` fractional digits.
pub fn to_fixed(x: f64, digits: usize) -> String {
    format!("{x:.digits$}")
}

/// Scientific notation with an explicitly signed exponent (`2.1e+6`).
///
/// `digits` is the number of fractional mantissa digits; `None` gives the
/// shortest representation that round-trips.
pub fn to_exponential(x: f64, digits: Option<usize>) -> String {
    let raw = match digits {
        Some(digits) => format!("{x:.digits$e}"),
        None => format!("{x:e}"),
    };
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => raw,
    }
}

/// `x` with `precision` significant digits, switching to scientific
/// notation for very small or large magnitudes.
pub fn to_precision(x: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if x == 0.0 {
        return to_fixed(0.0, precision - 1);
    }
    let scientific = to_exponential(x, Some(precision - 1));
    let exponent = exponent_of(&scientific).unwrap_or(0);
    if exponent < -6 || exponent >= precision as i32 {
        scientific
    } else {
        let digits = (precision as i32 - 1 - exponent).max(0) as usize;
        to_fixed(x, digits)
    }
}

fn exponent_of(scientific: &str) -> Option<i32> {
    let (_, exp) = scientific.split_once('e')?;
    exp.trim_start_matches('+').parse().ok()
}

/// Significant digits and decimal exponent of a non-negative `x`.
///
/// `1230` with `precision` 2 gives `("12", 3)`. A `precision` of 0 uses the
/// shortest round-tripping digits. Non-finite input gives `None`.
pub fn decimal_parts(x: f64, precision: usize) -> Option<(String, i32)> {
    if !x.is_finite() {
        return None;
    }
    let digits = if precision == 0 { None } else { Some(precision - 1) };
    let scientific = to_exponential(x, digits);
    let (mantissa, _) = scientific.split_once('e')?;
    let exponent = exponent_of(&scientific)?;
    let coefficient: String = mantissa.chars().filter(|c| *c != '.' && *c != '-').collect();
    Some((coefficient, exponent))
}

/// Decimal exponent of `|x|`, i.e. the power of ten of its leading digit.
pub fn exponent(x: f64) -> Option<i32> {
    decimal_parts(x.abs(), 0).map(|(_, e)| e)
}

/// Rounds to `precision` significant digits and writes the result without
/// scientific notation.
pub fn format_rounded(x: f64, precision: usize) -> Option<String> {
    let (coefficient, exponent) = decimal_parts(x, precision)?;
    let len = coefficient.len() as i32;
    Some(if exponent < 0 {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), coefficient)
    } else if len > exponent + 1 {
        let (int, frac) = coefficient.split_at((exponent + 1) as usize);
        format!("{int}.{frac}")
    } else {
        format!("{}{}", coefficient, "0".repeat((exponent - len + 1) as usize))
    })
}

/// Drops trailing zeros after the decimal point, and the point itself if
/// nothing remains (`"1.500"` → `"1.5"`, `"2.0e+1"` → `"2e+1"`).
pub fn trim_insignificant(s: &str) -> String {
    let (mantissa, rest) = match s.find(['e', 'E']) {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };
    if !mantissa.contains('.') {
        return s.to_owned();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{rest}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(2.1, Some(0)), "2e+0");
        assert_eq!(to_exponential(2.01, Some(1)), "2.0e+0");
        assert_eq!(to_exponential(0.001, None), "1e-3");
        assert_eq!(to_exponential(1234.5, Some(2)), "1.23e+3");
    }

    #[test]
    fn test_to_precision() {
        assert_eq!(to_precision(2.1, 1), "2");
        assert_eq!(to_precision(2.01, 2), "2.0");
        assert_eq!(to_precision(9.99, 2), "10");
        assert_eq!(to_precision(0.0, 3), "0.00");
        assert_eq!(to_precision(123456.0, 2), "1.2e+5");
        assert_eq!(to_precision(0.00000012, 2), "1.2e-7");
    }

    #[test]
    fn test_decimal_parts() {
        assert_eq!(decimal_parts(1230.0, 2), Some(("12".to_owned(), 3)));
        assert_eq!(decimal_parts(0.05, 0), Some(("5".to_owned(), -2)));
        assert_eq!(decimal_parts(f64::NAN, 0), None);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(exponent(0.1), Some(-1));
        assert_eq!(exponent(-250.0), Some(2));
        assert_eq!(exponent(0.0), Some(0));
        assert_eq!(exponent(f64::INFINITY), None);
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(2.1e6, 1).as_deref(), Some("2000000"));
        assert_eq!(format_rounded(2.11e6, 2).as_deref(), Some("2100000"));
        assert_eq!(format_rounded(20.1, 3).as_deref(), Some("20.1"));
        assert_eq!(format_rounded(0.0123, 2).as_deref(), Some("0.012"));
    }

    #[test]
    fn test_trim_insignificant() {
        assert_eq!(trim_insignificant("1.500"), "1.5");
        assert_eq!(trim_insignificant("2.0"), "2");
        assert_eq!(trim_insignificant("2.0e+1"), "2e+1");
        assert_eq!(trim_insignificant("100"), "100");
    }
}
