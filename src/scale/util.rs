/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Restrict `x` to `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics: `NaN` bounds leave `x` untouched.
pub fn clamp_to(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// `(first, last)` of the leading `n` entries, ordered as `(min, max)`.
pub fn extent_of_ends(values: &[f64], n: usize) -> Option<(f64, f64)> {
    let n = n.min(values.len());
    if n == 0 {
        return None;
    }
    Some(sorted_pair(values[0], values[n - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_pair() {
        assert_eq!(sorted_pair(2.0, 1.0), (1.0, 2.0));
        assert_eq!(sorted_pair(1, 2), (1, 2));
    }

    #[test]
    fn test_clamp_to_nan_bounds() {
        assert_eq!(clamp_to(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp_to(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp_to(0.5, f64::NAN, f64::NAN), 0.5);
    }

    #[test]
    fn test_extent_of_ends() {
        assert_eq!(extent_of_ends(&[100.0, 0.0, -10.0], 2), Some((0.0, 100.0)));
        assert_eq!(extent_of_ends(&[], 2), None);
    }
}
