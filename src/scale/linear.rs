//! Tick and nice primitives on a plain linear extent.
//!
//! Step sizes are drawn from `{1, 2, 5} × 10ⁿ`. A raw step of
//! `(stop - start) / count` is rounded to whichever of those it is nearest
//! to on a log scale (the thresholds are `√2`, `√10` and `√50`).
//!
//! Steps below one are carried as their reciprocal (an *inverse* increment,
//! returned negated by [`tick_increment`]) so that ticks such as `0.3` come
//! out as `3 / 10` rather than the drifting `3 × 0.1`.
//!
//! Everything here is generic over [`num_traits::Float`].
//!
//! # Examples
//!
//! ```rust
//! use powscale::scale::linear::{nice_extent, ticks};
//!
//! assert_eq!(ticks(0.0, 1.0, 5.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
//! assert_eq!(ticks(1.0, 0.0, 2.0), vec![1.0, 0.5, 0.0]);
//! assert_eq!(nice_extent(12.0, 87.0, 5.0), Some((0.0, 100.0)));
//! ```

use num_traits::Float;

/// Upper bound on refinement passes in [`nice_extent`].
const MAX_NICE_ITERATIONS: usize = 10;

fn lit<D: Float>(v: f64) -> D {
    D::from(v).unwrap_or_else(D::nan)
}

/// The `{1, 2, 5, 10}` multiplier closest to `error` in log space.
fn step_factor<D: Float>(error: D) -> D {
    if error >= lit::<D>(50.0).sqrt() {
        lit(10.0)
    } else if error >= lit::<D>(10.0).sqrt() {
        lit(5.0)
    } else if error >= lit::<D>(2.0).sqrt() {
        lit(2.0)
    } else {
        D::one()
    }
}

/// True for finite, positive, whole tick counts.
pub fn is_valid_count<D: Float>(count: D) -> bool {
    count.is_finite() && count > D::zero() && count.fract() == D::zero()
}

/// Tick spacing for an ascending extent.
///
/// Returns the step itself when it is at least one, and `-1 / step` when it
/// is smaller. Non-finite results mean no usable step exists.
pub fn tick_increment<D: Float>(start: D, stop: D, count: D) -> D {
    let ten = lit::<D>(10.0);
    let step = (stop - start) / count.max(D::zero());
    let power = step.log10().floor();
    let error = step / ten.powf(power);
    let factor = step_factor(error);
    if power >= D::zero() {
        factor * ten.powf(power)
    } else {
        -ten.powf(-power) / factor
    }
}

/// Signed tick spacing between `start` and `stop`, negative when `stop < start`.
pub fn tick_step<D: Float>(start: D, stop: D, count: D) -> D {
    let ten = lit::<D>(10.0);
    let raw = (stop - start).abs() / count.max(D::zero());
    let base = ten.powf(raw.log10().floor());
    let step = base * step_factor(raw / base);
    if stop < start { -step } else { step }
}

#[derive(Debug, Clone, Copy)]
enum Spacing<D> {
    /// value = index × step
    Step(D),
    /// value = index / inverse
    Inverse(D),
}

/// Iterator over the multiples of a tick increment within an extent.
///
/// Values are computed from their index rather than accumulated, so the
/// last tick lands exactly on a round bound instead of drifting past it.
#[derive(Debug, Clone)]
pub struct TickIter<D: Float> {
    first: D,
    len: usize,
    index: usize,
    spacing: Spacing<D>,
}

impl<D: Float> TickIter<D> {
    /// Ticks in ascending order over `[lo, hi]` for an increment from
    /// [`tick_increment`].
    pub fn new(lo: D, hi: D, increment: D) -> Self {
        let (first, last, spacing) = if increment > D::zero() {
            (
                (lo / increment).ceil(),
                (hi / increment).floor(),
                Spacing::Step(increment),
            )
        } else {
            let inverse = -increment;
            (
                (lo * inverse).ceil(),
                (hi * inverse).floor(),
                Spacing::Inverse(inverse),
            )
        };

        let len = if last >= first {
            (last - first + D::one()).to_usize().unwrap_or(0)
        } else {
            0
        };

        Self {
            first,
            len,
            index: 0,
            spacing,
        }
    }
}

impl<D: Float> Iterator for TickIter<D> {
    type Item = D;

    fn next(&mut self) -> Option<D> {
        if self.index >= self.len {
            return None;
        }
        let offset: D = D::from(self.index)?;
        self.index += 1;
        let n = self.first + offset;
        Some(match self.spacing {
            Spacing::Step(step) => n * step,
            Spacing::Inverse(inverse) => n / inverse,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<D: Float> ExactSizeIterator for TickIter<D> {}

/// Evenly spaced round values within `[start, stop]`, inclusive.
///
/// The output runs in the same direction as the input. A collapsed extent
/// yields its single value. A `count` that is not a finite positive integer
/// yields nothing.
pub fn ticks<D: Float>(start: D, stop: D, count: D) -> Vec<D> {
    if !is_valid_count(count) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let increment = tick_increment(lo, hi, count);
    if increment == D::zero() || !increment.is_finite() {
        return Vec::new();
    }

    let mut out: Vec<D> = TickIter::new(lo, hi, increment).collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Extends `[start, stop]` outward to multiples of the tick step.
///
/// The step is recomputed on the widened extent until it stops changing.
/// Returns the new `(start, stop)` in the input's orientation, or `None` when
/// the extent is degenerate or no stable step is found.
pub fn nice_extent<D: Float>(start: D, stop: D, count: D) -> Option<(D, D)> {
    if !is_valid_count(count) || start == stop || start.is_nan() || stop.is_nan() {
        return None;
    }

    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous: Option<D> = None;

    for _ in 0..MAX_NICE_ITERATIONS {
        let step = tick_increment(lo, hi, count);
        if previous == Some(step) {
            return Some(if reverse { (hi, lo) } else { (lo, hi) });
        }
        if step > D::zero() {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < D::zero() {
            let inverse = -step;
            lo = (lo * inverse).floor() / inverse;
            hi = (hi * inverse).ceil() / inverse;
        } else {
            break;
        }
        previous = Some(step);
    }

    log::debug!("nice step did not settle for extent [{:?}, {:?}]", start.to_f64(), stop.to_f64());
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_increment() {
        assert_eq!(tick_increment(0.0, 1.0, 10.0), -10.0);
        assert_eq!(tick_increment(0.0, 1.0, 3.0), -2.0);
        assert_eq!(tick_increment(-100.0, 100.0, 10.0), 20.0);
        assert_eq!(tick_increment(12.0, 87.0, 5.0), 20.0);
        assert!(!tick_increment(0.0, 1.0, 0.0).is_finite());
    }

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(0.0, 9.0, 10.0), 1.0);
        assert_eq!(tick_step(0.0, 1e6, 10.0), 1e5);
        assert!((tick_step(0.19, 0.21, 10.0) - 0.002).abs() < 1e-15);
        assert_eq!(tick_step(1.0, 0.0, 10.0), -0.1);
    }

    #[test]
    fn test_ticks_unit_extent() {
        let tenths = vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
        let fifths = vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        for count in [10.0, 9.0, 8.0] {
            assert_eq!(ticks(0.0, 1.0, count), tenths, "count {count}");
        }
        for count in [7.0, 6.0, 5.0, 4.0] {
            assert_eq!(ticks(0.0, 1.0, count), fifths, "count {count}");
        }
        assert_eq!(ticks(0.0, 1.0, 3.0), vec![0.0, 0.5, 1.0]);
        assert_eq!(ticks(0.0, 1.0, 2.0), vec![0.0, 0.5, 1.0]);
        assert_eq!(ticks(0.0, 1.0, 1.0), vec![0.0, 1.0]);
    }

    #[test]
    fn test_ticks_symmetric_extent() {
        let twenties = vec![-100.0, -80.0, -60.0, -40.0, -20.0, 0.0, 20.0, 40.0, 60.0, 80.0, 100.0];
        let fifties = vec![-100.0, -50.0, 0.0, 50.0, 100.0];
        for count in [10.0, 9.0, 8.0, 7.0] {
            assert_eq!(ticks(-100.0, 100.0, count), twenties, "count {count}");
        }
        for count in [6.0, 5.0, 4.0, 3.0] {
            assert_eq!(ticks(-100.0, 100.0, count), fifties, "count {count}");
        }
        assert_eq!(ticks(-100.0, 100.0, 2.0), vec![-100.0, 0.0, 100.0]);
        assert_eq!(ticks(-100.0, 100.0, 1.0), vec![0.0]);
    }

    #[test]
    fn test_ticks_descending() {
        assert_eq!(ticks(1.0, 0.0, 3.0), vec![1.0, 0.5, 0.0]);
        assert_eq!(ticks(100.0, -100.0, 2.0), vec![100.0, 0.0, -100.0]);
    }

    #[test]
    fn test_ticks_invalid_counts() {
        for count in [f64::NAN, 0.0, -1.0, f64::INFINITY, 2.5] {
            assert!(ticks(0.0, 1.0, count).is_empty(), "count {count}");
        }
    }

    #[test]
    fn test_ticks_collapsed() {
        assert_eq!(ticks(0.5, 0.5, 10.0), vec![0.5]);
    }

    #[test]
    fn test_ticks_f32() {
        let t: Vec<f32> = ticks(0.0f32, 1.0, 5.0);
        assert_eq!(t.len(), 6);
        assert_eq!(t[5], 1.0);
    }

    #[test]
    fn test_tick_iter_len() {
        let iter = TickIter::new(0.0, 1.0, -10.0);
        assert_eq!(iter.len(), 11);
    }

    #[test]
    fn test_nice_extent() {
        assert_eq!(nice_extent(0.0, 0.96, 10.0), Some((0.0, 1.0)));
        assert_eq!(nice_extent(0.0, 96.0, 10.0), Some((0.0, 100.0)));
        assert_eq!(nice_extent(96.0, 0.0, 10.0), Some((100.0, 0.0)));
        assert_eq!(nice_extent(0.0, -0.96, 10.0), Some((0.0, -1.0)));
        assert_eq!(nice_extent(-96.0, 0.0, 10.0), Some((-100.0, 0.0)));
        assert_eq!(nice_extent(1.1, 10.9, 10.0), Some((1.0, 11.0)));
        assert_eq!(nice_extent(0.7, 11.001, 10.0), Some((0.0, 12.0)));
        assert_eq!(nice_extent(123.1, 6.7, 10.0), Some((130.0, 0.0)));
        assert_eq!(nice_extent(0.0, 0.49, 10.0), Some((0.0, 0.5)));
    }

    #[test]
    fn test_nice_extent_count() {
        assert_eq!(nice_extent(12.0, 87.0, 5.0), Some((0.0, 100.0)));
        assert_eq!(nice_extent(12.0, 87.0, 10.0), Some((10.0, 90.0)));
        assert_eq!(nice_extent(12.0, 87.0, 100.0), Some((12.0, 87.0)));
    }

    #[test]
    fn test_nice_extent_degenerate() {
        assert_eq!(nice_extent(0.0, 0.0, 10.0), None);
        assert_eq!(nice_extent(0.5, 0.5, 10.0), None);
        assert_eq!(nice_extent(0.0, 1.0, 0.0), None);
    }
}
