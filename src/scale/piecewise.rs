//! Piecewise mapping between breakpoints.
//!
//! Given input breakpoints `d[0..n]` and output breakpoints `r[0..n]`, each
//! adjacent pair forms a segment that normalizes its input span to `[0, 1]`
//! and hands the result to an interpolator between its two outputs.
//!
//! The same builder serves both directions of a scale: forward maps
//! transformed domain values to range values, reverse maps numeric range
//! values back to transformed domain values.
//!
//! - Lengths that differ are truncated to the shorter; extras are ignored.
//! - A descending input is reversed (with its outputs) before searching.
//! - Inputs beyond either end extrapolate along the end segment.
//! - An input equal to a breakpoint uses the segment starting there.
//! - Fewer than two breakpoints, or all breakpoints equal, map everything to
//!   the first output.

use std::fmt;

/// One segment's interpolator, taking a normalized parameter.
pub type Segment<R> = Box<dyn Fn(f64) -> R>;

enum Pieces<R> {
    Empty,
    Constant(R),
    Segments {
        breaks: Vec<f64>,
        spans: Vec<(f64, f64)>,
        segments: Vec<Segment<R>>,
    },
}

/// A built piecewise mapping from `f64` to `R`.
pub struct Piecewise<R> {
    pieces: Pieces<R>,
}

/// Maps `x` to its position within `[a, b]`.
///
/// A zero-width span maps everything to `0`; a span with a non-finite end
/// maps everything to `NaN`.
pub fn normalize(a: f64, b: f64, x: f64) -> f64 {
    if !(a.is_finite() && b.is_finite()) {
        return f64::NAN;
    }
    let span = b - a;
    if span == 0.0 {
        return 0.0;
    }
    (x - a) / span
}

impl<R: Clone> Piecewise<R> {
    /// Builds the mapping; `interpolate` is called once per segment with its
    /// two output endpoints.
    pub fn build<F>(inputs: &[f64], outputs: &[R], mut interpolate: F) -> Self
    where
        F: FnMut(&R, &R) -> Segment<R>,
    {
        let n = inputs.len().min(outputs.len());
        if inputs.len() != outputs.len() {
            log::debug!(
                "piecewise lengths differ ({} inputs, {} outputs); using {}",
                inputs.len(),
                outputs.len(),
                n
            );
        }
        if n == 0 {
            return Self {
                pieces: Pieces::Empty,
            };
        }

        let inputs = &inputs[..n];
        if n < 2 || inputs.iter().all(|x| *x == inputs[0]) {
            return Self {
                pieces: Pieces::Constant(outputs[0].clone()),
            };
        }

        let mut breaks = inputs.to_vec();
        let mut ends = outputs[..n].to_vec();
        if breaks[n - 1] < breaks[0] {
            breaks.reverse();
            ends.reverse();
        }

        let spans: Vec<(f64, f64)> = breaks.windows(2).map(|w| (w[0], w[1])).collect();
        let segments: Vec<Segment<R>> = ends.windows(2).map(|w| interpolate(&w[0], &w[1])).collect();
        log::trace!("built piecewise mapping with {} segment(s)", segments.len());

        Self {
            pieces: Pieces::Segments {
                breaks,
                spans,
                segments,
            },
        }
    }

    /// Maps `x`; `None` only when there were no breakpoints at all.
    pub fn evaluate(&self, x: f64) -> Option<R> {
        match &self.pieces {
            Pieces::Empty => None,
            Pieces::Constant(value) => Some(value.clone()),
            Pieces::Segments {
                breaks,
                spans,
                segments,
            } => {
                let i = segment_index(breaks, x);
                let (a, b) = spans[i];
                Some((segments[i])(normalize(a, b, x)))
            }
        }
    }

    pub fn segment_count(&self) -> usize {
        match &self.pieces {
            Pieces::Segments { segments, .. } => segments.len(),
            _ => 0,
        }
    }
}

/// Index of the segment containing `x` among ascending `breaks`.
///
/// Clamped to the first and last segment; ties go to the segment whose
/// start equals `x`.
fn segment_index(breaks: &[f64], x: f64) -> usize {
    let last = breaks.len() - 1;
    breaks[1..last].partition_point(|b| *b <= x)
}

impl<R> fmt::Debug for Piecewise<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pieces {
            Pieces::Empty => f.write_str("Piecewise::Empty"),
            Pieces::Constant(_) => f.write_str("Piecewise::Constant"),
            Pieces::Segments { breaks, .. } => {
                f.debug_struct("Piecewise").field("breaks", breaks).finish()
            }
        }
    }
}
