//! The continuous scale facade shared by power and linear scales.
//!
//! A [`Continuous`] scale owns a numeric domain, a range of [`Value`]s, an
//! interpolator factory, a clamp flag, and a domain [`Transform`]. Mapping
//! composes `transform → piecewise interpolation`; inversion composes
//! `piecewise reverse → transform⁻¹`. Both piecewise mappings are built
//! lazily and dropped whenever the configuration changes.
//!
//! Getters return owned copies, so neither caller-held collections nor
//! sibling scales (after [`Continuous::copy`]) can alias a scale's state.
//!
//! # Examples
//!
//! ```rust
//! use powscale::scale::pow;
//!
//! let mut s = pow();
//! s.set_domain([1.0, 2.0]).set_range([0.0, 10.0]);
//!
//! assert_eq!(s.apply(1.5), 5.0);
//! assert_eq!(s.invert(5.0), 1.5);
//!
//! s.set_clamp(true);
//! assert_eq!(s.apply(3.0), 10.0);
//! ```

use std::cell::{RefCell, RefMut};
use std::fmt;

use super::linear::{self, nice_extent};
use super::piecewise::Piecewise;
use super::tick_format::tick_format;
use super::util::{clamp_to, extent_of_ends, sorted_pair};
use crate::format::Formatter;
use crate::interpolate::{interpolate_number, InterpolatorFactory};
use crate::transform::Transform;
use crate::{ScaleError, Value};

/// Tick count used by [`Continuous::nice`], [`Continuous::ticks`] and
/// [`Continuous::tick_format`] when none is given.
pub const DEFAULT_TICK_COUNT: f64 = 10.0;

/// A built mapping keyed by the transform parameter it was built under.
struct Cached<M> {
    parameter: u64,
    mapping: M,
}

/// The reverse mapping; `collapsed` holds `domain[0]` when every
/// participating domain value transforms to the same point.
struct Reverse {
    mapping: Piecewise<f64>,
    collapsed: Option<f64>,
}

/// Borrows the cached mapping, rebuilding it if the parameter moved.
fn current<M>(cell: &RefCell<Option<Cached<M>>>, parameter: f64, build: impl FnOnce() -> M) -> RefMut<'_, M> {
    let key = parameter.to_bits();
    let mut slot = cell.borrow_mut();
    if matches!(&*slot, Some(cached) if cached.parameter != key) {
        log::trace!("transform parameter changed to {parameter}; rebuilding");
        *slot = None;
    }
    RefMut::map(slot, |slot| {
        &mut slot
            .get_or_insert_with(|| Cached {
                parameter: key,
                mapping: build(),
            })
            .mapping
    })
}

pub struct Continuous<T: Transform> {
    domain: Vec<f64>,
    range: Vec<Value>,
    interpolate: InterpolatorFactory,
    clamp: bool,
    transform: T,
    forward: RefCell<Option<Cached<Piecewise<Value>>>>,
    reverse: RefCell<Option<Cached<Reverse>>>,
}

impl<T: Transform> Continuous<T> {
    /// A scale over `transform` with domain `[0, 1]`, range `[0, 1]`, no
    /// clamping and the default interpolator.
    pub fn with_transform(transform: T) -> Self {
        Self {
            domain: vec![0.0, 1.0],
            range: vec![Value::Number(0.0), Value::Number(1.0)],
            interpolate: InterpolatorFactory::default(),
            clamp: false,
            transform,
            forward: RefCell::new(None),
            reverse: RefCell::new(None),
        }
    }

    pub(crate) fn transform(&self) -> &T {
        &self.transform
    }

    /// Drops the built mappings; the next apply/invert rebuilds them.
    pub(crate) fn invalidate(&mut self) {
        *self.forward.get_mut() = None;
        *self.reverse.get_mut() = None;
    }

    pub fn domain(&self) -> Vec<f64> {
        self.domain.clone()
    }

    /// Sets the domain, coercing each entry to a number.
    ///
    /// Numeric strings parse, date-times become epoch milliseconds, and
    /// anything else becomes `NaN`.
    pub fn set_domain<I, V>(&mut self, domain: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.domain = domain.into_iter().map(|v| v.into().to_number()).collect();
        self.invalidate();
        self
    }

    pub fn range(&self) -> Vec<Value> {
        self.range.clone()
    }

    /// Sets the range. Values are stored as given.
    pub fn set_range<I, V>(&mut self, range: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.range = range.into_iter().map(Into::into).collect();
        self.invalidate();
        self
    }

    /// Sets the range and installs the rounding interpolator.
    pub fn set_range_round<I, V>(&mut self, range: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.set_range(range).set_interpolate(InterpolatorFactory::round())
    }

    pub fn clamp(&self) -> bool {
        self.clamp
    }

    pub fn set_clamp(&mut self, clamp: bool) -> &mut Self {
        self.clamp = clamp;
        self
    }

    /// Sets the clamp flag from a value's truthiness.
    pub fn set_clamp_truthy(&mut self, clamp: &Value) -> &mut Self {
        self.set_clamp(clamp.is_truthy())
    }

    pub fn interpolate(&self) -> InterpolatorFactory {
        self.interpolate.clone()
    }

    /// Replaces the interpolator factory used between adjacent range values.
    pub fn set_interpolate(&mut self, factory: InterpolatorFactory) -> &mut Self {
        self.interpolate = factory;
        self.invalidate();
        self
    }

    /// Maps a domain value to the range.
    ///
    /// Returns [`Value::Null`] when the range is empty.
    pub fn apply<V: Into<Value>>(&self, x: V) -> Value {
        let mut x = x.into().to_number();
        if self.clamp {
            if let Some((lo, hi)) = extent_of_ends(&self.domain, self.range.len()) {
                x = clamp_to(x, lo, hi);
            }
        }

        let mapping = current(&self.forward, self.transform.parameter(), || self.build_forward());
        mapping.evaluate(self.transform.forward(x)).unwrap_or_default()
    }

    /// Maps a range value back to the domain.
    ///
    /// Returns `NaN` when the range values around `y` are not numeric, or
    /// when the domain or range is empty.
    pub fn invert<V: Into<Value>>(&self, y: V) -> f64 {
        let mut y = y.into().to_number();
        let n = self.domain.len().min(self.range.len());
        if n == 0 {
            return f64::NAN;
        }
        if self.clamp {
            let (lo, hi) = sorted_pair(self.range[0].to_number(), self.range[n - 1].to_number());
            y = clamp_to(y, lo, hi);
        }

        let reverse = current(&self.reverse, self.transform.parameter(), || self.build_reverse());
        if let Some(x) = reverse.collapsed {
            return x;
        }
        reverse
            .mapping
            .evaluate(y)
            .map_or(f64::NAN, |t| self.transform.inverse(t))
    }

    fn transformed_domain(&self) -> Vec<f64> {
        self.domain.iter().map(|x| self.transform.forward(*x)).collect()
    }

    fn build_forward(&self) -> Piecewise<Value> {
        let factory = &self.interpolate;
        Piecewise::build(&self.transformed_domain(), &self.range, |a, b| factory.interpolate(a, b))
    }

    fn build_reverse(&self) -> Reverse {
        let range: Vec<f64> = self.range.iter().map(Value::to_number).collect();
        let transformed = self.transformed_domain();
        let n = transformed.len().min(range.len());
        let collapsed = (n > 0 && transformed[..n].iter().all(|t| *t == transformed[0])).then(|| self.domain[0]);
        let mapping = Piecewise::build(&range, &transformed, |a, b| Box::new(interpolate_number(*a, *b)));
        Reverse { mapping, collapsed }
    }

    /// Extends the first and last domain values outward to round tick
    /// multiples. Interior breakpoints are left alone; a collapsed domain is
    /// unchanged.
    pub fn nice(&mut self, count: impl Into<Option<f64>>) -> &mut Self {
        let count = count.into().unwrap_or(DEFAULT_TICK_COUNT);
        let Some(last) = self.domain.len().checked_sub(1) else {
            return self;
        };
        if let Some((start, stop)) = nice_extent(self.domain[0], self.domain[last], count) {
            self.domain[0] = start;
            self.domain[last] = stop;
            self.invalidate();
        }
        self
    }

    /// Round values spanning the domain's extent, ordered like the domain.
    ///
    /// Empty when the domain is empty or holds a `NaN`.
    pub fn ticks(&self, count: impl Into<Option<f64>>) -> Vec<f64> {
        let count = count.into().unwrap_or(DEFAULT_TICK_COUNT);
        let (Some(&first), Some(&last)) = (self.domain.first(), self.domain.last()) else {
            return Vec::new();
        };
        if self.domain.iter().any(|x| x.is_nan()) {
            return Vec::new();
        }
        let lo = self.domain.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.domain.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut ticks = linear::ticks(lo, hi, count);
        if last < first {
            ticks.reverse();
        }
        ticks
    }

    /// A formatter for this scale's tick values.
    ///
    /// `specifier` defaults to `",f"`; its precision, when unset, is derived
    /// from the tick step.
    pub fn tick_format(&self, count: impl Into<Option<f64>>, specifier: Option<&str>) -> Result<Formatter, ScaleError> {
        let count = count.into().unwrap_or(DEFAULT_TICK_COUNT);
        let start = self.domain.first().copied().unwrap_or(f64::NAN);
        let stop = self.domain.last().copied().unwrap_or(f64::NAN);
        tick_format(start, stop, count, specifier)
    }

    /// An independent scale with the same configuration.
    pub fn copy(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            range: self.range.clone(),
            interpolate: self.interpolate.clone(),
            clamp: self.clamp,
            transform: self.transform.detach(),
            forward: RefCell::new(None),
            reverse: RefCell::new(None),
        }
    }
}

impl<T: Transform + Default> Default for Continuous<T> {
    fn default() -> Self {
        Self::with_transform(T::default())
    }
}

impl<T: Transform> Clone for Continuous<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: Transform + fmt::Debug> fmt::Debug for Continuous<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuous")
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("clamp", &self.clamp)
            .field("interpolate", &self.interpolate)
            .field("transform", &self.transform)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Identity;

    fn linear() -> Continuous<Identity> {
        Continuous::with_transform(Identity)
    }

    #[test]
    fn test_defaults() {
        let s = linear();
        assert_eq!(s.domain(), vec![0.0, 1.0]);
        assert_eq!(s.range(), vec![Value::from(0.0), Value::from(1.0)]);
        assert!(!s.clamp());
        assert_eq!(s.apply(0.25), 0.25);
    }

    #[test]
    fn test_cache_invalidated_by_setters() {
        let mut s = linear();
        assert_eq!(s.apply(0.5), 0.5);
        s.set_range([0.0, 100.0]);
        assert_eq!(s.apply(0.5), 50.0);
        assert_eq!(s.invert(50.0), 0.5);
        s.set_domain([0.0, 2.0]);
        assert_eq!(s.apply(0.5), 25.0);
        assert_eq!(s.invert(50.0), 1.0);
    }

    #[test]
    fn test_empty_domain_or_range() {
        let mut s = linear();
        s.set_range(Vec::<f64>::new());
        assert_eq!(s.apply(0.5), Value::Null);
        assert!(s.invert(0.5).is_nan());

        let mut s = linear();
        s.set_domain(Vec::<f64>::new());
        assert_eq!(s.apply(0.5), Value::Null);
        assert!(s.ticks(None).is_empty());
    }

    #[test]
    fn test_degenerate_domain_maps_to_first_range_value() {
        let mut s = linear();
        s.set_domain([1.0, 1.0]).set_range([10.0, 20.0]);
        assert_eq!(s.apply(0.0), 10.0);
        assert_eq!(s.apply(5.0), 10.0);
        assert_eq!(s.invert(15.0), 1.0);
    }

    #[test]
    fn test_clamp_uses_participating_ends() {
        let mut s = linear();
        s.set_domain([0.0, 1.0, 2.0]).set_range([0.0, 10.0]).set_clamp(true);
        assert_eq!(s.apply(5.0), 10.0);
        assert_eq!(s.apply(-1.0), 0.0);
    }

    #[test]
    fn test_clamp_truthy() {
        let mut s = linear();
        s.set_clamp_truthy(&Value::from("yes"));
        assert!(s.clamp());
        s.set_clamp_truthy(&Value::from(0.0));
        assert!(!s.clamp());
        s.set_clamp_truthy(&Value::Null);
        assert!(!s.clamp());
    }

    #[test]
    fn test_range_round() {
        let mut s = linear();
        s.set_range_round([0.0, 10.0]);
        assert_eq!(s.apply(0.59), 6.0);
        assert_eq!(s.interpolate().kind(), crate::interpolate::FactoryKind::Round);
    }

    #[test]
    fn test_ticks_follow_domain_direction() {
        let mut s = linear();
        s.set_domain([1.0, 0.0]);
        assert_eq!(s.ticks(2.0), vec![1.0, 0.5, 0.0]);
        s.set_domain([0.0, 2.0, 1.0]);
        assert_eq!(s.ticks(2.0), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_nice_touches_only_ends() {
        let mut s = linear();
        s.set_domain([0.5, 0.7, 9.3]).nice(None);
        assert_eq!(s.domain(), vec![0.0, 0.7, 10.0]);
    }

    #[test]
    fn test_nan_domain_gives_no_ticks_and_no_nice() {
        let mut s = linear();
        s.set_domain(["zero", "1"]);
        assert!(s.ticks(10.0).is_empty());
        s.set_domain([0.0, f64::NAN, 0.96]);
        assert!(s.ticks(None).is_empty());

        s.set_domain(["zero", "1"]).nice(None);
        let domain = s.domain();
        assert!(domain[0].is_nan());
        assert_eq!(domain[1], 1.0);
    }

    #[test]
    fn test_copy_detaches_caches() {
        let mut s = linear();
        s.set_range([0.0, 10.0]);
        assert_eq!(s.apply(0.5), 5.0);
        let mut c = s.copy();
        c.set_range([0.0, 20.0]);
        assert_eq!(s.apply(0.5), 5.0);
        assert_eq!(c.apply(0.5), 10.0);
    }
}
