//! Power and linear scales.
//!
//! A power scale maps through `x ↦ sign(x)·|x|^k` before interpolating, which
//! compresses (`k < 1`) or expands (`k > 1`) the domain. The square-root scale
//! (`k = 0.5`) is the usual choice for sizing areas by value.

use super::continuous::Continuous;
use crate::transform::{Exponent, Identity, Power};

/// A continuous scale with a power transform.
pub type Pow = Continuous<Power>;

/// A continuous scale with no transform.
pub type Linear = Continuous<Identity>;

impl Continuous<Power> {
    /// Domain `[0, 1]`, range `[0, 1]`, exponent 1.
    pub fn new() -> Self {
        Self::with_exponent(1.0)
    }

    pub fn with_exponent(k: f64) -> Self {
        Self::with_transform(Power::new(Exponent::new(k)))
    }

    /// A power scale with exponent 0.5.
    pub fn sqrt() -> Self {
        Self::with_exponent(0.5)
    }

    pub fn exponent(&self) -> f64 {
        self.transform().exponent().get()
    }

    /// Changes the exponent. Domain and range are left as they are.
    ///
    /// An exponent of 0 collapses every domain value to 1, so the scale maps
    /// everything to its first range value and inverts everything to its
    /// first domain value.
    pub fn set_exponent(&mut self, k: f64) -> &mut Self {
        self.transform().exponent().set(k);
        self.invalidate();
        self
    }
}

impl Continuous<Identity> {
    pub fn new() -> Self {
        Self::with_transform(Identity)
    }
}

/// A power scale with exponent 1.
pub fn pow() -> Pow {
    Pow::new()
}

/// A power scale with exponent 0.5.
pub fn sqrt() -> Pow {
    Pow::sqrt()
}

/// A linear scale.
pub fn linear() -> Linear {
    Linear::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::InterpolatorFactory;
    use crate::Value;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-6
    }

    fn number(v: Value) -> f64 {
        v.to_number()
    }

    #[test]
    fn test_defaults() {
        let s = pow();
        assert_eq!(s.domain(), vec![0.0, 1.0]);
        assert_eq!(s.range(), vec![Value::from(0.0), Value::from(1.0)]);
        assert!(!s.clamp());
        assert_eq!(s.exponent(), 1.0);
        assert_eq!(s.interpolate(), s.interpolate());
    }

    #[test]
    fn test_sqrt_factory() {
        let s = sqrt();
        assert_eq!(s.exponent(), 0.5);
        assert!(close(number(s.apply(0.25)), 0.5));
    }

    #[test]
    fn test_exponent_half() {
        let mut s = pow();
        s.set_exponent(0.5).set_domain([1.0, 2.0]);
        assert!(close(number(s.apply(1.0)), 0.0));
        assert!(close(number(s.apply(1.5)), 0.5425821));
        assert!(close(number(s.apply(2.0)), 1.0));
        assert!(close(s.invert(0.0), 1.0));
        assert!(close(s.invert(0.5425821), 1.5));
        assert!(close(s.invert(1.0), 2.0));
    }

    #[test]
    fn test_exponent_two_and_negative() {
        let mut s = pow();
        s.set_exponent(2.0).set_domain([1.0, 2.0]);
        assert!(close(number(s.apply(1.5)), 0.4166667));
        assert!(close(s.invert(0.4166667), 1.5));

        s.set_exponent(-1.0);
        assert!(close(number(s.apply(1.5)), 0.6666667));
        assert!(close(s.invert(0.6666667), 1.5));
    }

    #[test]
    fn test_negative_domain_keeps_sign() {
        let mut s = pow();
        s.set_exponent(0.5).set_domain([-4.0, 4.0]);
        assert!(close(number(s.apply(-1.0)), 0.25));
        assert!(close(number(s.apply(0.0)), 0.5));
        assert!(close(s.invert(0.25), -1.0));
    }

    #[test]
    fn test_exponent_keeps_domain_and_range() {
        let mut s = pow();
        s.set_domain([1.0, 2.0]).set_range([3.0, 4.0]);
        s.set_exponent(0.5);
        assert_eq!(s.domain(), vec![1.0, 2.0]);
        assert_eq!(s.range(), vec![Value::from(3.0), Value::from(4.0)]);
    }

    #[test]
    fn test_zero_exponent_is_degenerate() {
        let mut s = pow();
        s.set_exponent(0.0).set_range([10.0, 20.0]);
        assert_eq!(s.apply(0.3), 10.0);
        assert_eq!(s.apply(0.9), 10.0);
    }

    #[test]
    fn test_zero_exponent_inverts_to_domain_start() {
        let mut s = pow();
        s.set_exponent(0.0).set_domain([2.0, 3.0]);
        assert_eq!(s.invert(0.5), 2.0);
        assert_eq!(s.invert(7.0), 2.0);
    }

    #[test]
    fn test_shared_exponent_change_rebuilds_mappings() {
        let k = Exponent::new(1.0);
        let mut s = Pow::with_transform(Power::new(k.clone()));
        s.set_domain([0.0, 4.0]);
        assert_eq!(s.apply(1.0), 0.25);
        assert_eq!(s.invert(0.25), 1.0);

        k.set(0.5);
        assert_eq!(s.exponent(), 0.5);
        assert!(close(number(s.apply(1.0)), 0.5));
        assert!(close(s.invert(0.5), 1.0));
    }

    #[test]
    fn test_custom_interpolator() {
        let mut s = pow();
        let upper = InterpolatorFactory::new(|a, b| {
            let (a, b) = (a.to_string(), b.to_string());
            Box::new(move |t| Value::from(if t < 0.5 { a.to_uppercase() } else { b.to_uppercase() }))
        });
        s.set_range(["a", "b"]).set_interpolate(upper.clone());
        assert_eq!(s.interpolate(), upper);
        assert_eq!(s.apply(0.2), "A");
        assert_eq!(s.apply(0.8), "B");
    }

    #[test]
    fn test_copy_has_own_exponent() {
        let mut s = pow();
        s.set_exponent(2.0);
        let mut c = s.copy();
        c.set_exponent(0.5);
        assert_eq!(s.exponent(), 2.0);
        assert_eq!(c.exponent(), 0.5);
        assert!(close(number(s.apply(0.5)), 0.25));
        assert!(close(number(c.apply(0.25)), 0.5));
    }

    #[test]
    fn test_linear_factory() {
        let mut s = linear();
        s.set_domain([0.0, 10.0]).set_range([0.0, 100.0]);
        assert_eq!(s.apply(2.5), 25.0);
        assert_eq!(s.invert(75.0), 7.5);
    }
}
