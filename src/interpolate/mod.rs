//! Interpolator registry.
//!
//! An interpolator maps a parameter `t` in `[0, 1]` to a value between two
//! range endpoints. [`interpolate_value`] picks the rule from the shape of the
//! endpoints actually present:
//!
//! | Endpoints | Rule |
//! |---|---|
//! | two numbers | linear |
//! | two color strings | channel-wise RGB, output as `#rrggbb` |
//! | two strings with the same text around their numbers | numbers interpolated in place |
//! | two arrays | element-wise, recursively |
//! | two objects | key-wise over shared keys, recursively |
//! | anything else | discrete: `a` below `t = 0.5`, `b` from there on |
//!
//! # Examples
//!
//! ```rust
//! use powscale::{interpolate::interpolate_value, Value};
//!
//! let i = interpolate_value(&Value::from("red"), &Value::from("blue"));
//! assert_eq!(i(0.5), "#800080");
//!
//! let i = interpolate_value(&Value::from("0px"), &Value::from("2px"));
//! assert_eq!(i(0.5), "1px");
//! ```

pub mod color;
pub mod string;

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::Value;

/// A function from `t` in `[0, 1]` to an intermediate value.
pub type Interpolator = Box<dyn Fn(f64) -> Value>;

type FactoryFn = dyn Fn(&Value, &Value) -> Interpolator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FactoryKind {
    Value,
    Round,
    Custom,
}

/// Builds an [`Interpolator`] for each adjacent pair of range values.
///
/// Cloning shares the underlying function; two factories compare equal only
/// when they are clones of one another.
#[derive(Clone)]
pub struct InterpolatorFactory {
    inner: Rc<FactoryFn>,
    kind: FactoryKind,
}

impl InterpolatorFactory {
    /// Wraps a custom factory function.
    ///
    /// ```rust
    /// use powscale::{interpolate::InterpolatorFactory, Value};
    ///
    /// let last = InterpolatorFactory::new(|_a, b| {
    ///     let b = b.clone();
    ///     Box::new(move |_t| b.clone())
    /// });
    /// let i = last.interpolate(&Value::from(1.0), &Value::from(2.0));
    /// assert_eq!(i(0.1), 2.0);
    /// ```
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&Value, &Value) -> Interpolator + 'static,
    {
        Self {
            inner: Rc::new(factory),
            kind: FactoryKind::Custom,
        }
    }

    /// The shape-dispatched default, [`interpolate_value`].
    pub fn value() -> Self {
        Self {
            inner: Rc::new(interpolate_value),
            kind: FactoryKind::Value,
        }
    }

    /// Numeric interpolation rounded to the nearest integer.
    pub fn round() -> Self {
        Self {
            inner: Rc::new(interpolate_round),
            kind: FactoryKind::Round,
        }
    }

    pub fn interpolate(&self, a: &Value, b: &Value) -> Interpolator {
        (self.inner)(a, b)
    }

    pub(crate) fn kind(&self) -> FactoryKind {
        self.kind
    }
}

impl Default for InterpolatorFactory {
    fn default() -> Self {
        Self::value()
    }
}

impl PartialEq for InterpolatorFactory {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for InterpolatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolatorFactory")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Linear interpolation between two numbers.
///
/// Exact at both ends: `t = 0` yields `a` and `t = 1` yields `b`.
pub fn interpolate_number(a: f64, b: f64) -> impl Fn(f64) -> f64 + Clone {
    move |t| a * (1.0 - t) + b * t
}

/// Numeric interpolation with the result rounded; endpoints are coerced to numbers.
pub fn interpolate_round(a: &Value, b: &Value) -> Interpolator {
    let lerp = interpolate_number(a.to_number(), b.to_number());
    Box::new(move |t| Value::Number(lerp(t).round()))
}

/// Shape-dispatched interpolation; see the [module docs](self).
pub fn interpolate_value(a: &Value, b: &Value) -> Interpolator {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let lerp = interpolate_number(*a, *b);
            Box::new(move |t| Value::Number(lerp(t)))
        }
        (Value::String(sa), Value::String(sb)) => color::interpolate_rgb(sa, sb)
            .or_else(|| string::interpolate_string(sa, sb))
            .unwrap_or_else(|| interpolate_discrete(a, b)),
        (Value::Array(xa), Value::Array(xb)) => interpolate_array(xa, xb),
        (Value::Object(ma), Value::Object(mb)) => interpolate_object(ma, mb),
        (_, Value::Null) => {
            let b = b.clone();
            Box::new(move |_| b.clone())
        }
        _ => interpolate_discrete(a, b),
    }
}

/// Jumps from `a` to `b` at `t = 0.5`.
pub fn interpolate_discrete(a: &Value, b: &Value) -> Interpolator {
    let (a, b) = (a.clone(), b.clone());
    Box::new(move |t| if t < 0.5 { a.clone() } else { b.clone() })
}

/// Element-wise over the shared prefix; trailing elements of `a` are kept as-is.
pub fn interpolate_array(a: &[Value], b: &[Value]) -> Interpolator {
    let shared = a.len().min(b.len());
    let parts: Vec<Interpolator> = a
        .iter()
        .zip(b)
        .map(|(x, y)| interpolate_value(x, y))
        .collect();
    let rest: Vec<Value> = a[shared..].to_vec();
    Box::new(move |t| {
        let mut out: Vec<Value> = parts.iter().map(|part| part(t)).collect();
        out.extend(rest.iter().cloned());
        Value::Array(out)
    })
}

/// Key-wise over the keys of `a`; keys missing from `b` keep `a`'s value.
pub fn interpolate_object(a: &BTreeMap<String, Value>, b: &BTreeMap<String, Value>) -> Interpolator {
    let mut parts: Vec<(String, Interpolator)> = Vec::new();
    let mut fixed: BTreeMap<String, Value> = BTreeMap::new();
    for (key, x) in a {
        match b.get(key) {
            Some(y) => parts.push((key.clone(), interpolate_value(x, y))),
            None => {
                fixed.insert(key.clone(), x.clone());
            }
        }
    }
    Box::new(move |t| {
        let mut out = fixed.clone();
        for (key, part) in &parts {
            out.insert(key.clone(), part(t));
        }
        Value::Object(out)
    })
}
