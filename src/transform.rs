//! Domain-space transforms applied before piecewise interpolation.
//!
//! A continuous scale maps `x` to `interpolate(normalize(transform(x)))`, and
//! inverts with `transform⁻¹(denormalize(uninterpolate(y)))`. The transform
//! decides what "evenly spaced" means in the domain:
//!
//! - [`Identity`] - plain linear spacing
//! - [`Power`] - `sign(x)·|x|^k`, with `k` held in a shared [`Exponent`] cell
//!
//! # Examples
//!
//! ```rust
//! use powscale::transform::{Exponent, Power, Transform};
//!
//! let exponent = Exponent::new(2.0);
//! let power = Power::new(exponent.clone());
//!
//! assert_eq!(power.forward(-3.0), -9.0);
//! assert_eq!(power.inverse(-9.0), -3.0);
//!
//! // Both handles observe the same cell.
//! exponent.set(0.5);
//! assert_eq!(power.forward(4.0), 2.0);
//! ```

use std::cell::Cell;
use std::rc::Rc;

/// An invertible map applied to domain values.
pub trait Transform {
    fn forward(&self, x: f64) -> f64;

    fn inverse(&self, y: f64) -> f64;

    /// The transform's current tunable parameter. Mappings built from the
    /// transform are stale once this changes.
    fn parameter(&self) -> f64 {
        0.0
    }

    /// A copy that shares no mutable state with `self`.
    fn detach(&self) -> Self
    where
        Self: Sized;
}

/// The identity transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Transform for Identity {
    fn forward(&self, x: f64) -> f64 {
        x
    }

    fn inverse(&self, y: f64) -> f64 {
        y
    }

    fn detach(&self) -> Self {
        Identity
    }
}

/// A shared, mutable exponent.
///
/// Clones observe the same value; use [`Exponent::detach`] for an
/// independent cell.
#[derive(Debug, Clone)]
pub struct Exponent(Rc<Cell<f64>>);

impl Exponent {
    pub fn new(k: f64) -> Self {
        Self(Rc::new(Cell::new(k)))
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, k: f64) {
        self.0.set(k);
    }

    pub fn detach(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for Exponent {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Raise `x` to `k`, mirroring the sign for negative inputs.
fn raise(x: f64, k: f64) -> f64 {
    if x < 0.0 {
        -(-x).powf(k)
    } else {
        x.powf(k)
    }
}

/// Sign-preserving power transform: `x ↦ sign(x)·|x|^k`.
///
/// `k = 1` is exactly the identity, including for zero and negative inputs.
#[derive(Debug, Clone, Default)]
pub struct Power {
    exponent: Exponent,
}

impl Power {
    pub fn new(exponent: Exponent) -> Self {
        Self { exponent }
    }

    pub fn exponent(&self) -> &Exponent {
        &self.exponent
    }
}

impl Transform for Power {
    fn forward(&self, x: f64) -> f64 {
        let k = self.exponent.get();
        if k == 1.0 { x } else { raise(x, k) }
    }

    fn inverse(&self, y: f64) -> f64 {
        let k = self.exponent.get();
        if k == 1.0 { y } else { raise(y, 1.0 / k) }
    }

    fn parameter(&self) -> f64 {
        self.exponent.get()
    }

    fn detach(&self) -> Self {
        Self::new(self.exponent.detach())
    }
}
