//! Power scales
//!
//! `powscale` maps a numeric domain onto a range of numbers, colors, strings or
//! nested structures through a power-law transform, and maps numeric ranges
//! back again. It also picks human-friendly axis extents and tick values, and
//! builds label formatters sized to the tick spacing.
//!
//! # Core Concepts
//!
//! ## Scales
//!
//! A scale holds a domain (numeric breakpoints), a range (output breakpoints
//! of any [`Value`] shape), a clamp flag and an interpolator factory. Each
//! adjacent pair of breakpoints forms an independent segment, so domains with
//! more than two entries produce piecewise ("polylinear") mappings.
//!
//! Available scale types:
//! - [`scale::Pow`] - `sign(x)·|x|^k` before interpolating
//! - [`scale::Linear`] - no transform
//!
//! ## Values
//!
//! Range values are [`Value`]s. The default interpolator dispatches on their
//! shape: numbers interpolate linearly, color strings channel-wise in RGB,
//! strings with embedded numbers number-by-number, and arrays and objects
//! element-wise.
//!
//! ## Transforms
//!
//! A [`Transform`] is applied to domain values before they are normalized.
//! The power transform reads its exponent from a shared [`transform::Exponent`]
//! cell so the exponent can change without touching domain or range.
//!
//! # Examples
//!
//! ## Square-root Scale
//!
//! ```rust
//! use powscale::scale::sqrt;
//!
//! let mut s = sqrt();
//! s.set_domain([0.0, 100.0]).set_range([0.0, 10.0]);
//!
//! assert_eq!(s.apply(25.0), 5.0);
//! assert_eq!(s.invert(5.0), 25.0);
//! ```
//!
//! ## Color Ranges
//!
//! ```rust
//! use powscale::scale::pow;
//!
//! let mut s = pow();
//! s.set_domain([-10.0, 0.0, 100.0]).set_range(["red", "white", "green"]);
//!
//! assert_eq!(s.apply(-5.0), "#ff8080");
//! assert_eq!(s.apply(50.0), "#80c080");
//! ```
//!
//! ## Nice Domains and Ticks
//!
//! ```rust
//! use powscale::scale::pow;
//!
//! let mut s = pow();
//! s.set_domain([12.0, 87.0]).nice(5.0);
//! assert_eq!(s.domain(), vec![0.0, 100.0]);
//!
//! let ticks = s.ticks(5.0);
//! assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
//!
//! let label = s.tick_format(5.0, None).unwrap();
//! assert_eq!(label.format(ticks[1]), "20");
//! ```
//!

pub mod config;
pub mod error;
pub mod format;
pub mod interpolate;
pub mod scale;
pub mod transform;
pub mod value;

pub use num_traits::Float;
pub use config::ScaleConfig;
pub use error::ScaleError;
pub use format::{format, FormatSpecifier, Formatter};
pub use interpolate::InterpolatorFactory;
pub use scale::{Continuous, Linear, Pow};
pub use transform::Transform;
pub use value::Value;
