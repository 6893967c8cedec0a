//! Continuous scales and their tick machinery.

pub mod continuous;
pub mod linear;
pub mod piecewise;
pub mod pow;
pub mod tick_format;
pub mod util;

pub use continuous::{Continuous, DEFAULT_TICK_COUNT};
pub use linear::TickIter;
pub use pow::{linear, pow, sqrt, Linear, Pow};
pub use tick_format::tick_format;
