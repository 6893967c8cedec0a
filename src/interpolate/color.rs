//! Color strings: detection, parsing, and RGB interpolation.
//!
//! Parsing is delegated to `csscolorparser`, which understands hex, named
//! colors and the `rgb()`/`rgba()`/`hsl()`/`hsla()` functional forms.
//! Interpolated colors are written back as `#rrggbb`, or as `rgba(...)` when
//! the result is translucent.

use super::{interpolate_number, Interpolator};
use crate::Value;

/// A color in 0–255 RGB channels plus opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub opacity: f64,
}

impl Rgb {
    /// Parses a color string, or `None` when the text is not a color.
    ///
    /// ```rust
    /// use powscale::interpolate::color::Rgb;
    ///
    /// let red = Rgb::parse("#f00").unwrap();
    /// assert_eq!((red.r, red.g, red.b), (255.0, 0.0, 0.0));
    /// assert!(Rgb::parse("2px").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        if !looks_like_color(s) {
            return None;
        }
        let parsed = csscolorparser::parse(s).ok()?;
        Some(Self {
            r: channel(f64::from(parsed.r)),
            g: channel(f64::from(parsed.g)),
            b: channel(f64::from(parsed.b)),
            opacity: snap(f64::from(parsed.a)),
        })
    }

    /// `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        let opacity = if self.opacity.is_nan() {
            1.0
        } else {
            self.opacity.clamp(0.0, 1.0)
        };
        if opacity >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                opacity
            )
        }
    }
}

// csscolorparser stores channels as f32 in [0, 1]; snap away the noise so
// that e.g. hsl blue comes back as exactly 255.
fn channel(unit: f64) -> f64 {
    snap(unit * 255.0)
}

fn snap(v: f64) -> f64 {
    (v * 1e4).round() / 1e4
}

fn byte(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Cheap pre-check before handing text to the parser.
///
/// Accepts `#...`, the functional forms, and alphabetic words. Words made
/// only of hex digits (`"bad"`, `"face"`) are rejected since the parser
/// would read them as prefix-less hex.
pub fn looks_like_color(s: &str) -> bool {
    let s = s.trim();
    if s.starts_with('#') {
        return true;
    }
    let lower = s.to_ascii_lowercase();
    const FUNCTIONS: [&str; 6] = ["rgb(", "rgba(", "hsl(", "hsla(", "hwb(", "hwba("];
    if FUNCTIONS.iter().any(|f| lower.starts_with(f)) {
        return true;
    }
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphabetic())
        && !s.chars().all(|c| c.is_ascii_hexdigit())
}

/// RGB interpolation between two color strings, or `None` if either is not a color.
pub fn interpolate_rgb(a: &str, b: &str) -> Option<Interpolator> {
    let start = Rgb::parse(a)?;
    let end = Rgb::parse(b)?;
    let r = interpolate_number(start.r, end.r);
    let g = interpolate_number(start.g, end.g);
    let bl = interpolate_number(start.b, end.b);
    let opacity = interpolate_number(start.opacity, end.opacity);
    Some(Box::new(move |t| {
        let color = Rgb {
            r: r(t),
            g: g(t),
            b: bl(t),
            opacity: opacity(t),
        };
        Value::String(color.to_css())
    }))
}
