//! Strings with embedded numbers, e.g. `"0px"` to `"2px"`.
//!
//! Both strings are split into literal text and numeric runs. When the
//! literal text matches piece for piece, the numbers are interpolated and
//! the text is kept verbatim.

use super::{interpolate_number, Interpolator};
use crate::format::decimal::to_exponential;
use crate::Value;

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Number(f64),
}

/// Splits `s` into text and number pieces.
///
/// A number is an optional sign, digits with an optional fraction (or a bare
/// fraction such as `.5`), and an optional exponent.
fn split(s: &str) -> Vec<Piece> {
    let bytes = s.as_bytes();
    let mut pieces = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match scan_number(bytes, i) {
            Some(end) => {
                if text_start < i {
                    pieces.push(Piece::Text(s[text_start..i].to_owned()));
                }
                let number = s[i..end].parse::<f64>().unwrap_or(f64::NAN);
                pieces.push(Piece::Number(number));
                i = end;
                text_start = end;
            }
            None => i += 1,
        }
    }
    if text_start < bytes.len() {
        pieces.push(Piece::Text(s[text_start..].to_owned()));
    }
    pieces
}

/// Returns the end of a number starting at `start`, if one starts there.
fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = start;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_end = digits(i);
    let mut end = int_end;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits(end + 1);
        if int_end > i || frac_end > end + 1 {
            end = frac_end;
        }
    }
    if end == i {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_end = digits(j);
        if exp_end > j {
            end = exp_end;
        }
    }
    Some(end)
}

fn skeleton(pieces: &[Piece]) -> Vec<Option<&str>> {
    pieces
        .iter()
        .map(|p| match p {
            Piece::Text(t) => Some(t.as_str()),
            Piece::Number(_) => None,
        })
        .collect()
}

/// Interpolates the numbers inside two strings, or `None` when the text
/// around them differs.
pub fn interpolate_string(a: &str, b: &str) -> Option<Interpolator> {
    let start = split(a);
    let end = split(b);
    if skeleton(&start) != skeleton(&end) {
        return None;
    }

    let parts: Vec<Part> = start
        .into_iter()
        .zip(end)
        .map(|pair| match pair {
            (Piece::Number(x), Piece::Number(y)) => Part::Lerp(Box::new(interpolate_number(x, y))),
            (Piece::Text(t), _) => Part::Text(t),
            (Piece::Number(x), Piece::Text(_)) => Part::Text(number_to_string(x)),
        })
        .collect();

    Some(Box::new(move |t| {
        let mut out = String::new();
        for part in &parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Lerp(lerp) => out.push_str(&number_to_string(lerp(t))),
            }
        }
        Value::String(out)
    }))
}

enum Part {
    Text(String),
    Lerp(Box<dyn Fn(f64) -> f64>),
}

/// Shortest round-tripping text for `n`, in exponent form (`2e+21`, `1e-7`)
/// once the magnitude reaches `1e21` or drops below `1e-6`.
fn number_to_string(n: f64) -> String {
    // no "-0"
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.is_infinite() {
        return if n < 0.0 { "-Infinity" } else { "Infinity" }.to_owned();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        return to_exponential(n, None);
    }
    n.to_string()
}
