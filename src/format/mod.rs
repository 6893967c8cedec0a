//! Number formatting for tick labels.
//!
//! A [`FormatSpecifier`] follows the grammar
//!
//! ```text
//! [[fill]align][sign][symbol][0][width][,][.precision][~][type]
//! ```
//!
//! | Part | Values |
//! |---|---|
//! | align | `<` left, `>` right, `^` center, `=` pad after the sign |
//! | sign | `-` (default), `+`, `(` for accounting negatives, ` ` |
//! | symbol | `$` currency prefix, `#` radix prefix for `b o x X` |
//! | `0` | zero padding (implies fill `0`, align `=`) |
//! | `,` | thousands separators |
//! | `~` | trim insignificant trailing zeros |
//! | type | `e f g r s % p d b o x X`, `n` (`,g`), or none |
//!
//! # Examples
//!
//! ```rust
//! use powscale::format::format;
//!
//! assert_eq!(format(",.2f").unwrap().format(12345.678), "12,345.68");
//! assert_eq!(format("+.0%").unwrap().format(0.2), "+20%");
//! assert_eq!(format(".2s").unwrap().format(42e6), "42M");
//! assert!(format("invalid!").is_err());
//! ```

pub mod decimal;
pub mod precision;

use std::fmt;
use std::str::FromStr;

use crate::ScaleError;
use decimal::{decimal_parts, format_rounded, to_exponential, to_fixed, to_precision, trim_insignificant};

pub use precision::{precision_fixed, precision_prefix, precision_round};

/// SI prefixes from yocto (10⁻²⁴) to yotta (10²⁴).
const PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

fn si_prefix(unit_exponent: i32) -> &'static str {
    PREFIXES[(8 + unit_exponent / 3) as usize]
}

/// Power of ten (a multiple of 3, within the SI table) naming `value`'s unit.
fn si_unit_exponent(value: f64) -> i32 {
    decimal::exponent(value)
        .map(|e| e.div_euclid(3).clamp(-8, 8) * 3)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Right,
    Center,
    /// Padding goes between the sign/symbol and the digits.
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Align::Left => '<',
            Align::Right => '>',
            Align::Center => '^',
            Align::AfterSign => '=',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    /// Only negatives are signed.
    #[default]
    Minus,
    Plus,
    /// Negatives are wrapped in parentheses.
    Parens,
    /// Positives get a leading space.
    Space,
}

impl Sign {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Sign::Minus),
            '+' => Some(Sign::Plus),
            '(' => Some(Sign::Parens),
            ' ' => Some(Sign::Space),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Sign::Minus => '-',
            Sign::Plus => '+',
            Sign::Parens => '(',
            Sign::Space => ' ',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Currency,
    Radix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatType {
    /// Like `g` with insignificant zeros trimmed; precision defaults to 12.
    #[default]
    None,
    Exponent,
    Fixed,
    General,
    Rounded,
    SiPrefix,
    Percent,
    PercentRounded,
    Decimal,
    Binary,
    Octal,
    HexLower,
    HexUpper,
}

impl FormatType {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'e' => FormatType::Exponent,
            'f' => FormatType::Fixed,
            'g' => FormatType::General,
            'r' => FormatType::Rounded,
            's' => FormatType::SiPrefix,
            '%' => FormatType::Percent,
            'p' => FormatType::PercentRounded,
            'd' => FormatType::Decimal,
            'b' => FormatType::Binary,
            'o' => FormatType::Octal,
            'x' => FormatType::HexLower,
            'X' => FormatType::HexUpper,
            _ => return None,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            FormatType::None => "",
            FormatType::Exponent => "e",
            FormatType::Fixed => "f",
            FormatType::General => "g",
            FormatType::Rounded => "r",
            FormatType::SiPrefix => "s",
            FormatType::Percent => "%",
            FormatType::PercentRounded => "p",
            FormatType::Decimal => "d",
            FormatType::Binary => "b",
            FormatType::Octal => "o",
            FormatType::HexLower => "x",
            FormatType::HexUpper => "X",
        }
    }

    /// Types whose precision counts significant digits rather than
    /// fractional ones.
    fn is_significant(self) -> bool {
        matches!(
            self,
            FormatType::None
                | FormatType::General
                | FormatType::Rounded
                | FormatType::SiPrefix
                | FormatType::PercentRounded
        )
    }

    /// Types that may produce a fractional part or exponent.
    fn has_fraction(self) -> bool {
        matches!(
            self,
            FormatType::None
                | FormatType::Exponent
                | FormatType::Fixed
                | FormatType::General
                | FormatType::Rounded
                | FormatType::SiPrefix
                | FormatType::Percent
                | FormatType::PercentRounded
                | FormatType::Decimal
        )
    }

    fn radix_prefix(self) -> &'static str {
        match self {
            FormatType::Binary => "0b",
            FormatType::Octal => "0o",
            FormatType::HexLower | FormatType::HexUpper => "0x",
            _ => "",
        }
    }
}

/// A parsed format specifier.
///
/// `precision` may be set negative by precision injection; it is clamped
/// when formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpecifier {
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub symbol: Option<Symbol>,
    pub zero: bool,
    pub width: Option<usize>,
    pub comma: bool,
    pub precision: Option<i32>,
    pub trim: bool,
    pub kind: FormatType,
}

impl Default for FormatSpecifier {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: Align::default(),
            sign: Sign::default(),
            symbol: None,
            zero: false,
            width: None,
            comma: false,
            precision: None,
            trim: false,
            kind: FormatType::default(),
        }
    }
}

impl FromStr for FormatSpecifier {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScaleError::InvalidSpecifier(s.to_owned());
        let chars: Vec<char> = s.chars().collect();
        let mut spec = FormatSpecifier::default();
        let mut i = 0;

        let digits = |from: usize| {
            let mut to = from;
            while to < chars.len() && chars[to].is_ascii_digit() {
                to += 1;
            }
            to
        };
        let number = |from: usize, to: usize| -> Result<usize, ScaleError> {
            chars[from..to]
                .iter()
                .collect::<String>()
                .parse()
                .map_err(|_| invalid())
        };

        if let Some(align) = chars.get(1).copied().and_then(Align::from_char) {
            spec.fill = chars[0];
            spec.align = align;
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            spec.align = align;
            i = 1;
        }

        if let Some(sign) = chars.get(i).copied().and_then(Sign::from_char) {
            spec.sign = sign;
            i += 1;
        }

        match chars.get(i) {
            Some('$') => {
                spec.symbol = Some(Symbol::Currency);
                i += 1;
            }
            Some('#') => {
                spec.symbol = Some(Symbol::Radix);
                i += 1;
            }
            _ => {}
        }

        if chars.get(i) == Some(&'0') {
            spec.zero = true;
            i += 1;
        }

        let end = digits(i);
        if end > i {
            spec.width = Some(number(i, end)?);
            i = end;
        }

        if chars.get(i) == Some(&',') {
            spec.comma = true;
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            let end = digits(i + 1);
            if end == i + 1 {
                return Err(invalid());
            }
            let precision = number(i + 1, end)?;
            spec.precision = Some(i32::try_from(precision).map_err(|_| invalid())?);
            i = end;
        }

        if chars.get(i) == Some(&'~') {
            spec.trim = true;
            i += 1;
        }

        if let Some(&c) = chars.get(i) {
            if c == 'n' {
                spec.comma = true;
                spec.kind = FormatType::General;
            } else {
                spec.kind = FormatType::from_char(c).ok_or_else(invalid)?;
            }
            i += 1;
        }

        if i != chars.len() {
            return Err(invalid());
        }

        Ok(spec)
    }
}

impl fmt::Display for FormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.fill, self.align.as_char(), self.sign.as_char())?;
        match self.symbol {
            Some(Symbol::Currency) => write!(f, "$")?,
            Some(Symbol::Radix) => write!(f, "#")?,
            None => {}
        }
        if self.zero {
            write!(f, "0")?;
        }
        if let Some(width) = self.width {
            write!(f, "{}", width.max(1))?;
        }
        if self.comma {
            write!(f, ",")?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{}", precision.max(0))?;
        }
        if self.trim {
            write!(f, "~")?;
        }
        write!(f, "{}", self.kind.as_str())
    }
}

/// A number formatter built from a [`FormatSpecifier`].
#[derive(Debug, Clone)]
pub struct Formatter {
    spec: FormatSpecifier,
    kind: FormatType,
    precision: usize,
    trim: bool,
    /// Fixed SI unit: values are scaled by `10^-e` and suffixed.
    unit: Option<i32>,
}

impl Formatter {
    pub fn new(mut spec: FormatSpecifier) -> Self {
        if spec.zero || (spec.fill == '0' && spec.align == Align::AfterSign) {
            spec.zero = true;
            spec.fill = '0';
            spec.align = Align::AfterSign;
        }

        let (kind, trim, default_precision) = match spec.kind {
            FormatType::None => (FormatType::General, true, 12),
            kind => (kind, spec.trim, 6),
        };
        let requested = spec.precision.unwrap_or(default_precision);
        let precision = if kind.is_significant() {
            requested.clamp(1, 21)
        } else {
            requested.clamp(0, 20)
        } as usize;

        Self {
            spec,
            kind,
            precision,
            trim,
            unit: None,
        }
    }

    /// Formats in the fixed SI unit of `value` (e.g. all in `M`), as fixed-point.
    pub fn with_si_prefix(mut spec: FormatSpecifier, value: f64) -> Self {
        spec.kind = FormatType::Fixed;
        let mut formatter = Self::new(spec);
        formatter.unit = Some(si_unit_exponent(value));
        formatter
    }

    pub fn specifier(&self) -> &FormatSpecifier {
        &self.spec
    }

    pub fn format(&self, value: f64) -> String {
        match self.unit {
            Some(e) => {
                let scaled = value * 10f64.powi(-e);
                format!("{}{}", self.format_plain(scaled), si_prefix(e))
            }
            None => self.format_plain(value),
        }
    }

    fn format_plain(&self, value: f64) -> String {
        let spec = &self.spec;
        let mut negative = value < 0.0 || (value == 0.0 && value.is_sign_negative());

        let (mut body, unit) = if value.is_nan() {
            ("NaN".to_owned(), None)
        } else if value.is_infinite() {
            ("Infinity".to_owned(), None)
        } else {
            self.format_magnitude(value.abs())
        };
        if self.trim {
            body = trim_insignificant(&body);
        }
        if negative && spec.sign != Sign::Plus && body.parse::<f64>().is_ok_and(|v| v == 0.0) {
            negative = false;
        }

        let symbol_prefix = match spec.symbol {
            Some(Symbol::Currency) => "$",
            Some(Symbol::Radix) => self.kind.radix_prefix(),
            None => "",
        };
        let sign_prefix = match (negative, spec.sign) {
            (true, Sign::Parens) => "(",
            (true, _) => "-",
            (false, Sign::Plus) => "+",
            (false, Sign::Space) => " ",
            (false, _) => "",
        };
        let prefix = format!("{sign_prefix}{symbol_prefix}");

        let mut suffix = String::new();
        if let Some(e) = unit {
            suffix.push_str(si_prefix(e));
        }
        if matches!(self.kind, FormatType::Percent | FormatType::PercentRounded) {
            suffix.push('%');
        }
        if negative && spec.sign == Sign::Parens {
            suffix.push(')');
        }

        // Split off everything from the first non-digit so grouping and
        // zero-padding only touch the integer digits.
        if self.kind.has_fraction() {
            if let Some(i) = body.find(|c: char| !c.is_ascii_digit()) {
                suffix = format!("{}{}", &body[i..], suffix);
                body.truncate(i);
            }
        }

        if spec.comma && !spec.zero {
            body = group(&body, usize::MAX);
        }

        let width = spec.width.unwrap_or(0);
        let length = prefix.chars().count() + body.chars().count() + suffix.chars().count();
        let mut padding = if length < width {
            spec.fill.to_string().repeat(width - length)
        } else {
            String::new()
        };

        if spec.comma && spec.zero {
            let limit = if padding.is_empty() {
                usize::MAX
            } else {
                width.saturating_sub(suffix.chars().count())
            };
            body = group(&format!("{padding}{body}"), limit);
            padding.clear();
        }

        match spec.align {
            Align::Left => format!("{prefix}{body}{suffix}{padding}"),
            Align::AfterSign => format!("{prefix}{padding}{body}{suffix}"),
            Align::Center => {
                let half = padding.chars().count() / 2;
                let left: String = padding.chars().take(half).collect();
                let right: String = padding.chars().skip(half).collect();
                format!("{left}{prefix}{body}{suffix}{right}")
            }
            Align::Right => format!("{padding}{prefix}{body}{suffix}"),
        }
    }

    /// Renders a finite non-negative magnitude; returns the SI unit exponent for `s`.
    fn format_magnitude(&self, x: f64) -> (String, Option<i32>) {
        let p = self.precision;
        match self.kind {
            FormatType::None | FormatType::General => (to_precision(x, p), None),
            FormatType::Exponent => (to_exponential(x, Some(p)), None),
            FormatType::Fixed => (to_fixed(x, p), None),
            FormatType::Percent => (to_fixed(x * 100.0, p), None),
            FormatType::Rounded => (format_rounded(x, p).unwrap_or_default(), None),
            FormatType::PercentRounded => (
                format_rounded(x * 100.0, p).unwrap_or_else(|| "Infinity".to_owned()),
                None,
            ),
            FormatType::SiPrefix => match format_si_auto(x, p) {
                Some((body, e)) => (body, Some(e)),
                None => (String::new(), None),
            },
            FormatType::Decimal => (format!("{}", x.round()), None),
            FormatType::Binary => (format!("{:b}", x.round() as u128), None),
            FormatType::Octal => (format!("{:o}", x.round() as u128), None),
            FormatType::HexLower => (format!("{:x}", x.round() as u128), None),
            FormatType::HexUpper => (format!("{:X}", x.round() as u128), None),
        }
    }
}

/// `p` significant digits in the SI unit nearest `x`'s magnitude.
fn format_si_auto(x: f64, p: usize) -> Option<(String, i32)> {
    let (coefficient, exponent) = decimal_parts(x, p)?;
    let unit = exponent.div_euclid(3).clamp(-8, 8) * 3;
    let i = exponent - unit + 1;
    let n = coefficient.len() as i32;
    let body = if i == n {
        coefficient
    } else if i > n {
        format!("{}{}", coefficient, "0".repeat((i - n) as usize))
    } else if i > 0 {
        let (int, frac) = coefficient.split_at(i as usize);
        format!("{int}.{frac}")
    } else {
        let digits = (p as i32 + i - 1).max(0) as usize;
        let (tail, _) = decimal_parts(x, digits)?;
        format!("0.{}{}", "0".repeat((-i) as usize), tail)
    };
    Some((body, unit))
}

/// Inserts `,` every three digits from the right, stopping once `width`
/// characters are used.
fn group(digits: &str, width: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = chars.len();
    let mut length = 0usize;
    while end > 0 {
        let mut size = 3;
        if length + size + 1 > width {
            size = width.saturating_sub(length).max(1);
        }
        let start = end.saturating_sub(size);
        groups.push(chars[start..end].iter().collect());
        end = start;
        length += size + 1;
        if length > width {
            break;
        }
    }
    groups.reverse();
    groups.join(",")
}

/// Parses `specifier` and builds its formatter.
pub fn format(specifier: &str) -> Result<Formatter, ScaleError> {
    Ok(Formatter::new(specifier.parse()?))
}

/// Like [`format`], but every value is written in the SI unit of `value`.
pub fn format_prefix(specifier: &str, value: f64) -> Result<Formatter, ScaleError> {
    Ok(Formatter::with_si_prefix(specifier.parse()?, value))
}
