use thiserror::Error;

/// Errors from the fallible, non-mapping parts of a scale.
///
/// Mapping a value never fails; out-of-range or malformed input surfaces as
/// `NaN` or [`Value::Null`](crate::Value::Null) instead.
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("invalid format specifier: {0:?}")]
    InvalidSpecifier(String),

    #[error("exponent must be finite, got {0}")]
    InvalidExponent(f64),

    #[error("invalid scale configuration: {0}")]
    Config(#[from] serde_json::Error),
}
