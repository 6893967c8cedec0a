//! Serializable scale configuration.
//!
//! ```rust
//! use powscale::{config::ScaleConfig, scale::Pow};
//!
//! let config = ScaleConfig::from_json(r#"{"domain": [0, 100], "range": ["white", "red"], "exponent": 0.5}"#).unwrap();
//! let s = Pow::from_config(&config).unwrap();
//! assert_eq!(s.apply(25.0), "#ff8080");
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::interpolate::{FactoryKind, InterpolatorFactory};
use crate::scale::Pow;
use crate::{ScaleError, Value};

/// A snapshot of a power scale's configuration.
///
/// Missing fields take the scale defaults. Custom interpolator factories are
/// not captured; `round` records whether the rounding interpolator is in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub domain: Vec<f64>,
    pub range: Vec<Value>,
    pub exponent: f64,
    pub clamp: bool,
    pub round: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            domain: vec![0.0, 1.0],
            range: vec![Value::Number(0.0), Value::Number(1.0)],
            exponent: 1.0,
            clamp: false,
            round: false,
        }
    }
}

impl ScaleConfig {
    pub fn from_json(json: &str) -> Result<Self, ScaleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScaleError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json(&self) -> Result<String, ScaleError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ScaleError> {
        if !self.exponent.is_finite() {
            return Err(ScaleError::InvalidExponent(self.exponent));
        }
        Ok(())
    }
}

impl Pow {
    pub fn config(&self) -> ScaleConfig {
        ScaleConfig {
            domain: self.domain(),
            range: self.range(),
            exponent: self.exponent(),
            clamp: self.clamp(),
            round: self.interpolate().kind() == FactoryKind::Round,
        }
    }

    pub fn from_config(config: &ScaleConfig) -> Result<Self, ScaleError> {
        config.validate()?;
        let mut scale = Pow::with_exponent(config.exponent);
        scale
            .set_domain(config.domain.iter())
            .set_range(config.range.iter())
            .set_clamp(config.clamp);
        if config.round {
            scale.set_interpolate(InterpolatorFactory::round());
        }
        log::debug!("restored power scale with exponent {}", config.exponent);
        Ok(scale)
    }
}
