//! Construction config for keyframe maps.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::KeyframeError;
use crate::value::ValueKind;

/// Describes a map before any keyframes are authored.
///
/// Bounds default to 0 and are not checked against each other.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapConfig {
    /// Kind every fallback-resolved value must have.
    #[serde(rename = "valueType")]
    pub value_kind: ValueKind,
    #[serde(default, deserialize_with = "coerce_bound")]
    pub start: i64,
    #[serde(default, deserialize_with = "coerce_bound")]
    pub end: i64,
}

impl MapConfig {
    pub fn new(value_kind: ValueKind) -> Self {
        Self {
            value_kind,
            start: 0,
            end: 0,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, KeyframeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(ValueKind::Bool)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Bound {
    Int(i64),
    Float(f64),
}

/// Bounds are coerced to integers: floats truncate toward zero, null is 0.
fn coerce_bound<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let bound: Option<Bound> = Option::deserialize(deserializer)?;
    match bound {
        None => Ok(0),
        Some(Bound::Int(v)) => Ok(v),
        Some(Bound::Float(v)) if v.is_finite() => Ok(v.trunc() as i64),
        Some(Bound::Float(v)) => Err(serde::de::Error::custom(format!(
            "bound must be finite, got {v}"
        ))),
    }
}
