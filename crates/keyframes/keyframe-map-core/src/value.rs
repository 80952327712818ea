//! Value: per-frame annotation state stored in a keyframe map.
//! Geometry uses f32 throughout.

use serde::{Deserialize, Serialize};

/// Coarse kind of a [`Value`]. A map declares one kind up front and checks
/// fallback reads against it.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
    Point,
    BoundingBox,
    Polygon,
    Enum,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Checkbox-style attribute
    Bool(bool),

    /// Integer attribute (e.g. a track id or counter)
    Int(i64),

    /// Scalar attribute
    Float(f32),

    /// Free text attribute
    Text(String),

    /// 2D point (x, y)
    Point([f32; 2]),

    /// Axis-aligned box
    BoundingBox { x: f32, y: f32, w: f32, h: f32 },

    /// Closed polygon, vertices in order
    Polygon(Vec<[f32; 2]>),

    /// Selected option of a categorical attribute
    Enum(String),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Point(_) => ValueKind::Point,
            Value::BoundingBox { .. } => ValueKind::BoundingBox,
            Value::Polygon(_) => ValueKind::Polygon,
            Value::Enum(_) => ValueKind::Enum,
        }
    }

    /// Convenience constructors
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn bbox(x: f32, y: f32, w: f32, h: f32) -> Self {
        Value::BoundingBox { x, y, w, h }
    }

    pub fn option(tag: impl Into<String>) -> Self {
        Value::Enum(tag.into())
    }
}

/// Anything a [`crate::KeyframeMap`] can hold: a cloneable value that reports
/// its kind so fallback reads can be validated.
pub trait Keyed: Clone {
    type Kind: Copy + Eq + std::fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

impl Keyed for Value {
    type Kind = ValueKind;

    #[inline]
    fn kind(&self) -> ValueKind {
        Value::kind(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::bbox(0.0, 0.0, 4.0, 3.0).kind(), ValueKind::BoundingBox);
        assert_eq!(Value::option("occluded").kind(), ValueKind::Enum);
        assert_eq!(Value::Polygon(vec![]).kind(), ValueKind::Polygon);
    }

    #[test]
    fn serde_uses_tagged_layout() {
        let json = serde_json::to_value(Value::Point([1.0, 2.0])).unwrap();
        assert_eq!(json, serde_json::json!({"type": "Point", "data": [1.0, 2.0]}));

        let back: Value = serde_json::from_value(serde_json::json!({
            "type": "BoundingBox",
            "data": {"x": 1.0, "y": 2.0, "w": 3.0, "h": 4.0}
        }))
        .unwrap();
        assert_eq!(back, Value::bbox(1.0, 2.0, 3.0, 4.0));
    }
}
