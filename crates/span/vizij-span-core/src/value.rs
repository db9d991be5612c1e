//! Value kinds, typed values and configuration literals for spans.
//! All numeric types use f32, matching the rest of the vizij value API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpanError;

/// Shape of the value a span produces.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Quat,
    Euler,
    Color,
}

impl ValueKind {
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Float,
        ValueKind::Vec2,
        ValueKind::Vec3,
        ValueKind::Vec4,
        ValueKind::Quat,
        ValueKind::Euler,
        ValueKind::Color,
    ];

    /// Number of scalar components.
    #[inline]
    pub fn components(self) -> usize {
        match self {
            ValueKind::Float => 1,
            ValueKind::Vec2 => 2,
            ValueKind::Vec3 | ValueKind::Euler => 3,
            ValueKind::Vec4 | ValueKind::Quat | ValueKind::Color => 4,
        }
    }

    /// Rotation kinds interpolate spherically and are never noise-modulated.
    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(self, ValueKind::Quat | ValueKind::Euler)
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Vec2 => "vec2",
            ValueKind::Vec3 => "vec3",
            ValueKind::Vec4 => "vec4",
            ValueKind::Quat => "quat",
            ValueKind::Euler => "euler",
            ValueKind::Color => "color",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float" | "scalar" | "number" => Ok(ValueKind::Float),
            "vec2" | "vector2" => Ok(ValueKind::Vec2),
            "vec3" | "vector3" => Ok(ValueKind::Vec3),
            "vec4" | "vector4" => Ok(ValueKind::Vec4),
            "quat" | "quaternion" => Ok(ValueKind::Quat),
            "euler" => Ok(ValueKind::Euler),
            "color" | "colorrgba" => Ok(ValueKind::Color),
            _ => Err(SpanError::unknown("value kind", s)),
        }
    }
}

/// A span output value. Fixed-size, so copying one never allocates.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Scalar float
    Float(f32),
    /// 2D vector
    Vec2([f32; 2]),
    /// 3D vector
    Vec3([f32; 3]),
    /// 4D vector
    Vec4([f32; 4]),
    /// Quaternion (x, y, z, w)
    Quat([f32; 4]),
    /// Euler angles in radians, XYZ order (roll, pitch, yaw)
    Euler([f32; 3]),
    /// RGBA color
    Color([f32; 4]),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Quat(_) => ValueKind::Quat,
            Value::Euler(_) => ValueKind::Euler,
            Value::Color(_) => ValueKind::Color,
        }
    }

    /// Neutral value of a kind (zeros; identity rotation for quaternions).
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Vec2 => Value::Vec2([0.0; 2]),
            ValueKind::Vec3 => Value::Vec3([0.0; 3]),
            ValueKind::Vec4 => Value::Vec4([0.0; 4]),
            ValueKind::Quat => Value::Quat([0.0, 0.0, 0.0, 1.0]),
            ValueKind::Euler => Value::Euler([0.0; 3]),
            ValueKind::Color => Value::Color([0.0; 4]),
        }
    }

    #[inline]
    pub fn components(&self) -> &[f32] {
        match self {
            Value::Float(v) => std::slice::from_ref(v),
            Value::Vec2(v) => v,
            Value::Vec3(v) | Value::Euler(v) => v,
            Value::Vec4(v) | Value::Quat(v) | Value::Color(v) => v,
        }
    }

    #[inline]
    pub fn components_mut(&mut self) -> &mut [f32] {
        match self {
            Value::Float(v) => std::slice::from_mut(v),
            Value::Vec2(v) => v,
            Value::Vec3(v) | Value::Euler(v) => v,
            Value::Vec4(v) | Value::Quat(v) | Value::Color(v) => v,
        }
    }

    /// Component on axis `i` (x/r = 0 .. w/a = 3), if the kind has it.
    #[inline]
    pub fn axis(&self, i: usize) -> Option<f32> {
        self.components().get(i).copied()
    }

    /// Build a value of `kind` from a configuration literal.
    ///
    /// A bare number is splatted across every component, except for
    /// quaternions where it has no meaning.
    pub fn from_literal(kind: ValueKind, literal: &ValueLiteral) -> Result<Self, SpanError> {
        let mut value = Value::zero(kind);
        match literal {
            ValueLiteral::Scalar(v) => {
                if kind == ValueKind::Quat {
                    return Err(SpanError::ShapeMismatch {
                        expected: kind,
                        actual: 1,
                    });
                }
                value.components_mut().iter_mut().for_each(|c| *c = *v);
            }
            ValueLiteral::Components(items) => {
                if items.len() != kind.components() {
                    return Err(SpanError::ShapeMismatch {
                        expected: kind,
                        actual: items.len(),
                    });
                }
                value.components_mut().copy_from_slice(items);
            }
        }
        Ok(value)
    }

    /// Configuration literal for this value (scalars as bare numbers).
    pub fn to_literal(&self) -> ValueLiteral {
        match self {
            Value::Float(v) => ValueLiteral::Scalar(*v),
            other => ValueLiteral::Components(other.components().to_vec()),
        }
    }
}

/// Configuration form of a value: a bare number or a component array.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueLiteral {
    Scalar(f32),
    Components(Vec<f32>),
}

impl From<f32> for ValueLiteral {
    fn from(value: f32) -> Self {
        ValueLiteral::Scalar(value)
    }
}

impl From<Vec<f32>> for ValueLiteral {
    fn from(value: Vec<f32>) -> Self {
        ValueLiteral::Components(value)
    }
}

impl<const N: usize> From<[f32; N]> for ValueLiteral {
    fn from(value: [f32; N]) -> Self {
        ValueLiteral::Components(value.to_vec())
    }
}

// Unsuffixed float literals default to f64; accept them so `set_value(1.5)` works.
impl From<f64> for ValueLiteral {
    fn from(value: f64) -> Self {
        ValueLiteral::Scalar(value as f32)
    }
}

impl From<Vec<f64>> for ValueLiteral {
    fn from(value: Vec<f64>) -> Self {
        ValueLiteral::Components(value.into_iter().map(|v| v as f32).collect())
    }
}

impl<const N: usize> From<[f64; N]> for ValueLiteral {
    fn from(value: [f64; N]) -> Self {
        ValueLiteral::Components(value.iter().map(|v| *v as f32).collect())
    }
}

impl From<Value> for ValueLiteral {
    fn from(value: Value) -> Self {
        value.to_literal()
    }
}
