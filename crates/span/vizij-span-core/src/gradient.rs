//! Multi-key gradients over normalized progress.

use crate::curve::sorted_unique;
use crate::error::SpanError;
use crate::interp::functions::{euler_to_quat, lerp_components, normalize4, quat_to_euler, slerp_quat};
use crate::value::{Value, ValueKind};

/// Sorted `(key, value)` table with keys renormalized to `[0, 1]`.
///
/// Rotation kinds keep a parallel table of quaternions built once here so
/// sampling never converts keyframes.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    kind: ValueKind,
    keys: Vec<f32>,
    values: Vec<Value>,
    rotations: Vec<[f32; 4]>,
}

impl Gradient {
    /// Build from caller steps on any numeric scale. Keys are deduplicated
    /// (last write wins), sorted, then mapped by `(k - min) / (max - min)`.
    pub fn new(kind: ValueKind, steps: &[(f32, Value)]) -> Result<Self, SpanError> {
        if let Some((_, v)) = steps.iter().find(|(_, v)| v.kind() != kind) {
            return Err(SpanError::ShapeMismatch {
                expected: kind,
                actual: v.kind().components(),
            });
        }
        let sorted = sorted_unique("gradient", steps)?;
        let min = sorted[0].0;
        let max = sorted[sorted.len() - 1].0;
        let range = max - min;
        let (keys, values): (Vec<f32>, Vec<Value>) = sorted
            .into_iter()
            .map(|(k, v)| {
                let key = if range > 0.0 { (k - min) / range } else { 0.0 };
                (key, v)
            })
            .unzip();
        let rotations = match kind {
            ValueKind::Quat => values
                .iter()
                .map(|v| match v {
                    Value::Quat(q) => normalize4(*q),
                    _ => [0.0, 0.0, 0.0, 1.0],
                })
                .collect(),
            ValueKind::Euler => values
                .iter()
                .map(|v| match v {
                    Value::Euler(e) => euler_to_quat(*e),
                    _ => [0.0, 0.0, 0.0, 1.0],
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self {
            kind,
            keys,
            values,
            rotations,
        })
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Normalized, sorted steps.
    pub fn steps(&self) -> Vec<(f32, Value)> {
        self.keys
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }

    /// Write the gradient value at `progress` into `out`.
    pub fn sample_into(&self, progress: f32, out: &mut Value) {
        let n = self.keys.len();
        if n == 1 || progress <= self.keys[0] {
            *out = self.values[0];
            return;
        }
        if progress >= self.keys[n - 1] {
            *out = self.values[n - 1];
            return;
        }
        let upper = self
            .keys
            .iter()
            .position(|k| *k > progress)
            .unwrap_or(n - 1);
        let lower = upper - 1;
        let t = (progress - self.keys[lower]) / (self.keys[upper] - self.keys[lower]);
        match (self.kind, out) {
            (ValueKind::Quat, Value::Quat(o)) => {
                *o = slerp_quat(self.rotations[lower], self.rotations[upper], t);
            }
            (ValueKind::Euler, Value::Euler(o)) => {
                *o = quat_to_euler(slerp_quat(self.rotations[lower], self.rotations[upper], t));
            }
            (_, out) => {
                *out = self.values[lower];
                lerp_components(
                    self.values[lower].components(),
                    self.values[upper].components(),
                    t,
                    out.components_mut(),
                );
            }
        }
    }
}
