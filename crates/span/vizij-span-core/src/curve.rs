//! Scalar keyframe curves.
//!
//! Model:
//! - Keys live on a caller-defined numeric domain (not renormalized).
//! - Input pairs are deduplicated by key (last write wins), then sorted.
//! - Evaluation clamps outside `[first, last]` and scans linearly for the
//!   bracketing segment; key sets are small.
//! - Shapes: `staircase` holds the lower key's value, `linear` blends,
//!   `smooth` is a cubic Hermite with cardinal tangents scaled by segment width.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpanError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveShape {
    #[default]
    Smooth,
    Linear,
    Staircase,
}

impl CurveShape {
    pub fn name(self) -> &'static str {
        match self {
            CurveShape::Smooth => "smooth",
            CurveShape::Linear => "linear",
            CurveShape::Staircase => "staircase",
        }
    }

    #[inline]
    pub fn is_smooth(&self) -> bool {
        *self == CurveShape::Smooth
    }
}

impl FromStr for CurveShape {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smooth" => Ok(CurveShape::Smooth),
            "linear" => Ok(CurveShape::Linear),
            "staircase" => Ok(CurveShape::Staircase),
            _ => Err(SpanError::unknown("curve shape", s)),
        }
    }
}

/// Sort `(key, value)` pairs ascending by key, keeping the last value written
/// for any repeated key. Non-finite keys are rejected.
pub(crate) fn sorted_unique<V: Clone>(
    mode: &str,
    pairs: &[(f32, V)],
) -> Result<Vec<(f32, V)>, SpanError> {
    let mut out: Vec<(f32, V)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        if !key.is_finite() {
            return Err(SpanError::InvalidConfiguration {
                reason: format!("'{mode}' key {key} is not finite"),
            });
        }
        match out.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.clone(),
            None => out.push((*key, value.clone())),
        }
    }
    if out.is_empty() {
        return Err(SpanError::EmptyKeys {
            mode: mode.to_string(),
        });
    }
    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(out)
}

/// A continuous scalar function over sorted, unique keys.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeCurve {
    keys: Vec<f32>,
    values: Vec<f32>,
    /// Per-key slopes used by the smooth shape.
    tangents: Vec<f32>,
    shape: CurveShape,
}

impl KeyframeCurve {
    pub fn new(points: &[(f32, f32)], shape: CurveShape) -> Result<Self, SpanError> {
        let sorted = sorted_unique("curve", points)?;
        let (keys, values): (Vec<f32>, Vec<f32>) = sorted.into_iter().unzip();
        let tangents = cardinal_tangents(&keys, &values);
        Ok(Self {
            keys,
            values,
            tangents,
            shape,
        })
    }

    #[inline]
    pub fn shape(&self) -> CurveShape {
        self.shape
    }

    /// Sorted `(key, value)` pairs.
    pub fn points(&self) -> Vec<(f32, f32)> {
        self.keys
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }

    pub fn evaluate(&self, x: f32) -> f32 {
        let n = self.keys.len();
        if n == 1 || x <= self.keys[0] {
            return self.values[0];
        }
        if x >= self.keys[n - 1] {
            return self.values[n - 1];
        }
        let i = self.segment(x);
        let (x0, x1) = (self.keys[i], self.keys[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        match self.shape {
            CurveShape::Staircase => y0,
            CurveShape::Linear => y0 + (y1 - y0) * (x - x0) / (x1 - x0),
            CurveShape::Smooth => {
                let dx = x1 - x0;
                let t = (x - x0) / dx;
                let t2 = t * t;
                let t3 = t2 * t;
                let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
                let h10 = t3 - 2.0 * t2 + t;
                let h01 = -2.0 * t3 + 3.0 * t2;
                let h11 = t3 - t2;
                h00 * y0 + h10 * dx * self.tangents[i] + h01 * y1 + h11 * dx * self.tangents[i + 1]
            }
        }
    }

    /// Index of the segment `[keys[i], keys[i+1])` containing an interior `x`.
    fn segment(&self, x: f32) -> usize {
        let n = self.keys.len();
        for i in 0..(n - 1) {
            if x < self.keys[i + 1] {
                return i;
            }
        }
        n - 2
    }
}

/// Catmull-Rom style slopes: central differences inside, one-sided secants at the ends.
fn cardinal_tangents(keys: &[f32], values: &[f32]) -> Vec<f32> {
    let n = keys.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| {
            let (a, b) = match i {
                0 => (0, 1),
                i if i == n - 1 => (n - 2, n - 1),
                i => (i - 1, i + 1),
            };
            (values[b] - values[a]) / (keys[b] - keys[a])
        })
        .collect()
}
