//! Resolved per-mode state.
//!
//! `ModeState` is rebuilt wholesale on every (re)configuration so nothing from
//! a previous mode survives a switch. It is also the source of truth for
//! serialization: `to_config` writes back what was resolved, not what the
//! caller originally passed (gradient keys come back normalized, curve keys
//! sorted and deduplicated).

use crate::config::{ArrayPick, AxisCurve, CurveConfig, ModeConfig, SpanMode};
use crate::curve::{CurveShape, KeyframeCurve};
use crate::easing::Easing;
use crate::error::SpanError;
use crate::gradient::Gradient;
use crate::value::{Value, ValueKind, ValueLiteral};

/// One curve axis plus the shape override it was configured with.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveAxis {
    pub curve: KeyframeCurve,
    pub shape: Option<CurveShape>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModeState {
    Value(Value),
    Random {
        start: Value,
        end: Value,
    },
    RandomLerp {
        start: Value,
        end: Value,
    },
    Lerp {
        start: Value,
        end: Value,
        easing: Easing,
    },
    Curve {
        start: Value,
        end: Value,
        axes: [Option<CurveAxis>; 4],
        shape: CurveShape,
    },
    Array {
        items: Vec<Value>,
        pick: ArrayPick,
    },
    Gradient(Gradient),
}

fn required<'a>(
    mode: SpanMode,
    field: &str,
    literal: &'a Option<ValueLiteral>,
) -> Result<&'a ValueLiteral, SpanError> {
    literal
        .as_ref()
        .ok_or_else(|| SpanError::missing(mode.name(), field))
}

/// Resolve both endpoints against `kind`.
fn bound(
    kind: ValueKind,
    mode: SpanMode,
    start: &Option<ValueLiteral>,
    end: &Option<ValueLiteral>,
) -> Result<(Value, Value), SpanError> {
    let start = Value::from_literal(kind, required(mode, "start", start)?)?;
    let end = Value::from_literal(kind, required(mode, "end", end)?)?;
    Ok((start, end))
}

impl ModeState {
    /// Validate `config` for `kind` and resolve it.
    pub fn compile(kind: ValueKind, config: &ModeConfig) -> Result<Self, SpanError> {
        let mode = config.mode();
        let state = match config {
            ModeConfig::Value { value } => {
                ModeState::Value(Value::from_literal(kind, required(mode, "value", value)?)?)
            }
            ModeConfig::Random { start, end } => {
                let (start, end) = bound(kind, mode, start, end)?;
                ModeState::Random { start, end }
            }
            ModeConfig::RandomLerp { start, end } => {
                let (start, end) = bound(kind, mode, start, end)?;
                ModeState::RandomLerp { start, end }
            }
            ModeConfig::Lerp { start, end, easing } => {
                let (start, end) = bound(kind, mode, start, end)?;
                ModeState::Lerp {
                    start,
                    end,
                    easing: *easing,
                }
            }
            ModeConfig::Curve {
                start,
                end,
                curve,
                curve_shape,
            } => {
                let (start, end) = bound(kind, mode, start, end)?;
                let curve = curve
                    .as_ref()
                    .ok_or_else(|| SpanError::missing(mode.name(), "curve"))?;
                let mut axes: [Option<CurveAxis>; 4] = Default::default();
                for (slot, axis) in axes.iter_mut().zip(curve.axes()) {
                    if let Some(axis) = axis {
                        let shape = axis.shape.unwrap_or(*curve_shape);
                        *slot = Some(CurveAxis {
                            curve: KeyframeCurve::new(&axis.keys, shape)?,
                            shape: axis.shape,
                        });
                    }
                }
                ModeState::Curve {
                    start,
                    end,
                    axes,
                    shape: *curve_shape,
                }
            }
            ModeConfig::Array { array, pick } => {
                let literals = array
                    .as_ref()
                    .ok_or_else(|| SpanError::missing(mode.name(), "array"))?;
                if literals.is_empty() {
                    return Err(SpanError::EmptyArray);
                }
                let items = literals
                    .iter()
                    .map(|l| Value::from_literal(kind, l))
                    .collect::<Result<Vec<_>, _>>()?;
                ModeState::Array { items, pick: *pick }
            }
            ModeConfig::Gradient { steps } => {
                let steps = steps
                    .as_ref()
                    .ok_or_else(|| SpanError::missing(mode.name(), "steps"))?;
                let resolved = steps
                    .iter()
                    .map(|(k, l)| Ok((*k, Value::from_literal(kind, l)?)))
                    .collect::<Result<Vec<_>, SpanError>>()?;
                ModeState::Gradient(Gradient::new(kind, &resolved)?)
            }
        };
        Ok(state)
    }

    pub fn mode(&self) -> SpanMode {
        match self {
            ModeState::Value(_) => SpanMode::Value,
            ModeState::Random { .. } => SpanMode::Random,
            ModeState::RandomLerp { .. } => SpanMode::RandomLerp,
            ModeState::Lerp { .. } => SpanMode::Lerp,
            ModeState::Curve { .. } => SpanMode::Curve,
            ModeState::Array { .. } => SpanMode::Array,
            ModeState::Gradient(_) => SpanMode::Gradient,
        }
    }

    /// Value the shared output holds right after configuration.
    pub fn initial_value(&self) -> Value {
        match self {
            ModeState::Value(v) => *v,
            ModeState::Random { start, .. }
            | ModeState::RandomLerp { start, .. }
            | ModeState::Lerp { start, .. }
            | ModeState::Curve { start, .. } => *start,
            ModeState::Array { items, .. } => items[0],
            ModeState::Gradient(g) => g.steps()[0].1,
        }
    }

    /// Mode part of the serialized configuration.
    pub fn to_config(&self) -> ModeConfig {
        match self {
            ModeState::Value(v) => ModeConfig::Value {
                value: Some(v.to_literal()),
            },
            ModeState::Random { start, end } => ModeConfig::Random {
                start: Some(start.to_literal()),
                end: Some(end.to_literal()),
            },
            ModeState::RandomLerp { start, end } => ModeConfig::RandomLerp {
                start: Some(start.to_literal()),
                end: Some(end.to_literal()),
            },
            ModeState::Lerp { start, end, easing } => ModeConfig::Lerp {
                start: Some(start.to_literal()),
                end: Some(end.to_literal()),
                easing: *easing,
            },
            ModeState::Curve {
                start,
                end,
                axes,
                shape,
            } => {
                let axes = axes.clone().map(|axis| {
                    axis.map(|a| AxisCurve {
                        keys: a.curve.points(),
                        shape: a.shape,
                    })
                });
                ModeConfig::Curve {
                    start: Some(start.to_literal()),
                    end: Some(end.to_literal()),
                    curve: Some(CurveConfig::from_axes(axes)),
                    curve_shape: *shape,
                }
            }
            ModeState::Array { items, pick } => ModeConfig::Array {
                array: Some(items.iter().map(Value::to_literal).collect()),
                pick: *pick,
            },
            ModeState::Gradient(g) => ModeConfig::Gradient {
                steps: Some(
                    g.steps()
                        .into_iter()
                        .map(|(k, v)| (k, v.to_literal()))
                        .collect(),
                ),
            },
        }
    }
}
