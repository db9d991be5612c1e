//! Span configuration schema and engine options.
//!
//! The JSON form is a `type`-tagged object; shared fields (`forceInteger`,
//! `noise`, `speed`, `delay`, `repeat`, `alternate`) sit beside the mode
//! fields. Mode fields are optional at the serde layer so that a missing
//! `start`/`end` surfaces as [`SpanError::MissingField`] rather than a parse
//! failure.

use serde::{Deserialize, Serialize};

use crate::curve::CurveShape;
use crate::easing::Easing;
use crate::error::SpanError;
use crate::value::ValueLiteral;

fn is_false(b: &bool) -> bool {
    !*b
}

/// Engine options that are not part of a span's serialized configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanOptions {
    /// Seed for the random source behind `random`, `randomLerp` and random
    /// array picks. `None` seeds from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Array element selection policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrayPick {
    /// Independent uniform draw every call
    #[default]
    Random,
    /// 0, 1, .., n-1, 0, 1, ..
    Repeat,
    /// 0, 1, .., n-1, n-2, .., 0, 1, ..
    Alternate,
}

impl ArrayPick {
    #[inline]
    pub fn is_random(&self) -> bool {
        *self == ArrayPick::Random
    }
}

impl std::str::FromStr for ArrayPick {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(ArrayPick::Random),
            "repeat" => Ok(ArrayPick::Repeat),
            "alternate" => Ok(ArrayPick::Alternate),
            _ => Err(SpanError::unknown("array pick", s)),
        }
    }
}

/// Keyframes for one curve axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisCurve {
    /// `[key, value]` pairs on any numeric domain.
    pub keys: Vec<(f32, f32)>,
    /// Overrides the span-level `curveShape` for this axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<CurveShape>,
}

/// Up to four per-axis curves. Color channels alias the vector axes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    #[serde(default, alias = "r", skip_serializing_if = "Option::is_none")]
    pub x: Option<AxisCurve>,
    #[serde(default, alias = "g", skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisCurve>,
    #[serde(default, alias = "b", skip_serializing_if = "Option::is_none")]
    pub z: Option<AxisCurve>,
    #[serde(default, alias = "a", skip_serializing_if = "Option::is_none")]
    pub w: Option<AxisCurve>,
}

impl CurveConfig {
    /// Axes in component order.
    pub fn axes(&self) -> [Option<&AxisCurve>; 4] {
        [
            self.x.as_ref(),
            self.y.as_ref(),
            self.z.as_ref(),
            self.w.as_ref(),
        ]
    }

    pub(crate) fn from_axes(mut axes: [Option<AxisCurve>; 4]) -> Self {
        Self {
            x: axes[0].take(),
            y: axes[1].take(),
            z: axes[2].take(),
            w: axes[3].take(),
        }
    }
}

/// Mode-specific part of a configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ModeConfig {
    Value {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<ValueLiteral>,
    },
    Random {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<ValueLiteral>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<ValueLiteral>,
    },
    RandomLerp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<ValueLiteral>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<ValueLiteral>,
    },
    Lerp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<ValueLiteral>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<ValueLiteral>,
        #[serde(default, skip_serializing_if = "Easing::is_linear")]
        easing: Easing,
    },
    #[serde(rename_all = "camelCase")]
    Curve {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<ValueLiteral>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<ValueLiteral>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        curve: Option<CurveConfig>,
        #[serde(default, skip_serializing_if = "CurveShape::is_smooth")]
        curve_shape: CurveShape,
    },
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        array: Option<Vec<ValueLiteral>>,
        #[serde(default, skip_serializing_if = "ArrayPick::is_random")]
        pick: ArrayPick,
    },
    Gradient {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        steps: Option<Vec<(f32, ValueLiteral)>>,
    },
}

impl ModeConfig {
    pub fn mode(&self) -> SpanMode {
        match self {
            ModeConfig::Value { .. } => SpanMode::Value,
            ModeConfig::Random { .. } => SpanMode::Random,
            ModeConfig::RandomLerp { .. } => SpanMode::RandomLerp,
            ModeConfig::Lerp { .. } => SpanMode::Lerp,
            ModeConfig::Curve { .. } => SpanMode::Curve,
            ModeConfig::Array { .. } => SpanMode::Array,
            ModeConfig::Gradient { .. } => SpanMode::Gradient,
        }
    }
}

/// Discriminant of the active generation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanMode {
    Value,
    Random,
    RandomLerp,
    Lerp,
    Curve,
    Array,
    Gradient,
}

impl SpanMode {
    pub fn name(self) -> &'static str {
        match self {
            SpanMode::Value => "value",
            SpanMode::Random => "random",
            SpanMode::RandomLerp => "randomLerp",
            SpanMode::Lerp => "lerp",
            SpanMode::Curve => "curve",
            SpanMode::Array => "array",
            SpanMode::Gradient => "gradient",
        }
    }
}

/// Procedural noise applied on top of the produced value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// `None` draws a seed when the modulator is built; that seed is not serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(default = "NoiseConfig::one", skip_serializing_if = "NoiseConfig::is_one")]
    pub frequency: f32,
    #[serde(default = "NoiseConfig::one", skip_serializing_if = "NoiseConfig::is_one")]
    pub amplitude: f32,
    /// Accumulated `|input|` between advances of the noise time axis.
    #[serde(default, skip_serializing_if = "NoiseConfig::is_zero")]
    pub cycle: f32,
    /// Rate of the noise time axis.
    #[serde(default = "NoiseConfig::one", skip_serializing_if = "NoiseConfig::is_one")]
    pub speed: f32,
}

impl NoiseConfig {
    fn one() -> f32 {
        1.0
    }

    fn is_one(v: &f32) -> bool {
        *v == 1.0
    }

    fn is_zero(v: &f32) -> bool {
        *v == 0.0
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frequency: 1.0,
            amplitude: 1.0,
            cycle: 0.0,
            speed: 1.0,
        }
    }
}

/// Delay/speed/repeat/alternate remapping of incremental input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemporalConfig {
    /// Progress per unit of input; negative runs the cycle backwards.
    pub speed: f32,
    /// Progress to hold at the start value before the first cycle.
    pub delay: f32,
    /// Completed cycles before freezing at the end value; `None` is unbounded.
    pub repeat: Option<u32>,
    /// Mirror progress on odd cycles.
    pub alternate: bool,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            delay: 0.0,
            repeat: None,
            alternate: false,
        }
    }
}

impl TemporalConfig {
    /// True when every field is at its default, i.e. remapping is a no-op and
    /// input is absolute progress.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Full span configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanConfig {
    #[serde(flatten)]
    pub mode: ModeConfig,
    #[serde(default, skip_serializing_if = "is_false")]
    pub force_integer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub alternate: bool,
}

impl SpanConfig {
    pub fn new(mode: ModeConfig) -> Self {
        Self {
            mode,
            force_integer: false,
            noise: None,
            speed: None,
            delay: None,
            repeat: None,
            alternate: false,
        }
    }

    /// Constant-value configuration.
    pub fn value(value: impl Into<ValueLiteral>) -> Self {
        Self::new(ModeConfig::Value {
            value: Some(value.into()),
        })
    }

    /// Eased interpolation configuration.
    pub fn lerp(start: impl Into<ValueLiteral>, end: impl Into<ValueLiteral>, easing: Easing) -> Self {
        Self::new(ModeConfig::Lerp {
            start: Some(start.into()),
            end: Some(end.into()),
            easing,
        })
    }

    pub fn with_force_integer(mut self, force_integer: bool) -> Self {
        self.force_integer = force_integer;
        self
    }

    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn with_temporal(mut self, temporal: &TemporalConfig) -> Self {
        self.set_temporal(temporal);
        self
    }

    /// Resolved temporal parameters with defaults applied.
    pub fn temporal(&self) -> TemporalConfig {
        TemporalConfig {
            speed: self.speed.unwrap_or(1.0),
            delay: self.delay.unwrap_or(0.0),
            repeat: self.repeat,
            alternate: self.alternate,
        }
    }

    /// Store temporal parameters, omitting defaults.
    pub fn set_temporal(&mut self, temporal: &TemporalConfig) {
        self.speed = (temporal.speed != 1.0).then_some(temporal.speed);
        self.delay = (temporal.delay != 0.0).then_some(temporal.delay);
        self.repeat = temporal.repeat;
        self.alternate = temporal.alternate;
    }
}

/// Either a bare literal (constant value) or a full configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpanInput {
    Literal(ValueLiteral),
    Config(SpanConfig),
}

impl From<SpanInput> for SpanConfig {
    fn from(input: SpanInput) -> Self {
        match input {
            SpanInput::Literal(literal) => SpanConfig::value(literal),
            SpanInput::Config(config) => config,
        }
    }
}

impl From<ValueLiteral> for SpanConfig {
    fn from(literal: ValueLiteral) -> Self {
        SpanConfig::value(literal)
    }
}
