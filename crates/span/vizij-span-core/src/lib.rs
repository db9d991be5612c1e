//! Vizij Span Core (engine-agnostic)
//!
//! Value-evolution spans: a declarative configuration compiles into a stepper
//! that maps progress (or progress deltas) to a value of a fixed kind.
//! Modes: value, random, randomLerp, lerp, curve, array, gradient. Optional
//! layers: temporal remapping (speed/delay/repeat/alternate) and noise.

pub mod config;
pub mod curve;
pub mod easing;
pub mod error;
pub mod gradient;
pub mod interp;
pub mod mode;
pub mod noise;
pub mod span;
pub mod stepper;
pub mod temporal;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::{
    ArrayPick, AxisCurve, CurveConfig, ModeConfig, NoiseConfig, SpanConfig, SpanInput, SpanMode,
    SpanOptions, TemporalConfig,
};
pub use curve::{CurveShape, KeyframeCurve};
pub use easing::Easing;
pub use error::SpanError;
pub use gradient::Gradient;
pub use noise::{NoiseModulator, Simplex};
pub use span::Span;
pub use stepper::{ArrayPicker, BaseStepper, Stepper};
pub use temporal::{ElapsedClock, TemporalRemapper};
pub use value::{Value, ValueKind, ValueLiteral};

pub type Result<T> = core::result::Result<T, SpanError>;
