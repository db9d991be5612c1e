//! Span: configuration in, composed stepper out.
//!
//! Stepper stack, innermost first:
//! - `BaseStepper` for the active mode
//! - `TemporalRemapper` when any of speed/delay/repeat/alternate is set
//! - `NoiseModulator` when noise is attached
//!
//! The span owns a single output value that every call overwrites in place;
//! callers that need a stable snapshot copy it out (`Value` is `Copy`).

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    ArrayPick, CurveConfig, ModeConfig, NoiseConfig, SpanConfig, SpanInput, SpanMode, SpanOptions,
    TemporalConfig,
};
use crate::curve::CurveShape;
use crate::easing::Easing;
use crate::error::SpanError;
use crate::mode::ModeState;
use crate::noise::NoiseModulator;
use crate::stepper::{BaseStepper, Stepper};
use crate::temporal::{ElapsedClock, TemporalRemapper};
use crate::value::{Value, ValueKind, ValueLiteral};

pub struct Span {
    kind: ValueKind,
    options: SpanOptions,
    rng: StdRng,
    value: Value,
    state: ModeState,
    force_integer: bool,
    temporal: TemporalConfig,
    /// Always carries a seed once set.
    noise: Option<NoiseConfig>,
    clock: ElapsedClock,
    stepper: Box<dyn Stepper>,
}

impl std::fmt::Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("kind", &self.kind)
            .field("mode", &self.state.mode())
            .field("value", &self.value)
            .field("force_integer", &self.force_integer)
            .field("temporal", &self.temporal)
            .field("noise", &self.noise)
            .finish_non_exhaustive()
    }
}

impl Span {
    pub fn new(kind: ValueKind, config: impl Into<SpanConfig>) -> Result<Self, SpanError> {
        Self::with_options(kind, config, SpanOptions::default())
    }

    pub fn with_options(
        kind: ValueKind,
        config: impl Into<SpanConfig>,
        options: SpanOptions,
    ) -> Result<Self, SpanError> {
        let config = config.into();
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let state = ModeState::compile(kind, &config.mode)?;
        let temporal = config.temporal();
        let noise = resolve_noise(config.noise, &mut rng);
        let stepper = compose(
            kind,
            &state,
            &temporal,
            noise.as_ref(),
            StdRng::from_rng(&mut rng),
        );
        let span = Self {
            kind,
            options,
            rng,
            value: state.initial_value(),
            state,
            force_integer: config.force_integer,
            temporal,
            noise,
            clock: ElapsedClock::default(),
            stepper,
        };
        debug!("span created: {} {}", kind, span.state.mode().name());
        Ok(span)
    }

    /// Parse a JSON configuration or bare literal.
    pub fn from_json(kind: ValueKind, json: &str) -> Result<Self, SpanError> {
        let input: SpanInput = serde_json::from_str(json)?;
        Self::new(kind, SpanConfig::from(input))
    }

    /// Constant span.
    pub fn from_literal(kind: ValueKind, literal: impl Into<ValueLiteral>) -> Result<Self, SpanError> {
        Self::new(kind, SpanConfig::value(literal))
    }

    /// Replace the whole configuration. On error the span is left unchanged.
    pub fn set(&mut self, config: impl Into<SpanConfig>) -> Result<(), SpanError> {
        let config = config.into();
        let state = ModeState::compile(self.kind, &config.mode)?;
        self.value = state.initial_value();
        self.state = state;
        self.force_integer = config.force_integer;
        self.temporal = config.temporal();
        self.noise = resolve_noise(config.noise, &mut self.rng);
        self.rebuild();
        debug!("span reconfigured: {} {}", self.kind, self.state.mode().name());
        Ok(())
    }

    /// Switch mode, keeping force-integer, temporal and noise settings.
    fn set_mode(&mut self, mode: ModeConfig) -> Result<(), SpanError> {
        let state = ModeState::compile(self.kind, &mode)?;
        self.value = state.initial_value();
        self.state = state;
        self.rebuild();
        debug!("span mode set: {} {}", self.kind, self.state.mode().name());
        Ok(())
    }

    pub fn set_value(&mut self, value: impl Into<ValueLiteral>) -> Result<(), SpanError> {
        self.set_mode(ModeConfig::Value {
            value: Some(value.into()),
        })
    }

    pub fn set_random(
        &mut self,
        start: impl Into<ValueLiteral>,
        end: impl Into<ValueLiteral>,
    ) -> Result<(), SpanError> {
        self.set_mode(ModeConfig::Random {
            start: Some(start.into()),
            end: Some(end.into()),
        })
    }

    pub fn set_random_lerp(
        &mut self,
        start: impl Into<ValueLiteral>,
        end: impl Into<ValueLiteral>,
    ) -> Result<(), SpanError> {
        self.set_mode(ModeConfig::RandomLerp {
            start: Some(start.into()),
            end: Some(end.into()),
        })
    }

    pub fn set_lerp(
        &mut self,
        start: impl Into<ValueLiteral>,
        end: impl Into<ValueLiteral>,
        easing: Easing,
    ) -> Result<(), SpanError> {
        self.set_mode(ModeConfig::Lerp {
            start: Some(start.into()),
            end: Some(end.into()),
            easing,
        })
    }

    pub fn set_curve(
        &mut self,
        start: impl Into<ValueLiteral>,
        end: impl Into<ValueLiteral>,
        curve: CurveConfig,
        curve_shape: CurveShape,
    ) -> Result<(), SpanError> {
        self.set_mode(ModeConfig::Curve {
            start: Some(start.into()),
            end: Some(end.into()),
            curve: Some(curve),
            curve_shape,
        })
    }

    pub fn set_array(&mut self, array: Vec<ValueLiteral>, pick: ArrayPick) -> Result<(), SpanError> {
        self.set_mode(ModeConfig::Array {
            array: Some(array),
            pick,
        })
    }

    pub fn set_gradient(&mut self, steps: Vec<(f32, ValueLiteral)>) -> Result<(), SpanError> {
        self.set_mode(ModeConfig::Gradient { steps: Some(steps) })
    }

    pub fn set_force_integer(&mut self, force_integer: bool) {
        self.force_integer = force_integer;
    }

    /// Attach (`Some`) or detach (`None`) noise.
    pub fn set_noise(&mut self, noise: Option<NoiseConfig>) {
        self.noise = resolve_noise(noise, &mut self.rng);
        self.rebuild();
    }

    pub fn set_temporal(&mut self, temporal: TemporalConfig) {
        self.temporal = temporal;
        self.rebuild();
    }

    /// Compose the stepper stack from the resolved state. Restarts every
    /// layer's internal counters.
    fn rebuild(&mut self) {
        self.stepper = compose(
            self.kind,
            &self.state,
            &self.temporal,
            self.noise.as_ref(),
            StdRng::from_rng(&mut self.rng),
        );
        self.clock.reset();
    }

    /// Advance and return the current value.
    ///
    /// With temporal settings `input` is a progress delta; without them it is
    /// absolute progress.
    pub fn step(&mut self, input: f32) -> &Value {
        self.stepper.step(input, &mut self.value);
        self.finish()
    }

    /// Advance from a monotonically increasing elapsed time (origin 0).
    ///
    /// Without temporal settings the elapsed time is the progress itself.
    pub fn step_elapsed(&mut self, time: f32) -> &Value {
        let delta = self.clock.delta(time);
        if self.temporal.is_identity() {
            self.step(time)
        } else {
            self.step(delta)
        }
    }

    /// Evaluate at absolute progress without touching temporal state.
    pub fn sample(&mut self, progress: f32) -> &Value {
        self.stepper.sample(progress, &mut self.value);
        self.finish()
    }

    fn finish(&mut self) -> &Value {
        if self.force_integer {
            if let Value::Float(v) = &mut self.value {
                *v = v.round();
            }
        }
        &self.value
    }

    /// Value written by the most recent call.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[inline]
    pub fn mode(&self) -> SpanMode {
        self.state.mode()
    }

    #[inline]
    pub fn force_integer(&self) -> bool {
        self.force_integer
    }

    #[inline]
    pub fn temporal(&self) -> &TemporalConfig {
        &self.temporal
    }

    #[inline]
    pub fn noise(&self) -> Option<&NoiseConfig> {
        self.noise.as_ref()
    }

    pub fn options(&self) -> &SpanOptions {
        &self.options
    }

    pub fn is_expired(&self) -> bool {
        self.stepper.expired()
    }

    /// Restart temporal, noise and picker state; configuration is unchanged.
    pub fn reset(&mut self) {
        self.value = self.state.initial_value();
        self.rebuild();
    }

    /// Serialized configuration, with non-default shared fields only.
    pub fn to_config(&self) -> SpanConfig {
        SpanConfig {
            mode: self.state.to_config(),
            force_integer: self.force_integer,
            noise: self.noise.clone(),
            speed: None,
            delay: None,
            repeat: None,
            alternate: false,
        }
        .with_temporal(&self.temporal)
    }

    pub fn to_json(&self) -> Result<String, SpanError> {
        serde_json::to_string(&self.to_config()).map_err(|e| SpanError::Serialization {
            reason: e.to_string(),
        })
    }

    /// New span rebuilt from this one's serialized configuration.
    pub fn duplicate(&self) -> Result<Self, SpanError> {
        Self::with_options(self.kind, self.to_config(), self.options.clone())
    }

    /// Take over `other`'s kind and configuration through its serialized form.
    pub fn copy_from(&mut self, other: &Span) -> Result<(), SpanError> {
        let config = other.to_config();
        let previous = self.kind;
        self.kind = other.kind;
        if let Err(err) = self.set(config) {
            self.kind = previous;
            return Err(err);
        }
        Ok(())
    }
}

/// Pin an unseeded noise config to a seed drawn from the span's generator so
/// the serialized configuration reproduces the same noise.
fn resolve_noise(noise: Option<NoiseConfig>, rng: &mut StdRng) -> Option<NoiseConfig> {
    noise.map(|noise| match noise.seed {
        Some(_) => noise,
        None => NoiseConfig {
            seed: Some(rng.random::<u32>()),
            ..noise
        },
    })
}

fn compose(
    kind: ValueKind,
    state: &ModeState,
    temporal: &TemporalConfig,
    noise: Option<&NoiseConfig>,
    rng: StdRng,
) -> Box<dyn Stepper> {
    let mut stepper: Box<dyn Stepper> = Box::new(BaseStepper::new(state.clone(), rng));
    if !temporal.is_identity() {
        stepper = Box::new(TemporalRemapper::new(stepper, temporal));
    }
    if let Some(noise) = noise {
        let seed = noise.seed.unwrap_or_default();
        stepper = Box::new(NoiseModulator::new(stepper, noise, seed, kind));
    }
    stepper
}
