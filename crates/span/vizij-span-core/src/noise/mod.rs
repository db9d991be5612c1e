//! Procedural noise applied on top of any stepper's output.
//!
//! The application path is chosen once from the value kind:
//! - `Float`: `v += noise2(v * frequency, t) * amplitude`
//! - vectors and colors: each axis is perturbed in proportion to its own
//!   magnitude, `c += noise3(c * frequency, paired * frequency, t) * c * amplitude`,
//!   with axis pairs (x,y), (y,z|x), (z,x), (w,y). Colors perturb RGB only.
//! - rotations pass through untouched.

pub mod simplex;

use log::warn;

use crate::config::NoiseConfig;
use crate::stepper::Stepper;
use crate::value::{Value, ValueKind};

pub use simplex::Simplex;

/// Advance of the noise time axis per completed cycle, before `speed`.
pub const TIME_STEP: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NoisePath {
    Scalar,
    Components(usize),
    Passthrough,
}

impl NoisePath {
    fn for_kind(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Float => NoisePath::Scalar,
            ValueKind::Quat | ValueKind::Euler => NoisePath::Passthrough,
            ValueKind::Color => NoisePath::Components(3),
            other => NoisePath::Components(other.components()),
        }
    }
}

#[inline]
fn paired_axis(axis: usize, len: usize) -> usize {
    match axis {
        0 => 1,
        1 if len >= 3 => 2,
        1 => 0,
        2 => 0,
        _ => 1,
    }
}

pub struct NoiseModulator {
    inner: Box<dyn Stepper>,
    plane: Simplex,
    volume: Simplex,
    path: NoisePath,
    frequency: f32,
    amplitude: f32,
    cycle: f32,
    speed: f32,
    time: f32,
    timer: f32,
}

impl NoiseModulator {
    /// Wrap `inner`. `seed` is the resolved seed; both fields are built from it.
    pub fn new(inner: Box<dyn Stepper>, config: &NoiseConfig, seed: u32, kind: ValueKind) -> Self {
        let path = NoisePath::for_kind(kind);
        if path == NoisePath::Passthrough {
            warn!("noise has no effect on '{kind}' spans; values pass through unchanged");
        }
        Self {
            inner,
            plane: Simplex::new(seed),
            volume: Simplex::new(seed),
            path,
            frequency: config.frequency,
            amplitude: config.amplitude,
            cycle: config.cycle,
            speed: config.speed,
            time: 0.0,
            timer: 0.0,
        }
    }

    /// Current position on the noise time axis.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    fn advance(&mut self, input: f32) {
        self.timer += input.abs();
        if self.timer >= self.cycle {
            self.timer = 0.0;
            self.time += self.speed * TIME_STEP;
        }
    }

    fn apply(&self, out: &mut Value) {
        let f = self.frequency;
        match self.path {
            NoisePath::Passthrough => {}
            NoisePath::Scalar => {
                if let Value::Float(v) = out {
                    *v += self.plane.noise2(*v * f, self.time) * self.amplitude;
                }
            }
            NoisePath::Components(len) => {
                let comps = out.components_mut();
                let len = len.min(comps.len());
                let mut snapshot = [0.0f32; 4];
                snapshot[..len].copy_from_slice(&comps[..len]);
                for (axis, c) in comps.iter_mut().enumerate().take(len) {
                    let own = snapshot[axis];
                    let pair = snapshot[paired_axis(axis, len)];
                    *c += self.volume.noise3(own * f, pair * f, self.time) * own * self.amplitude;
                }
            }
        }
    }
}

impl Stepper for NoiseModulator {
    fn step(&mut self, input: f32, out: &mut Value) {
        self.inner.step(input, out);
        self.advance(input);
        self.apply(out);
    }

    fn sample(&mut self, progress: f32, out: &mut Value) {
        self.inner.sample(progress, out);
        self.apply(out);
    }

    fn expired(&self) -> bool {
        self.inner.expired()
    }
}
