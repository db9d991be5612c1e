//! Stepper interface and the per-mode base stepper.
//!
//! A stepper writes the value for one input into a caller-owned output slot.
//! Layers (temporal remapping, noise) wrap a boxed inner stepper and expose the
//! same interface, so any stack of them is itself a `Stepper`.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::ArrayPick;
use crate::interp::functions::{lerp_f32, normalize4};
use crate::interp::geometric_lerp;
use crate::mode::ModeState;
use crate::value::Value;

pub trait Stepper: Send {
    /// Advance by `input` and write the result into `out`.
    fn step(&mut self, input: f32, out: &mut Value);

    /// Evaluate at absolute `progress`, bypassing any time-keeping state.
    fn sample(&mut self, progress: f32, out: &mut Value) {
        self.step(progress, out);
    }

    /// True once the stepper is frozen at its terminal value.
    fn expired(&self) -> bool {
        false
    }
}

/// Sequence state for `array` mode.
#[derive(Clone, Debug)]
pub struct ArrayPicker {
    len: usize,
    pick: ArrayPick,
    counter: usize,
}

impl ArrayPicker {
    /// `len` must be non-zero; `ModeState::compile` rejects empty arrays.
    pub fn new(len: usize, pick: ArrayPick) -> Self {
        debug_assert!(len > 0, "array picker needs at least one item");
        Self {
            len,
            pick,
            counter: 0,
        }
    }

    /// Index for this call; advances the sequence.
    pub fn next(&mut self, rng: &mut StdRng) -> usize {
        let n = self.len;
        let index = match self.pick {
            ArrayPick::Random => rng.random_range(0..n),
            ArrayPick::Repeat => self.counter % n,
            ArrayPick::Alternate => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * (n - 1);
                    let i = self.counter % period;
                    if i < n {
                        i
                    } else {
                        period - i
                    }
                }
            }
        };
        self.counter = self.counter.wrapping_add(1);
        index
    }
}

/// Mode strategy selected once at configuration time.
pub struct BaseStepper {
    state: ModeState,
    picker: Option<ArrayPicker>,
    rng: StdRng,
}

impl BaseStepper {
    pub fn new(state: ModeState, rng: StdRng) -> Self {
        let picker = match &state {
            ModeState::Array { items, pick } => Some(ArrayPicker::new(items.len(), *pick)),
            _ => None,
        };
        Self { state, picker, rng }
    }
}

impl Stepper for BaseStepper {
    fn step(&mut self, progress: f32, out: &mut Value) {
        match &self.state {
            ModeState::Value(v) => *out = *v,
            ModeState::Random { start, end } => {
                *out = *start;
                for (o, (a, b)) in out
                    .components_mut()
                    .iter_mut()
                    .zip(start.components().iter().zip(end.components()))
                {
                    *o = lerp_f32(*a, *b, self.rng.random::<f32>());
                }
                if let Value::Quat(q) = out {
                    *q = normalize4(*q);
                }
            }
            ModeState::RandomLerp { start, end } => {
                let r = self.rng.random::<f32>();
                *out = *start;
                geometric_lerp(start, end, r, out);
            }
            ModeState::Lerp { start, end, easing } => {
                *out = *start;
                geometric_lerp(start, end, easing.apply(progress), out);
            }
            ModeState::Curve {
                start, end, axes, ..
            } => {
                *out = *start;
                let n = start.components().len();
                for (i, axis) in axes.iter().enumerate().take(n) {
                    if let Some(axis) = axis {
                        let t = axis.curve.evaluate(progress);
                        out.components_mut()[i] =
                            lerp_f32(start.components()[i], end.components()[i], t);
                    }
                }
                if let Value::Quat(q) = out {
                    *q = normalize4(*q);
                }
            }
            ModeState::Array { items, .. } => {
                let index = match self.picker.as_mut() {
                    Some(picker) => picker.next(&mut self.rng),
                    None => 0,
                };
                *out = items[index];
            }
            ModeState::Gradient(g) => g.sample_into(progress, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn alternate_bounces_without_repeating_endpoints() {
        let mut picker = ArrayPicker::new(3, ArrayPick::Alternate);
        let mut rng = rng();
        let seq: Vec<usize> = (0..9).map(|_| picker.next(&mut rng)).collect();
        assert_eq!(seq, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]);
    }

    #[test]
    fn repeat_wraps() {
        let mut picker = ArrayPicker::new(3, ArrayPick::Repeat);
        let mut rng = rng();
        let seq: Vec<usize> = (0..7).map(|_| picker.next(&mut rng)).collect();
        assert_eq!(seq, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn single_element_alternate_is_stable() {
        let mut picker = ArrayPicker::new(1, ArrayPick::Alternate);
        let mut rng = rng();
        assert!((0..4).all(|_| picker.next(&mut rng) == 0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least one item")]
    fn empty_picker_is_rejected() {
        ArrayPicker::new(0, ArrayPick::Repeat);
    }

    #[test]
    fn random_stays_in_range() {
        let mut picker = ArrayPicker::new(4, ArrayPick::Random);
        let mut rng = rng();
        assert!((0..200).all(|_| picker.next(&mut rng) < 4));
    }

    #[test]
    fn random_components_stay_within_bounds() {
        let mut base = BaseStepper::new(
            ModeState::Random {
                start: Value::Vec2([0.0, 10.0]),
                end: Value::Vec2([1.0, 20.0]),
            },
            rng(),
        );
        let mut out = Value::Vec2([0.0; 2]);
        for _ in 0..100 {
            base.step(0.0, &mut out);
            let c = out.components();
            assert!((0.0..=1.0).contains(&c[0]));
            assert!((10.0..=20.0).contains(&c[1]));
        }
    }
}
