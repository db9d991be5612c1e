//! Delay/speed/repeat/alternate remapping of incremental input.
//!
//! Time math:
//! - Every call accumulates `|input * speed|` into `timer`.
//! - While the initial delay is pending the inner stepper sees progress 0.
//!   Crossing the delay subtracts it from `timer` once.
//! - A cycle is one unit of progress. Reaching it resets `timer` to 0 and
//!   counts the cycle; once `repeat` cycles have completed the remapper
//!   freezes at progress 1.
//! - `alternate` mirrors progress on odd completed cycles; a negative `speed`
//!   mirrors it as well.

use log::{debug, trace};

use crate::config::TemporalConfig;
use crate::stepper::Stepper;
use crate::value::Value;

pub struct TemporalRemapper {
    inner: Box<dyn Stepper>,
    speed: f32,
    delay: f32,
    repeat: Option<u32>,
    alternate: bool,
    timer: f32,
    repeated: u32,
    first_cycle: bool,
    expired: bool,
}

impl TemporalRemapper {
    pub fn new(inner: Box<dyn Stepper>, config: &TemporalConfig) -> Self {
        Self {
            inner,
            speed: config.speed,
            delay: config.delay.max(0.0),
            repeat: config.repeat,
            alternate: config.alternate,
            timer: 0.0,
            repeated: 0,
            first_cycle: true,
            expired: false,
        }
    }

    /// Completed cycles so far.
    #[inline]
    pub fn repeated(&self) -> u32 {
        self.repeated
    }

    fn progress(&self) -> f32 {
        let mut p = self.timer;
        if self.alternate && self.repeated % 2 == 1 {
            p = 1.0 - p;
        }
        if self.speed < 0.0 {
            p = 1.0 - p;
        }
        p
    }
}

impl Stepper for TemporalRemapper {
    fn step(&mut self, input: f32, out: &mut Value) {
        if self.expired {
            self.inner.step(1.0, out);
            return;
        }
        self.timer += (input * self.speed).abs();

        if self.first_cycle {
            if self.timer < self.delay {
                self.inner.step(0.0, out);
                return;
            }
            self.timer -= self.delay;
            self.first_cycle = false;
        }

        if self.timer >= 1.0 {
            self.timer = 0.0;
            self.repeated += 1;
            if self.repeat.is_some_and(|r| self.repeated >= r) {
                self.expired = true;
                debug!("span expired after {} cycles", self.repeated);
                self.inner.step(1.0, out);
                return;
            }
            trace!("span cycle {} complete", self.repeated);
        }

        let p = self.progress();
        self.inner.step(p, out);
    }

    fn sample(&mut self, progress: f32, out: &mut Value) {
        self.inner.sample(progress, out);
    }

    fn expired(&self) -> bool {
        self.expired
    }
}

/// Converts monotonically increasing elapsed time into per-call deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElapsedClock {
    last: f32,
}

impl ElapsedClock {
    /// Delta since the previous call (origin 0).
    pub fn delta(&mut self, time: f32) -> f32 {
        let delta = time - self.last;
        self.last = time;
        delta
    }

    pub fn reset(&mut self) {
        self.last = 0.0;
    }
}
