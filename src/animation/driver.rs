//! Tick-driven progress driver.
//!
//! A [`ProgressDriver`] owns the progress state of a single animation run. It
//! never reads a clock: the host calls [`ProgressDriver::tick`] once per frame
//! with the elapsed milliseconds, and the driver answers with the value for
//! that frame.
//!
//! ```
//! use halo::animation::{AnimationSpec, ProgressDriver};
//!
//! let mut driver = ProgressDriver::start(AnimationSpec::linear(100.0).values(0.0, 360.0));
//! assert_eq!(driver.tick(50.0), Some(180.0));
//! assert_eq!(driver.tick(80.0), Some(360.0)); // overshoot clamps
//! assert_eq!(driver.tick(16.0), None); // finished
//! ```

use super::{Animatable, AnimationSpec, RepeatMode};

/// Lifecycle of a driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Waiting for the start delay to elapse
    Delayed,
    /// Emitting values
    Running,
    /// A finite run reached its end value
    Finished,
    /// Stopped from outside; emits nothing further
    Stopped,
}

/// Progress state of one animation run
#[derive(Clone, Debug)]
pub struct ProgressDriver {
    spec: AnimationSpec,
    state: DriverState,
    /// Delay left before the first cycle
    delay_remaining_ms: f32,
    /// Time into the current cycle, always within `[0, duration)`
    cycle_ms: f32,
    /// Current direction for `RepeatMode::Reverse`
    reversed: bool,
    /// Time past the end of a finished run
    overshoot_ms: f32,
    value: f32,
}

impl ProgressDriver {
    /// Begin a new run. The driver holds `start_value` until the first tick.
    pub fn start(spec: AnimationSpec) -> Self {
        let delay = spec.effective_delay_ms();
        Self {
            state: if delay > 0.0 {
                DriverState::Delayed
            } else {
                DriverState::Running
            },
            delay_remaining_ms: delay,
            cycle_ms: 0.0,
            reversed: false,
            overshoot_ms: 0.0,
            value: spec.start_value,
            spec,
        }
    }

    /// A driver that is not running and holds `value`.
    pub fn idle(value: f32) -> Self {
        let spec = AnimationSpec::linear(super::MIN_DURATION_MS).values(value, value);
        let mut driver = Self::start(spec);
        driver.state = DriverState::Finished;
        driver
    }

    /// Start over with the same spec.
    pub fn restart(&mut self) {
        *self = Self::start(self.spec.clone());
    }

    /// Advance by `dt_ms` and return the value for this frame.
    ///
    /// Returns `None` once the run is finished or stopped. Negative or
    /// non-finite deltas are treated as zero.
    pub fn tick(&mut self, dt_ms: f32) -> Option<f32> {
        let mut dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        match self.state {
            DriverState::Finished | DriverState::Stopped => return None,
            DriverState::Delayed => {
                if dt < self.delay_remaining_ms {
                    self.delay_remaining_ms -= dt;
                    return Some(self.value);
                }
                dt -= self.delay_remaining_ms;
                self.delay_remaining_ms = 0.0;
                self.state = DriverState::Running;
            }
            DriverState::Running => {}
        }

        let duration = self.spec.effective_duration_ms();
        let elapsed = self.cycle_ms + dt;

        let fraction = match self.spec.repeat {
            RepeatMode::None => {
                if elapsed >= duration {
                    self.overshoot_ms = elapsed - duration;
                    self.cycle_ms = duration;
                    self.state = DriverState::Finished;
                    self.value = self.spec.end_value;
                    log::trace!("Progress run finished at {}", self.value);
                    return Some(self.value);
                }
                self.cycle_ms = elapsed;
                elapsed / duration
            }
            RepeatMode::Restart => {
                self.cycle_ms = elapsed % duration;
                self.cycle_ms / duration
            }
            RepeatMode::Reverse => {
                let cycles = (elapsed / duration).floor();
                self.cycle_ms = elapsed - cycles * duration;
                // Guard against the remainder rounding up to a full cycle
                if self.cycle_ms >= duration {
                    self.cycle_ms = 0.0;
                }
                if cycles % 2.0 == 1.0 {
                    self.reversed = !self.reversed;
                }
                let t = self.cycle_ms / duration;
                if self.reversed {
                    1.0 - t
                } else {
                    t
                }
            }
        };

        self.value = self.interpolate(fraction);
        Some(self.value)
    }

    /// Adapt the driver into a lazy sequence of values, one per tick delta.
    ///
    /// The sequence ends when `dts` runs out or when a finite run completes.
    pub fn frames<I>(&mut self, dts: I) -> Frames<'_, I::IntoIter>
    where
        I: IntoIterator<Item = f32>,
    {
        Frames {
            driver: self,
            dts: dts.into_iter(),
        }
    }

    /// Stop emitting values; the current value is kept.
    pub fn stop(&mut self) {
        if self.is_active() {
            self.state = DriverState::Stopped;
        }
    }

    /// Jump to `value` without animating and stop the run.
    pub fn snap_to(&mut self, value: f32) {
        let (min, max) = self.spec.range();
        self.value = value.clamp(min, max);
        self.state = DriverState::Stopped;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    /// True while waiting for the delay or emitting values.
    pub fn is_active(&self) -> bool {
        matches!(self.state, DriverState::Delayed | DriverState::Running)
    }

    pub fn is_delayed(&self) -> bool {
        self.state == DriverState::Delayed
    }

    pub fn is_finished(&self) -> bool {
        self.state == DriverState::Finished
    }

    /// Time the last tick went past the end of a finished run.
    pub fn overshoot_ms(&self) -> f32 {
        if self.is_finished() {
            self.overshoot_ms
        } else {
            0.0
        }
    }

    /// Normalized progress of the current cycle, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        (self.cycle_ms / self.spec.effective_duration_ms()).clamp(0.0, 1.0)
    }

    fn interpolate(&self, fraction: f32) -> f32 {
        let eased = self.spec.easing.evaluate(fraction);
        let value = <f32 as Animatable>::lerp(&self.spec.start_value, &self.spec.end_value, eased);
        let (min, max) = self.spec.range();
        value.clamp(min, max)
    }
}

/// Lazy sequence of driver values; see [`ProgressDriver::frames`].
pub struct Frames<'a, I> {
    driver: &'a mut ProgressDriver,
    dts: I,
}

impl<I: Iterator<Item = f32>> Iterator for Frames<'_, I> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let dt = self.dts.next()?;
        self.driver.tick(dt)
    }
}
