mod animatable;
mod composite;
mod driver;
mod timing;
mod value;

pub use animatable::Animatable;
pub use composite::{Parallel, Sequence, StepStatus};
pub use driver::{DriverState, Frames, ProgressDriver};
pub use timing::TimingFunction;
pub use value::ProgressValue;

/// Shortest duration a run may have; anything below is clamped to this.
pub const MIN_DURATION_MS: f32 = 1.0;

/// What happens when a run reaches its end value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Stop at the end value
    #[default]
    None,
    /// Jump back to the start value and play again
    Restart,
    /// Play backwards to the start value, then forwards again
    Reverse,
}

/// Configuration of one animation run from `start_value` to `end_value`
#[derive(Clone, Debug)]
pub struct AnimationSpec {
    /// Duration of one cycle in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub easing: TimingFunction,
    /// Looping behaviour
    pub repeat: RepeatMode,
    /// Value at the start of a cycle
    pub start_value: f32,
    /// Value at the end of a cycle
    pub end_value: f32,
    /// Delay before the first cycle starts in milliseconds
    pub delay_ms: f32,
}

impl AnimationSpec {
    /// Create a one-shot run from 0.0 to 1.0
    pub fn new(duration_ms: f32, easing: TimingFunction) -> Self {
        Self {
            duration_ms,
            easing,
            repeat: RepeatMode::None,
            start_value: 0.0,
            end_value: 1.0,
            delay_ms: 0.0,
        }
    }

    /// Linear one-shot run from 0.0 to 1.0
    pub fn linear(duration_ms: f32) -> Self {
        Self::new(duration_ms, TimingFunction::Linear)
    }

    /// Set the start and end values
    pub fn values(mut self, start_value: f32, end_value: f32) -> Self {
        self.start_value = start_value;
        self.end_value = end_value;
        self
    }

    /// Set the looping behaviour
    pub fn repeat(mut self, repeat: RepeatMode) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn easing(mut self, easing: TimingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_infinite(&self) -> bool {
        self.repeat != RepeatMode::None
    }

    /// Duration with invalid values (negative, zero, NaN) clamped to
    /// [`MIN_DURATION_MS`].
    pub fn effective_duration_ms(&self) -> f32 {
        if self.duration_ms.is_finite() && self.duration_ms >= MIN_DURATION_MS {
            self.duration_ms
        } else {
            MIN_DURATION_MS
        }
    }

    pub fn effective_delay_ms(&self) -> f32 {
        if self.delay_ms.is_finite() {
            self.delay_ms.max(0.0)
        } else {
            0.0
        }
    }

    /// Inclusive `(min, max)` range every emitted value stays within.
    pub fn range(&self) -> (f32, f32) {
        (
            self.start_value.min(self.end_value),
            self.start_value.max(self.end_value),
        )
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::linear(300.0)
    }
}
