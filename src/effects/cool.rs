//! Fill-then-clear circle border.
//!
//! One cycle fills the ring from the start angle, then chases its own tail:
//! the start angle advances to a full turn while the sweep retreats to zero,
//! both at the same time. When both have landed the start angle snaps back
//! and the next cycle begins in the same tick.

use super::{BorderConfig, BorderFrame, Component, SAFE_START_ANGLE};
use crate::animation::{
    AnimationSpec, Parallel, ProgressDriver, ProgressValue, StepStatus, TimingFunction,
};
use crate::geometry::{ShapeKind, Size};
use crate::jobs::Invalidator;
use crate::paint::PaintContext;
use crate::render::FULL_SWEEP;

/// Phase of the fill/clear cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoolPhase {
    /// Sweep grows from zero to a full turn
    Filling,
    /// Start angle advances and sweep retreats, in parallel
    Clearing,
    /// Start angle snaps back before the next fill
    Restarting,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Channel {
    StartAngle,
    Sweep,
}

/// Phase changes handled within one tick before yielding.
const MAX_PHASES_PER_TICK: usize = 16;

/// Circle border running the fill/clear cycle until unmounted.
pub struct CoolCircleBorder {
    config: BorderConfig,
    frame: BorderFrame,
    phase: CoolPhase,
    fill: ProgressDriver,
    clear: Parallel<Channel>,
    start_angle: ProgressValue,
    sweep: ProgressValue,
    stopped: bool,
}

impl CoolCircleBorder {
    pub fn new(config: BorderConfig) -> Self {
        let total = config.duration_ms.max(2.0);
        // 70% fill, 30% clear, summing to the configured duration exactly
        let fill_ms = (total * 7.0 / 10.0).floor();
        let clear_ms = total - fill_ms;
        let easing = TimingFunction::FAST_OUT_SLOW_IN;

        let fill = ProgressDriver::start(
            AnimationSpec::new(fill_ms, easing.clone()).values(0.0, FULL_SWEEP),
        );
        let clear = Parallel::new()
            .with(
                Channel::StartAngle,
                AnimationSpec::new(clear_ms, easing.clone()).values(SAFE_START_ANGLE, FULL_SWEEP),
            )
            .with(
                Channel::Sweep,
                AnimationSpec::new(clear_ms, easing).values(FULL_SWEEP, 0.0),
            );

        Self {
            config,
            frame: BorderFrame::new(ShapeKind::Circle),
            phase: CoolPhase::Filling,
            fill,
            clear,
            start_angle: ProgressValue::new(SAFE_START_ANGLE, SAFE_START_ANGLE, FULL_SWEEP),
            sweep: ProgressValue::new(0.0, 0.0, FULL_SWEEP),
            stopped: false,
        }
    }

    pub fn phase(&self) -> CoolPhase {
        self.phase
    }

    pub fn sweep_angle(&self) -> f32 {
        self.sweep.get()
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle.get()
    }

    fn advance(&mut self, dt_ms: f32) {
        let mut remaining = dt_ms;
        for _ in 0..MAX_PHASES_PER_TICK {
            match self.phase {
                CoolPhase::Filling => {
                    if let Some(value) = self.fill.tick(remaining) {
                        self.sweep.set(value);
                    }
                    if !self.fill.is_finished() {
                        return;
                    }
                    remaining = self.fill.overshoot_ms();
                    self.clear.restart();
                    self.phase = CoolPhase::Clearing;
                    log::trace!("Cool border: filling -> clearing");
                    if remaining <= 0.0 {
                        return;
                    }
                }
                CoolPhase::Clearing => {
                    let (start_angle, sweep) = (&mut self.start_angle, &mut self.sweep);
                    let status = self.clear.tick(remaining, |channel, value| match channel {
                        Channel::StartAngle => start_angle.set(value),
                        Channel::Sweep => sweep.set(value),
                    });
                    match status {
                        StepStatus::Running => return,
                        StepStatus::Complete { leftover_ms } => {
                            remaining = leftover_ms;
                            self.phase = CoolPhase::Restarting;
                            log::trace!("Cool border: clearing -> restarting");
                        }
                    }
                }
                CoolPhase::Restarting => {
                    // Immediate: no tick time is spent here
                    self.start_angle.set(SAFE_START_ANGLE);
                    self.sweep.set(0.0);
                    self.fill.restart();
                    self.phase = CoolPhase::Filling;
                    if remaining <= 0.0 {
                        return;
                    }
                }
            }
        }
    }
}

impl Component for CoolCircleBorder {
    fn name(&self) -> &'static str {
        "cool-circle-border"
    }

    fn bind(&mut self, invalidator: Invalidator) {
        self.start_angle.bind(invalidator.clone());
        self.sweep.bind(invalidator);
    }

    fn resize(&mut self, size: Size) {
        self.frame.resize(size, &self.config);
    }

    fn tick(&mut self, dt_ms: f32) {
        if self.stopped {
            return;
        }
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.advance(dt_ms);
    }

    fn paint(&self, ctx: &mut PaintContext) {
        self.frame.paint(
            ctx,
            &self.config,
            self.sweep.get() / FULL_SWEEP,
            self.start_angle.get(),
        );
    }

    fn is_animating(&self) -> bool {
        !self.stopped
    }

    fn unmount(&mut self) {
        self.stopped = true;
        self.fill.stop();
        self.clear.stop();
        self.start_angle.unbind();
        self.sweep.unbind();
    }
}
