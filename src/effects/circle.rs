use super::{BorderConfig, BorderFrame, Component};
use crate::animation::{AnimationSpec, ProgressValue, RepeatMode, Sequence};
use crate::geometry::{ShapeKind, Size};
use crate::jobs::Invalidator;
use crate::paint::PaintContext;
use crate::render::FULL_SWEEP;

/// Fill duration of the rotating gradient before it starts turning.
const ROTATION_FILL_MS: f32 = 100.0;

/// How a [`CircleBorder`] animates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CircleAnimation {
    /// Solid stroke sweeping once around the circle
    Sweep,
    /// Gradient stroke sweeping once around the circle
    SweepGradient,
    /// Gradient ring filled almost instantly, then rotating forever
    #[default]
    RotationGradient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Channel {
    Sweep,
    Rotation,
}

/// Circular border around a content slot.
pub struct CircleBorder {
    animation: CircleAnimation,
    config: BorderConfig,
    frame: BorderFrame,
    timeline: Sequence<Channel>,
    sweep: ProgressValue,
    rotation: ProgressValue,
}

impl CircleBorder {
    pub fn new(animation: CircleAnimation, config: BorderConfig) -> Self {
        let sweep_repeat = if config.looping {
            RepeatMode::Restart
        } else {
            RepeatMode::None
        };
        let timeline = match animation {
            CircleAnimation::Sweep | CircleAnimation::SweepGradient => Sequence::new().then_run(
                Channel::Sweep,
                AnimationSpec::linear(config.duration_ms)
                    .values(0.0, FULL_SWEEP)
                    .repeat(sweep_repeat),
            ),
            CircleAnimation::RotationGradient => Sequence::new()
                .then_run(
                    Channel::Sweep,
                    AnimationSpec::linear(ROTATION_FILL_MS).values(0.0, FULL_SWEEP),
                )
                .then_run(
                    Channel::Rotation,
                    AnimationSpec::linear(config.duration_ms)
                        .values(0.0, FULL_SWEEP)
                        .repeat(RepeatMode::Restart),
                ),
        };
        let config = BorderConfig {
            gradient: config.gradient || animation != CircleAnimation::Sweep,
            ..config
        };
        Self {
            animation,
            config,
            frame: BorderFrame::new(ShapeKind::Circle),
            timeline,
            sweep: ProgressValue::new(0.0, 0.0, FULL_SWEEP),
            rotation: ProgressValue::new(0.0, 0.0, FULL_SWEEP),
        }
    }

    pub fn animation(&self) -> CircleAnimation {
        self.animation
    }

    /// Degrees of the border currently drawn.
    pub fn sweep_angle(&self) -> f32 {
        self.sweep.get()
    }

    /// Angle the drawn arc currently starts at.
    pub fn start_angle(&self) -> f32 {
        (self.config.start_angle + self.rotation.get()) % FULL_SWEEP
    }
}

impl Component for CircleBorder {
    fn name(&self) -> &'static str {
        "circle-border"
    }

    fn bind(&mut self, invalidator: Invalidator) {
        self.sweep.bind(invalidator.clone());
        self.rotation.bind(invalidator);
    }

    fn resize(&mut self, size: Size) {
        self.frame.resize(size, &self.config);
    }

    fn tick(&mut self, dt_ms: f32) {
        let (sweep, rotation) = (&mut self.sweep, &mut self.rotation);
        self.timeline.tick(dt_ms, |channel, value| match channel {
            Channel::Sweep => sweep.set(value),
            Channel::Rotation => rotation.set(value),
        });
    }

    fn paint(&self, ctx: &mut PaintContext) {
        self.frame.paint(
            ctx,
            &self.config,
            self.sweep.get() / FULL_SWEEP,
            self.start_angle(),
        );
    }

    fn is_animating(&self) -> bool {
        !self.timeline.is_complete()
    }

    fn unmount(&mut self) {
        self.timeline.stop();
        self.sweep.unbind();
        self.rotation.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DrawCommand, Paint};

    fn arc_of(border: &CircleBorder) -> Option<(f32, f32, Paint)> {
        let mut ctx = PaintContext::new(Size::new(100.0, 100.0));
        border.paint(&mut ctx);
        ctx.into_commands().into_iter().find_map(|c| match c {
            DrawCommand::Arc {
                start_angle,
                sweep_angle,
                paint,
                ..
            } => Some((start_angle, sweep_angle, paint)),
            _ => None,
        })
    }

    #[test]
    fn test_sweep_runs_once() {
        let mut border = CircleBorder::new(CircleAnimation::Sweep, BorderConfig::circle());
        border.resize(Size::new(100.0, 100.0));
        assert!(arc_of(&border).is_none());

        border.tick(2500.0);
        let (start, sweep, paint) = arc_of(&border).expect("arc after half the run");
        assert_eq!(start, 5.0);
        assert_eq!(sweep, 180.0);
        assert!(matches!(paint, Paint::Solid(_)));

        border.tick(5000.0);
        assert_eq!(border.sweep_angle(), 360.0);
        assert!(!border.is_animating());
    }

    #[test]
    fn test_sweep_gradient_uses_gradient_paint() {
        let mut border =
            CircleBorder::new(CircleAnimation::SweepGradient, BorderConfig::circle());
        border.resize(Size::new(100.0, 100.0));
        border.tick(1000.0);
        let (_, _, paint) = arc_of(&border).expect("arc");
        assert!(matches!(paint, Paint::Gradient { .. }));
    }

    #[test]
    fn test_rotation_fills_then_turns_forever() {
        let mut border = CircleBorder::new(
            CircleAnimation::RotationGradient,
            BorderConfig::circle().start_angle(0.0).duration(1000.0),
        );
        border.resize(Size::new(100.0, 100.0));

        border.tick(100.0);
        assert_eq!(border.sweep_angle(), 360.0);
        assert_eq!(border.start_angle(), 0.0);

        border.tick(250.0);
        assert_eq!(border.start_angle(), 90.0);

        // Many turns later it is still rotating
        for _ in 0..40 {
            border.tick(100.0);
        }
        assert!(border.is_animating());
        assert_eq!(border.start_angle(), 90.0);
    }

    #[test]
    fn test_unmount_stops_timeline() {
        let mut border = CircleBorder::new(CircleAnimation::Sweep, BorderConfig::circle());
        border.tick(1000.0);
        border.unmount();
        let before = border.sweep_angle();
        border.tick(1000.0);
        assert_eq!(border.sweep_angle(), before);
        assert!(!border.is_animating());
    }
}
