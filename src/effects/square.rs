use super::{BorderConfig, BorderFrame, Component};
use crate::animation::{AnimationSpec, ProgressDriver, ProgressValue, RepeatMode};
use crate::geometry::{ShapeKind, Size};
use crate::jobs::Invalidator;
use crate::paint::PaintContext;

/// How a [`SquareBorder`] strokes its path
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SquareAnimation {
    Border,
    #[default]
    BorderGradient,
}

/// Square border traced along its outline, starting from the middle of the
/// right edge.
pub struct SquareBorder {
    animation: SquareAnimation,
    config: BorderConfig,
    frame: BorderFrame,
    driver: ProgressDriver,
    progress: ProgressValue,
}

impl SquareBorder {
    pub fn new(animation: SquareAnimation, config: BorderConfig) -> Self {
        let repeat = if config.looping {
            RepeatMode::Restart
        } else {
            RepeatMode::None
        };
        let driver = ProgressDriver::start(
            AnimationSpec::linear(config.duration_ms)
                .values(0.0, 1.0)
                .repeat(repeat),
        );
        let config = BorderConfig {
            gradient: config.gradient || animation == SquareAnimation::BorderGradient,
            ..config
        };
        Self {
            animation,
            config,
            frame: BorderFrame::new(ShapeKind::SQUARE),
            driver,
            progress: ProgressValue::new(0.0, 0.0, 1.0),
        }
    }

    /// Round the corners of the traced outline.
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.frame = BorderFrame::new(ShapeKind::RoundedSquare {
            corner_radius: radius,
        });
        self
    }

    pub fn animation(&self) -> SquareAnimation {
        self.animation
    }

    /// Fraction of the outline currently drawn.
    pub fn progress(&self) -> f32 {
        self.progress.get()
    }
}

impl Component for SquareBorder {
    fn name(&self) -> &'static str {
        "square-border"
    }

    fn bind(&mut self, invalidator: Invalidator) {
        self.progress.bind(invalidator);
    }

    fn resize(&mut self, size: Size) {
        self.frame.resize(size, &self.config);
    }

    fn tick(&mut self, dt_ms: f32) {
        if let Some(value) = self.driver.tick(dt_ms) {
            self.progress.set(value);
        }
    }

    fn paint(&self, ctx: &mut PaintContext) {
        self.frame.paint(
            ctx,
            &self.config,
            self.progress.get(),
            self.config.start_angle,
        );
    }

    fn is_animating(&self) -> bool {
        self.driver.is_active()
    }

    fn unmount(&mut self) {
        self.driver.stop();
        self.progress.unbind();
    }
}
