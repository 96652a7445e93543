//! Animated effects.
//!
//! Each effect is a [`Component`]: it owns its drivers and progress values,
//! advances them on [`Component::tick`], caches its geometry on
//! [`Component::resize`] and describes the current frame in
//! [`Component::paint`]. Components never read a clock and never hold a
//! strong reference to the host that renders them.

mod circle;
mod cool;
mod flashlight;
mod heart;
mod square;
mod waves;

pub use circle::{CircleAnimation, CircleBorder};
pub use cool::{CoolCircleBorder, CoolPhase};
pub use flashlight::{Flashlight, FlashlightConfig};
pub use heart::{Heart, HeartConfig};
pub use square::{SquareAnimation, SquareBorder};
pub use waves::{Waves, WavesConfig};

use crate::geometry::{
    compute_boundary, default_stroke_width, Rect, ShapeBoundary, ShapeKind, Size,
};
use crate::jobs::Invalidator;
use crate::paint::{Brush, ClipShape, Color, PaintContext, StrokeCap, StrokeStyle};
use crate::render;

/// Angle that keeps a round cap from overlapping the gradient's seam.
pub const SAFE_START_ANGLE: f32 = 5.0;

/// An animated element driven by host ticks.
pub trait Component {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attach the render target notified when this component changes.
    fn bind(&mut self, invalidator: Invalidator);

    /// Layout size changed; recompute cached geometry.
    fn resize(&mut self, size: Size);

    /// Advance animations by `dt_ms` milliseconds.
    fn tick(&mut self, dt_ms: f32);

    /// Describe the current frame.
    fn paint(&self, ctx: &mut PaintContext);

    /// True while another tick could change the output.
    fn is_animating(&self) -> bool;

    /// Pointer drag forwarded by the host.
    fn drag(&mut self, dx: f32, dy: f32) {
        let _ = (dx, dy);
    }

    /// Stop all drivers and detach from the render target.
    fn unmount(&mut self);
}

/// Construction parameters shared by the border effects.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderConfig {
    pub stroke_color: Color,
    /// Color of the static track under the animated stroke
    pub track_color: Color,
    /// Stroke width in pixels; `None` derives it from the layout width
    pub stroke_width: Option<f32>,
    /// Inset of the content slot inside the border
    pub content_padding: f32,
    /// Duration of one animation cycle in milliseconds
    pub duration_ms: f32,
    pub looping: bool,
    pub gradient: bool,
    /// Angle the border starts from, clockwise from 3 o'clock
    pub start_angle: f32,
    /// Alpha of the gradient's trailing edge
    pub trailing_alpha: f32,
    pub cap: StrokeCap,
}

impl BorderConfig {
    /// Defaults of the circle sweep border
    pub fn circle() -> Self {
        Self {
            stroke_color: Color::LIME,
            track_color: Color::TRANSPARENT,
            stroke_width: None,
            content_padding: 0.0,
            duration_ms: 5000.0,
            looping: false,
            gradient: false,
            start_angle: SAFE_START_ANGLE,
            trailing_alpha: Brush::DEFAULT_TRAILING_ALPHA,
            cap: StrokeCap::Round,
        }
    }

    /// Defaults of the fill/clear circle border
    pub fn cool() -> Self {
        Self {
            duration_ms: 4000.0,
            looping: true,
            ..Self::circle()
        }
    }

    /// Defaults of the square path border
    pub fn square() -> Self {
        Self {
            duration_ms: 2500.0,
            looping: true,
            start_angle: 0.0,
            cap: StrokeCap::Butt,
            ..Self::circle()
        }
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn content_padding(mut self, padding: f32) -> Self {
        self.content_padding = padding;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn gradient(mut self, gradient: bool) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn start_angle(mut self, angle: f32) -> Self {
        self.start_angle = angle;
        self
    }

    pub fn trailing_alpha(mut self, alpha: f32) -> Self {
        self.trailing_alpha = alpha;
        self
    }

    pub fn cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    /// Stroke width for a layout, falling back to the derived default.
    pub fn resolved_stroke_width(&self, size: Size) -> f32 {
        match self.stroke_width {
            Some(width) if width.is_finite() && width >= 0.0 => width,
            _ => default_stroke_width(size.width),
        }
    }

    pub fn stroke_style(&self, width: f32) -> StrokeStyle {
        let brush = if self.gradient {
            Brush::Gradient {
                color: self.stroke_color,
                trailing_alpha: self.trailing_alpha,
            }
        } else {
            Brush::Solid(self.stroke_color)
        };
        StrokeStyle {
            brush,
            width,
            cap: self.cap,
        }
    }
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self::circle()
    }
}

/// Layout cache shared by the border effects: content slot, track and the
/// boundary the animated stroke follows.
#[derive(Debug)]
pub(crate) struct BorderFrame {
    kind: ShapeKind,
    size: Size,
    stroke_width: f32,
    boundary: Option<ShapeBoundary>,
}

impl BorderFrame {
    pub(crate) fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            size: Size::ZERO,
            stroke_width: 0.0,
            boundary: None,
        }
    }

    /// Recompute the boundary when the size changed. Returns true if it did.
    pub(crate) fn resize(&mut self, size: Size, config: &BorderConfig) -> bool {
        if size == self.size && self.boundary.is_some() {
            return false;
        }
        self.size = size;
        self.stroke_width = config.resolved_stroke_width(size);
        self.boundary = compute_boundary(self.kind, size, self.stroke_width);
        log::debug!(
            "Border {:?} resized to {}x{} (stroke {})",
            self.kind,
            size.width,
            size.height,
            self.stroke_width
        );
        true
    }

    pub(crate) fn boundary(&self) -> Option<&ShapeBoundary> {
        self.boundary.as_ref()
    }

    /// Content slot, track, then the animated stroke at `progress`.
    pub(crate) fn paint(
        &self,
        ctx: &mut PaintContext,
        config: &BorderConfig,
        progress: f32,
        start_angle: f32,
    ) {
        let Some(boundary) = &self.boundary else {
            return;
        };
        let clip = match self.kind {
            ShapeKind::Circle => ClipShape::Circle,
            ShapeKind::RoundedSquare { .. } => ClipShape::Rect,
        };
        ctx.content(
            Rect::from_size(self.size).inset(config.content_padding.max(0.0)),
            clip,
        );
        let style = config.stroke_style(self.stroke_width);
        ctx.extend(render::render_with_track(
            boundary,
            progress,
            &style,
            config.track_color,
            start_angle,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::DrawCommand;

    #[test]
    fn test_stroke_width_defaults_to_layout_fraction() {
        let config = BorderConfig::circle();
        assert_eq!(config.resolved_stroke_width(Size::new(80.0, 80.0)), 2.0);
        let config = config.stroke_width(6.0);
        assert_eq!(config.resolved_stroke_width(Size::new(80.0, 80.0)), 6.0);
    }

    #[test]
    fn test_frame_paints_content_track_and_stroke() {
        let config = BorderConfig::circle()
            .track_color(Color::WHITE)
            .content_padding(8.0);
        let mut frame = BorderFrame::new(ShapeKind::Circle);
        assert!(frame.resize(Size::new(92.0, 92.0), &config));
        assert!(!frame.resize(Size::new(92.0, 92.0), &config));

        let mut ctx = PaintContext::new(Size::new(92.0, 92.0));
        frame.paint(&mut ctx, &config, 0.5, SAFE_START_ANGLE);
        let commands = ctx.into_commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            DrawCommand::Content {
                rect: Rect::new(8.0, 8.0, 76.0, 76.0),
                clip: ClipShape::Circle,
            }
        );
    }

    #[test]
    fn test_frame_without_layout_paints_nothing() {
        let frame = BorderFrame::new(ShapeKind::SQUARE);
        let mut ctx = PaintContext::new(Size::ZERO);
        frame.paint(&mut ctx, &BorderConfig::square(), 1.0, 0.0);
        assert!(ctx.commands().is_empty());
    }
}
