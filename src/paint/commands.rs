//! Draw command definitions.

use super::Color;
use super::StrokeCap;
use crate::animation::Animatable;
use crate::geometry::{Path, Point, Rect, Size};

/// Stroke geometry for arc and path commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke width in pixels
    pub width: f32,
    /// Cap style for open strokes
    pub cap: StrokeCap,
}

/// Resolved color source of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Interpolates from `from` at the start of the stroke to `to` at its end,
    /// parameterised by sweep angle for arcs and by length for paths.
    Gradient { from: Color, to: Color },
}

impl Paint {
    /// Color at fraction `t` along the stroke.
    pub fn color_at(&self, t: f32) -> Color {
        match *self {
            Paint::Solid(color) => color,
            Paint::Gradient { from, to } => Color::lerp(&from, &to, t.clamp(0.0, 1.0)),
        }
    }
}

/// Shape the host should clip the content slot to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipShape {
    None,
    Circle,
    Rect,
}

/// A single draw operation in the component's local coordinates.
///
/// Angles are in degrees, measured clockwise from 3 o'clock (y grows down).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Stroke an arc of a circle.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
        stroke: Stroke,
        paint: Paint,
    },

    /// Stroke an open or closed polyline.
    Path {
        path: Path,
        stroke: Stroke,
        paint: Paint,
    },

    /// Fill a closed polyline.
    FillPath { path: Path, color: Color },

    /// Fill a circle (ripple waves).
    Circle {
        center: Point,
        radius: f32,
        color: Color,
    },

    /// Fill an ellipse inscribed in `rect`.
    Oval { rect: Rect, color: Color },

    /// Radial mask over `rect`: `inner` at `center`, `outer` from `radius` on.
    RadialMask {
        rect: Rect,
        center: Point,
        radius: f32,
        inner: Color,
        outer: Color,
    },

    /// Slot where the host draws its own content (profile image, text).
    Content { rect: Rect, clip: ClipShape },
}

/// Collects the draw commands of one component for one frame.
pub struct PaintContext {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl PaintContext {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Layout size of the component being painted.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        if radius > 0.0 && !color.is_transparent() {
            self.push(DrawCommand::Circle {
                center,
                radius,
                color,
            });
        }
    }

    pub fn fill_oval(&mut self, rect: Rect, color: Color) {
        if !rect.is_empty() && !color.is_transparent() {
            self.push(DrawCommand::Oval { rect, color });
        }
    }

    pub fn content(&mut self, rect: Rect, clip: ClipShape) {
        if !rect.is_empty() {
            self.push(DrawCommand::Content { rect, clip });
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_color_at_edges() {
        let paint = Paint::Gradient {
            from: Color::WHITE.with_alpha(0.1),
            to: Color::WHITE,
        };
        assert_eq!(paint.color_at(0.0).a, 0.1);
        assert!((paint.color_at(1.0).a - 1.0).abs() < 1e-6);
        assert!((paint.color_at(2.0).a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_context_skips_invisible_fills() {
        let mut ctx = PaintContext::new(Size::new(10.0, 10.0));
        ctx.fill_circle(Point::new(5.0, 5.0), 0.0, Color::WHITE);
        ctx.fill_circle(Point::new(5.0, 5.0), 2.0, Color::TRANSPARENT);
        ctx.content(Rect::new(0.0, 0.0, 0.0, 4.0), ClipShape::Circle);
        assert!(ctx.commands().is_empty());

        ctx.fill_circle(Point::new(5.0, 5.0), 2.0, Color::WHITE);
        assert_eq!(ctx.into_commands().len(), 1);
    }
}
