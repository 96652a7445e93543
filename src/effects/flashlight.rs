//! Radial spotlight over the content slot, steered by pointer drags.

use super::Component;
use crate::geometry::{Point, Rect, Size};
use crate::jobs::Invalidator;
use crate::paint::{ClipShape, Color, DrawCommand, PaintContext};

#[derive(Clone, Debug, PartialEq)]
pub struct FlashlightConfig {
    /// Radius of the gradient, from fully clear to fully dark
    pub radius: f32,
    /// Color at the pointer
    pub inner: Color,
    /// Color from `radius` outwards
    pub outer: Color,
}

impl Default for FlashlightConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            inner: Color::TRANSPARENT,
            outer: Color::BLACK,
        }
    }
}

impl FlashlightConfig {
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn outer(mut self, color: Color) -> Self {
        self.outer = color;
        self
    }
}

/// Content darkened everywhere except around the pointer.
///
/// Not animated: the only change source is the drag input.
pub struct Flashlight {
    config: FlashlightConfig,
    size: Size,
    pointer: Point,
    target: Option<Invalidator>,
}

impl Flashlight {
    pub fn new(config: FlashlightConfig) -> Self {
        Self {
            config,
            size: Size::ZERO,
            pointer: Point::ZERO,
            target: None,
        }
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    fn invalidate(&self) {
        if let Some(target) = &self.target {
            target.invalidate();
        }
    }
}

impl Component for Flashlight {
    fn name(&self) -> &'static str {
        "flashlight"
    }

    fn bind(&mut self, invalidator: Invalidator) {
        self.target = Some(invalidator);
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.pointer = size.center();
        self.invalidate();
    }

    fn tick(&mut self, _dt_ms: f32) {}

    fn drag(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
            return;
        }
        self.pointer = Point::new(self.pointer.x + dx, self.pointer.y + dy);
        log::trace!("Flashlight pointer at ({}, {})", self.pointer.x, self.pointer.y);
        self.invalidate();
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.size.is_empty() {
            return;
        }
        let rect = Rect::from_size(self.size);
        ctx.content(rect, ClipShape::None);
        if self.config.radius > 0.0 {
            ctx.push(DrawCommand::RadialMask {
                rect,
                center: self.pointer,
                radius: self.config.radius,
                inner: self.config.inner,
                outer: self.config.outer,
            });
        }
    }

    fn is_animating(&self) -> bool {
        false
    }

    fn unmount(&mut self) {
        self.target = None;
    }
}
