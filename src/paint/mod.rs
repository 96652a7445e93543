//! Backend-neutral paint primitives.
//!
//! Everything in this module is plain data. Effects describe what a frame
//! should look like through [`DrawCommand`]s collected in a [`PaintContext`];
//! the host (or the optional software rasterizer) decides how to draw them.

mod commands;

pub use commands::{ClipShape, DrawCommand, Paint, PaintContext, Stroke};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with its alpha replaced (not multiplied).
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const LIME: Color = Color::from_hex(0xCDDC39);
    pub const DARK_BACKGROUND: Color = Color::from_hex(0x1C1B1F);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// How the ends of an open stroke are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

/// Color source for an animated stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brush {
    /// Flat color
    Solid(Color),
    /// One-directional gradient along the stroke: `color` with
    /// `trailing_alpha` at the trailing edge, full `color` at the leading edge
    Gradient { color: Color, trailing_alpha: f32 },
}

impl Brush {
    /// Default alpha of a gradient's trailing edge.
    pub const DEFAULT_TRAILING_ALPHA: f32 = 0.1;

    pub fn gradient(color: Color) -> Self {
        Brush::Gradient {
            color,
            trailing_alpha: Self::DEFAULT_TRAILING_ALPHA,
        }
    }

    /// Resolve into the concrete paint of a draw command.
    pub fn to_paint(&self) -> Paint {
        match *self {
            Brush::Solid(color) => Paint::Solid(color),
            Brush::Gradient {
                color,
                trailing_alpha,
            } => Paint::Gradient {
                from: color.with_alpha(trailing_alpha.clamp(0.0, 1.0)),
                to: color,
            },
        }
    }

    pub fn is_transparent(&self) -> bool {
        match self {
            Brush::Solid(color) => color.is_transparent(),
            Brush::Gradient { color, .. } => color.is_transparent(),
        }
    }
}

/// Caller-supplied style for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub brush: Brush,
    /// Stroke width in pixels
    pub width: f32,
    pub cap: StrokeCap,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            brush: Brush::Solid(color),
            width,
            cap: StrokeCap::Round,
        }
    }

    pub fn gradient(color: Color, width: f32) -> Self {
        Self {
            brush: Brush::gradient(color),
            width,
            cap: StrokeCap::Round,
        }
    }

    pub fn cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub(crate) fn stroke(&self) -> Stroke {
        Stroke {
            width: self.width,
            cap: self.cap,
        }
    }

    /// A style that would paint nothing visible.
    pub(crate) fn is_degenerate(&self) -> bool {
        !self.width.is_finite() || self.width <= 0.0
    }
}
