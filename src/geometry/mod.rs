//! Border geometry.
//!
//! [`compute_boundary`] turns a layout size, a shape kind and a stroke width
//! into a [`ShapeBoundary`]: arc parameters for circles, or a measured closed
//! path for rounded squares. Boundaries are pure functions of their inputs, so
//! hosts cache them per layout size and recompute only on resize.

mod path;

pub use path::{Path, PathCursor, PathMeasure};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point at `angle_deg` (clockwise from 3 o'clock) on a circle.
    pub fn on_circle(center: Point, radius: f32, angle_deg: f32) -> Self {
        let rad = angle_deg.to_radians();
        Self {
            x: center.x + radius * rad.cos(),
            y: center.y + radius * rad.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True for zero, negative or non-finite sizes.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    /// Rect of the given size centered on `center`.
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - amount * 2.0).max(0.0),
            height: (self.height - amount * 2.0).max(0.0),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Closed set of border shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Circle,
    /// Square-ish outline following the layout rect. A zero radius gives
    /// sharp corners.
    RoundedSquare { corner_radius: f32 },
}

impl ShapeKind {
    pub const SQUARE: ShapeKind = ShapeKind::RoundedSquare { corner_radius: 0.0 };
}

/// Geometry the stroke renderer draws along.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeBoundary {
    Arc { center: Point, radius: f32 },
    Path(PathMeasure),
}

impl ShapeBoundary {
    /// Total length of the boundary (circumference or perimeter).
    pub fn length(&self) -> f32 {
        match self {
            ShapeBoundary::Arc { radius, .. } => std::f32::consts::TAU * radius,
            ShapeBoundary::Path(measure) => measure.length(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("degenerate layout size {width}x{height}")]
    Degenerate { width: f32, height: f32 },
    #[error("invalid stroke width {0}")]
    InvalidStroke(f32),
    #[error("stroke width {stroke_width} leaves no room inside {width}x{height}")]
    Collapsed {
        width: f32,
        height: f32,
        stroke_width: f32,
    },
}

/// Number of line segments used to flatten each rounded corner.
const CORNER_SEGMENTS: usize = 8;

/// Stroke width used when the caller does not specify one.
pub fn default_stroke_width(layout_width: f32) -> f32 {
    (layout_width / 40.0).max(0.0)
}

/// Compute the boundary for a shape, or `None` when the layout is degenerate.
pub fn compute_boundary(kind: ShapeKind, size: Size, stroke_width: f32) -> Option<ShapeBoundary> {
    match try_compute_boundary(kind, size, stroke_width) {
        Ok(boundary) => Some(boundary),
        Err(err) => {
            log::debug!("Skipping boundary for {:?}: {}", kind, err);
            None
        }
    }
}

/// Like [`compute_boundary`], reporting why a layout cannot be drawn.
///
/// The stroke is kept inside the layout: circles shrink their radius by half
/// the stroke width and squares are inset by the same amount.
pub fn try_compute_boundary(
    kind: ShapeKind,
    size: Size,
    stroke_width: f32,
) -> Result<ShapeBoundary, GeometryError> {
    if size.is_empty() {
        return Err(GeometryError::Degenerate {
            width: size.width,
            height: size.height,
        });
    }
    if !stroke_width.is_finite() || stroke_width < 0.0 {
        return Err(GeometryError::InvalidStroke(stroke_width));
    }

    let collapsed = || GeometryError::Collapsed {
        width: size.width,
        height: size.height,
        stroke_width,
    };

    match kind {
        ShapeKind::Circle => {
            let radius = size.min_side() / 2.0 - stroke_width / 2.0;
            if radius <= 0.0 {
                return Err(collapsed());
            }
            Ok(ShapeBoundary::Arc {
                center: size.center(),
                radius,
            })
        }
        ShapeKind::RoundedSquare { corner_radius } => {
            let rect = Rect::from_size(size).inset(stroke_width / 2.0);
            if rect.is_empty() {
                return Err(collapsed());
            }
            let path = rounded_square_path(rect, corner_radius);
            Ok(ShapeBoundary::Path(PathMeasure::new(&path)))
        }
    }
}

/// Closed outline of `rect` starting at the middle of the right edge and
/// running down the right edge first.
fn rounded_square_path(rect: Rect, corner_radius: f32) -> Path {
    let max_radius = rect.width.min(rect.height) / 2.0;
    let r = if corner_radius.is_finite() {
        corner_radius.clamp(0.0, max_radius)
    } else {
        0.0
    };
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    let mut path = Path::new();
    path.move_to(Point::new(right, rect.center().y));
    path.line_to(Point::new(right, bottom - r));
    corner(&mut path, Point::new(right - r, bottom - r), r, 0.0);
    path.line_to(Point::new(left + r, bottom));
    corner(&mut path, Point::new(left + r, bottom - r), r, 90.0);
    path.line_to(Point::new(left, top + r));
    corner(&mut path, Point::new(left + r, top + r), r, 180.0);
    path.line_to(Point::new(right - r, top));
    corner(&mut path, Point::new(right - r, top + r), r, 270.0);
    path.close();
    path
}

fn corner(path: &mut Path, center: Point, radius: f32, start_deg: f32) {
    if radius <= 0.0 {
        return;
    }
    for i in 1..=CORNER_SEGMENTS {
        let angle = start_deg + 90.0 * i as f32 / CORNER_SEGMENTS as f32;
        path.line_to(Point::on_circle(center, radius, angle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_boundary() {
        let boundary = compute_boundary(ShapeKind::Circle, Size::new(200.0, 100.0), 10.0)
            .expect("circle should be drawable");
        assert_eq!(
            boundary,
            ShapeBoundary::Arc {
                center: Point::new(100.0, 50.0),
                radius: 45.0,
            }
        );
    }

    #[test]
    fn test_square_perimeter() {
        let boundary = compute_boundary(ShapeKind::SQUARE, Size::new(104.0, 104.0), 4.0)
            .expect("square should be drawable");
        assert_eq!(boundary.length(), 400.0);
    }

    #[test]
    fn test_square_starts_mid_right_edge() {
        let Some(ShapeBoundary::Path(measure)) =
            compute_boundary(ShapeKind::SQUARE, Size::new(100.0, 60.0), 0.0)
        else {
            panic!("expected a path boundary");
        };
        let (start, tangent) = measure.pos_tan(0.0).expect("non-empty path");
        assert_eq!(start, Point::new(100.0, 30.0));
        // Heads down the right edge first
        assert_eq!(tangent, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rounded_corners_shorten_perimeter() {
        let sharp = compute_boundary(ShapeKind::SQUARE, Size::new(100.0, 100.0), 0.0)
            .expect("drawable");
        let rounded = compute_boundary(
            ShapeKind::RoundedSquare {
                corner_radius: 20.0,
            },
            Size::new(100.0, 100.0),
            0.0,
        )
        .expect("drawable");
        let arc_ideal = 400.0 - 8.0 * 20.0 + std::f32::consts::TAU * 20.0;
        assert!(rounded.length() < sharp.length());
        assert!((rounded.length() - arc_ideal).abs() < 1.0);
    }

    #[test]
    fn test_degenerate_layouts() {
        assert_eq!(
            try_compute_boundary(ShapeKind::Circle, Size::ZERO, 1.0),
            Err(GeometryError::Degenerate {
                width: 0.0,
                height: 0.0
            })
        );
        assert!(try_compute_boundary(ShapeKind::SQUARE, Size::new(-5.0, 10.0), 1.0).is_err());
        assert!(matches!(
            try_compute_boundary(ShapeKind::Circle, Size::new(10.0, 10.0), 20.0),
            Err(GeometryError::Collapsed { .. })
        ));
        assert!(matches!(
            try_compute_boundary(ShapeKind::Circle, Size::new(10.0, 10.0), f32::NAN),
            Err(GeometryError::InvalidStroke(_))
        ));
    }

    #[test]
    fn test_boundary_is_deterministic() {
        let size = Size::new(93.7, 91.3);
        for kind in [
            ShapeKind::Circle,
            ShapeKind::RoundedSquare {
                corner_radius: 12.5,
            },
        ] {
            let a = compute_boundary(kind, size, 2.3);
            let b = compute_boundary(kind, size, 2.3);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_default_stroke_width_scales() {
        assert_eq!(default_stroke_width(400.0), 10.0);
        assert_eq!(default_stroke_width(92.0), 2.3);
    }
}
