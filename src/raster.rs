//! Software rasterizer for draw command lists.
//!
//! Used for previews and the visual regression suite; hosts with their own
//! canvas consume [`DrawCommand`]s directly.

use resvg::tiny_skia::{
    self, FillRule, GradientStop, LineCap, Pixmap, PathBuilder, RadialGradient, Shader,
    SpreadMode, Transform,
};

use crate::geometry::{Point, Rect, Size};
use crate::host::Frame;
use crate::paint::{ClipShape, Color, DrawCommand, Paint, Stroke, StrokeCap};

/// Degrees covered by one flattened arc step.
const ARC_STEP_DEG: f32 = 3.0;
/// Longest piece of a gradient stroke drawn in one color.
const GRADIENT_STEP_PX: f32 = 2.0;
const CAP_STEPS: usize = 8;

/// Fill used for content slots, standing in for host content.
pub const CONTENT_PLACEHOLDER: Color = Color::rgb(0.45, 0.45, 0.48);

/// Rasterize one command list onto a fresh pixmap cleared to `background`.
///
/// Returns `None` for empty or oversized layouts.
pub fn rasterize(commands: &[DrawCommand], size: Size, background: Color) -> Option<Pixmap> {
    if size.is_empty() {
        return None;
    }
    let mut pixmap = Pixmap::new(size.width.ceil() as u32, size.height.ceil() as u32)?;
    pixmap.fill(to_skia(background));
    draw(&mut pixmap, commands);
    Some(pixmap)
}

/// Rasterize every layer of a frame on top of each other.
pub fn rasterize_frame(frame: &Frame) -> Option<Pixmap> {
    let size = frame.layers.iter().fold(Size::ZERO, |acc, layer| {
        Size::new(acc.width.max(layer.size.width), acc.height.max(layer.size.height))
    });
    let commands: Vec<DrawCommand> = frame
        .layers
        .iter()
        .flat_map(|layer| layer.commands.iter().cloned())
        .collect();
    rasterize(&commands, size, frame.background)
}

/// Draw commands in order onto an existing pixmap.
pub fn draw(pixmap: &mut Pixmap, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
                stroke,
                paint,
            } => {
                let points = flatten_arc(*center, *radius, *start_angle, *sweep_angle);
                stroke_polyline(pixmap, &points, false, stroke, paint);
            }
            DrawCommand::Path {
                path,
                stroke,
                paint,
            } => {
                stroke_polyline(pixmap, path.points(), path.is_closed(), stroke, paint);
            }
            DrawCommand::FillPath { path, color } => {
                if let Some(p) = polyline(path.points(), true) {
                    pixmap.fill_path(
                        &p,
                        &solid(*color),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                if let Some(p) = PathBuilder::from_circle(center.x, center.y, *radius) {
                    pixmap.fill_path(
                        &p,
                        &solid(*color),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::Oval { rect, color } => fill_oval(pixmap, *rect, *color),
            DrawCommand::RadialMask {
                rect,
                center,
                radius,
                inner,
                outer,
            } => {
                let stops = vec![
                    GradientStop::new(0.0, to_skia(*inner)),
                    GradientStop::new(1.0, to_skia(*outer)),
                ];
                let origin = tiny_skia::Point::from_xy(center.x, center.y);
                let Some(shader) = RadialGradient::new(
                    origin,
                    origin,
                    *radius,
                    stops,
                    SpreadMode::Pad,
                    Transform::identity(),
                ) else {
                    continue;
                };
                let mut paint = tiny_skia::Paint::default();
                paint.shader = shader;
                if let Some(r) = to_skia_rect(*rect) {
                    pixmap.fill_rect(r, &paint, Transform::identity(), None);
                }
            }
            DrawCommand::Content { rect, clip } => match clip {
                ClipShape::Circle => fill_oval(pixmap, *rect, CONTENT_PLACEHOLDER),
                ClipShape::Rect | ClipShape::None => {
                    if let Some(r) = to_skia_rect(*rect) {
                        pixmap.fill_rect(
                            r,
                            &solid(CONTENT_PLACEHOLDER),
                            Transform::identity(),
                            None,
                        );
                    }
                }
            },
        }
    }
}

fn flatten_arc(center: Point, radius: f32, start_angle: f32, sweep_angle: f32) -> Vec<Point> {
    let steps = (sweep_angle.abs() / ARC_STEP_DEG).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let angle = start_angle + sweep_angle * i as f32 / steps as f32;
            Point::on_circle(center, radius, angle)
        })
        .collect()
}

fn stroke_polyline(
    pixmap: &mut Pixmap,
    points: &[Point],
    closed: bool,
    stroke: &Stroke,
    paint: &Paint,
) {
    let skia_stroke = tiny_skia::Stroke {
        width: stroke.width,
        line_cap: match stroke.cap {
            StrokeCap::Butt => LineCap::Butt,
            StrokeCap::Round => LineCap::Round,
        },
        ..Default::default()
    };

    match paint {
        Paint::Solid(color) => {
            if let Some(p) = polyline(points, closed) {
                pixmap.stroke_path(&p, &solid(*color), &skia_stroke, Transform::identity(), None);
            }
        }
        Paint::Gradient { .. } => stroke_gradient(pixmap, points, closed, stroke, paint),
    }
}

/// Strokes short butt-capped pieces colored by their distance along the
/// polyline, then adds round caps at the open ends.
fn stroke_gradient(
    pixmap: &mut Pixmap,
    points: &[Point],
    closed: bool,
    stroke: &Stroke,
    paint: &Paint,
) {
    let mut vertices = points.to_vec();
    if closed {
        if let Some(&first) = points.first() {
            vertices.push(first);
        }
    }
    let total: f32 = vertices.windows(2).map(|w| w[0].distance(&w[1])).sum();
    if total <= 0.0 {
        return;
    }

    let piece_stroke = tiny_skia::Stroke {
        width: stroke.width,
        line_cap: LineCap::Butt,
        ..Default::default()
    };
    let mut travelled = 0.0;
    for pair in vertices.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = a.distance(&b);
        if length <= 0.0 {
            continue;
        }
        let steps = (length / GRADIENT_STEP_PX).ceil().max(1.0) as usize;
        for j in 0..steps {
            let t0 = j as f32 / steps as f32;
            let t1 = (j + 1) as f32 / steps as f32;
            let mid = travelled + length * (t0 + t1) / 2.0;
            let piece = [lerp_point(a, b, t0), lerp_point(a, b, t1)];
            if let Some(p) = polyline(&piece, false) {
                pixmap.stroke_path(
                    &p,
                    &solid(paint.color_at(mid / total)),
                    &piece_stroke,
                    Transform::identity(),
                    None,
                );
            }
        }
        travelled += length;
    }

    if closed || stroke.cap != StrokeCap::Round {
        return;
    }
    let radius = stroke.width / 2.0;
    let ends = [
        (vertices.iter().find(|p| **p != vertices[0]), vertices.first(), 0.0),
        (vertices.iter().rev().find(|p| Some(*p) != vertices.last()), vertices.last(), 1.0),
    ];
    for (inner, end, t) in ends {
        let (Some(inner), Some(end)) = (inner, end) else {
            continue;
        };
        if let Some(p) = round_cap(*inner, *end, radius) {
            pixmap.fill_path(
                &p,
                &solid(paint.color_at(t)),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

/// Half disk past `end`, facing away from `inner`.
fn round_cap(inner: Point, end: Point, radius: f32) -> Option<tiny_skia::Path> {
    let length = inner.distance(&end);
    if length <= 0.0 || radius <= 0.0 {
        return None;
    }
    let (dx, dy) = ((end.x - inner.x) / length, (end.y - inner.y) / length);
    let (nx, ny) = (-dy, dx);
    let points: Vec<Point> = (0..=CAP_STEPS)
        .map(|i| {
            let theta = std::f32::consts::PI * i as f32 / CAP_STEPS as f32;
            let (sin, cos) = theta.sin_cos();
            Point::new(
                end.x + radius * (cos * nx + sin * dx),
                end.y + radius * (cos * ny + sin * dy),
            )
        })
        .collect();
    polyline(&points, true)
}

fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

fn polyline(points: &[Point], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for p in rest {
        builder.line_to(p.x, p.y);
    }
    if closed {
        builder.close();
    }
    builder.finish()
}

fn fill_oval(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let Some(r) = to_skia_rect(rect) else {
        return;
    };
    if let Some(p) = PathBuilder::from_oval(r) {
        pixmap.fill_path(
            &p,
            &solid(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

fn solid(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.shader = Shader::SolidColor(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        color.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}
