//! Interpolated stroke renderer.
//!
//! Pure functions from a [`ShapeBoundary`], a progress fraction and a
//! [`StrokeStyle`] to draw commands. Nothing here keeps state between calls,
//! so the same inputs always produce the same commands.

use crate::geometry::{compute_boundary, ShapeBoundary, ShapeKind, Size};
use crate::paint::{Color, DrawCommand, Paint, StrokeStyle};

/// Full turn in degrees.
pub const FULL_SWEEP: f32 = 360.0;

/// Draw commands for the animated part of a border.
///
/// Arcs start at `start_angle` and sweep `progress * 360` degrees; paths are
/// traced from offset 0 over `progress * length`. Progress is clamped to
/// `[0, 1]`; zero progress or a degenerate style emits nothing.
pub fn render(
    boundary: &ShapeBoundary,
    progress: f32,
    style: &StrokeStyle,
    start_angle: f32,
) -> Vec<DrawCommand> {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if progress <= 0.0 || style.is_degenerate() {
        return Vec::new();
    }

    let paint = style.brush.to_paint();
    match boundary {
        ShapeBoundary::Arc { center, radius } => vec![DrawCommand::Arc {
            center: *center,
            radius: *radius,
            start_angle,
            sweep_angle: progress * FULL_SWEEP,
            stroke: style.stroke(),
            paint,
        }],
        ShapeBoundary::Path(measure) => {
            let path = measure.segment(0.0, progress * measure.length());
            if path.is_empty() {
                return Vec::new();
            }
            vec![DrawCommand::Path {
                path,
                stroke: style.stroke(),
                paint,
            }]
        }
    }
}

/// Draw an arc by explicit sweep angle, as the composite animations do.
///
/// Negative or zero sweeps emit nothing; sweeps beyond a full turn are
/// clamped to one.
pub fn render_sweep(
    boundary: &ShapeBoundary,
    sweep_angle: f32,
    style: &StrokeStyle,
    start_angle: f32,
) -> Vec<DrawCommand> {
    render(boundary, sweep_angle / FULL_SWEEP, style, start_angle)
}

/// The static track beneath an animated stroke: always the full boundary.
///
/// Returns `None` for fully transparent tracks.
pub fn render_track(
    boundary: &ShapeBoundary,
    color: Color,
    style: &StrokeStyle,
    start_angle: f32,
) -> Option<DrawCommand> {
    if color.is_transparent() || style.is_degenerate() {
        return None;
    }
    let stroke = style.stroke();
    let paint = Paint::Solid(color);
    match boundary {
        ShapeBoundary::Arc { center, radius } => Some(DrawCommand::Arc {
            center: *center,
            radius: *radius,
            start_angle,
            sweep_angle: FULL_SWEEP,
            stroke,
            paint,
        }),
        ShapeBoundary::Path(measure) => {
            let path = measure.segment(0.0, measure.length());
            (!path.is_empty()).then_some(DrawCommand::Path {
                path,
                stroke,
                paint,
            })
        }
    }
}

/// Track pass followed by the animated stroke.
pub fn render_with_track(
    boundary: &ShapeBoundary,
    progress: f32,
    style: &StrokeStyle,
    track_color: Color,
    start_angle: f32,
) -> Vec<DrawCommand> {
    let mut commands: Vec<DrawCommand> = render_track(boundary, track_color, style, start_angle)
        .into_iter()
        .collect();
    commands.extend(render(boundary, progress, style, start_angle));
    commands
}

/// Compute the boundary for `size` and render it in one go.
///
/// A degenerate layout emits no commands instead of failing the frame.
pub fn render_shape(
    kind: ShapeKind,
    size: Size,
    progress: f32,
    style: &StrokeStyle,
    start_angle: f32,
) -> Vec<DrawCommand> {
    match compute_boundary(kind, size, style.width) {
        Some(boundary) => render(&boundary, progress, style, start_angle),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::paint::{Brush, StrokeCap};

    fn circle() -> ShapeBoundary {
        ShapeBoundary::Arc {
            center: Point::new(50.0, 50.0),
            radius: 48.0,
        }
    }

    #[test]
    fn test_half_progress_sweeps_half_circle() {
        let style = StrokeStyle::solid(Color::LIME, 4.0);
        let commands = render(&circle(), 0.5, &style, 5.0);
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            DrawCommand::Arc {
                start_angle,
                sweep_angle,
                stroke,
                ..
            } => {
                assert_eq!(*start_angle, 5.0);
                assert_eq!(*sweep_angle, 180.0);
                assert_eq!(stroke.cap, StrokeCap::Round);
            }
            other => panic!("expected arc, got {:?}", other),
        }
    }

    #[test]
    fn test_full_progress_matches_track_geometry() {
        let style = StrokeStyle::solid(Color::LIME, 4.0);
        let animated = render(&circle(), 1.0, &style, 5.0);
        let track = render_track(&circle(), Color::WHITE, &style, 5.0).expect("visible track");
        match (&animated[0], &track) {
            (
                DrawCommand::Arc {
                    start_angle: a_start,
                    sweep_angle: a_sweep,
                    radius: a_radius,
                    ..
                },
                DrawCommand::Arc {
                    start_angle: t_start,
                    sweep_angle: t_sweep,
                    radius: t_radius,
                    ..
                },
            ) => {
                assert_eq!(a_start, t_start);
                assert_eq!(a_sweep, t_sweep);
                assert_eq!(a_radius, t_radius);
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn test_zero_progress_and_transparent_track_emit_nothing() {
        let style = StrokeStyle::solid(Color::LIME, 4.0);
        assert!(render(&circle(), 0.0, &style, 0.0).is_empty());
        assert!(render(&circle(), f32::NAN, &style, 0.0).is_empty());
        assert!(render_track(&circle(), Color::TRANSPARENT, &style, 0.0).is_none());
        let commands = render_with_track(&circle(), 0.3, &style, Color::TRANSPARENT, 0.0);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_track_comes_first() {
        let style = StrokeStyle::gradient(Color::LIME, 4.0);
        let commands = render_with_track(&circle(), 0.3, &style, Color::WHITE, 0.0);
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            &commands[0],
            DrawCommand::Arc {
                paint: Paint::Solid(_),
                sweep_angle,
                ..
            } if *sweep_angle == 360.0
        ));
        assert!(matches!(
            &commands[1],
            DrawCommand::Arc {
                paint: Paint::Gradient { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_gradient_runs_from_trailing_to_leading_edge() {
        let style = StrokeStyle {
            brush: Brush::Gradient {
                color: Color::WHITE,
                trailing_alpha: 0.25,
            },
            width: 3.0,
            cap: StrokeCap::Butt,
        };
        let commands = render(&circle(), 0.75, &style, 0.0);
        let DrawCommand::Arc { paint, .. } = &commands[0] else {
            panic!("expected arc");
        };
        assert_eq!(paint.color_at(0.0).a, 0.25);
        assert_eq!(paint.color_at(1.0), Color::WHITE);
    }

    #[test]
    fn test_sweep_helper() {
        let style = StrokeStyle::solid(Color::LIME, 4.0);
        let commands = render_sweep(&circle(), 90.0, &style, 10.0);
        let DrawCommand::Arc { sweep_angle, .. } = &commands[0] else {
            panic!("expected arc");
        };
        assert_eq!(*sweep_angle, 90.0);
        assert!(render_sweep(&circle(), -10.0, &style, 10.0).is_empty());
    }

    #[test]
    fn test_degenerate_layout_renders_nothing() {
        let style = StrokeStyle::solid(Color::LIME, 4.0);
        assert!(render_shape(ShapeKind::Circle, Size::ZERO, 0.5, &style, 5.0).is_empty());
        assert!(render_shape(ShapeKind::SQUARE, Size::ZERO, 0.5, &style, 5.0).is_empty());
    }
}
