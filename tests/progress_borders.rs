use halo::animation::{AnimationSpec, ProgressDriver, RepeatMode};
use halo::geometry::{compute_boundary, ShapeBoundary, ShapeKind, Size};
use halo::paint::{Color, DrawCommand, StrokeStyle};
use halo::prelude::*;
use halo::render::{render, render_shape, render_track};

fn arc(command: &DrawCommand) -> (f32, f32) {
    match command {
        DrawCommand::Arc {
            start_angle,
            sweep_angle,
            ..
        } => (*start_angle, *sweep_angle),
        other => panic!("expected arc, got {:?}", other),
    }
}

#[test]
fn test_half_progress_spans_five_to_one_eighty_five() {
    let style = StrokeStyle::solid(Color::LIME, 4.0);
    let boundary =
        compute_boundary(ShapeKind::Circle, Size::new(120.0, 120.0), 4.0).expect("boundary");
    let commands = render(&boundary, 0.5, &style, 5.0);
    let (start, sweep) = arc(&commands[0]);
    assert_eq!(start, 5.0);
    assert_eq!(start + sweep, 185.0);
}

#[test]
fn test_full_progress_equals_track() {
    let style = StrokeStyle::solid(Color::LIME, 4.0);
    let boundary =
        compute_boundary(ShapeKind::Circle, Size::new(120.0, 120.0), 4.0).expect("boundary");
    let animated = render(&boundary, 1.0, &style, 5.0);
    let track = render_track(&boundary, Color::WHITE, &style, 5.0).expect("track");
    assert_eq!(arc(&animated[0]), arc(&track));
}

#[test]
fn test_quarter_of_square_perimeter() {
    let style = StrokeStyle::solid(Color::LIME, 4.0);
    let boundary =
        compute_boundary(ShapeKind::SQUARE, Size::new(104.0, 104.0), 4.0).expect("boundary");
    assert!((boundary.length() - 400.0).abs() < 1e-3);

    let commands = render(&boundary, 0.25, &style, 0.0);
    let DrawCommand::Path { path, .. } = &commands[0] else {
        panic!("expected path");
    };
    assert!((path.length() - 100.0).abs() < 1e-3);

    let ShapeBoundary::Path(measure) = &boundary else {
        panic!("expected measured path");
    };
    let (origin, _) = measure.pos_tan(0.0).expect("start point");
    assert_eq!(path.points()[0], origin);
}

#[test]
fn test_cool_border_fill_clear_restart() {
    let mut border = CoolCircleBorder::new(BorderConfig::cool());
    for _ in 0..28 {
        border.tick(100.0);
    }
    assert_eq!(border.phase(), CoolPhase::Clearing);
    assert_eq!(border.sweep_angle(), 360.0);
    assert_eq!(border.start_angle(), SAFE_START_ANGLE);

    for _ in 0..12 {
        border.tick(100.0);
    }
    assert_eq!(border.phase(), CoolPhase::Filling);
    assert_eq!(border.sweep_angle(), 0.0);
    assert_eq!(border.start_angle(), SAFE_START_ANGLE);
}

#[test]
fn test_zero_size_layout_renders_nothing() {
    let style = StrokeStyle::gradient(Color::LIME, 4.0);
    assert!(render_shape(ShapeKind::Circle, Size::ZERO, 0.7, &style, 5.0).is_empty());

    let mut host = Host::new();
    let id = host.mount(CircleBorder::new(CircleAnimation::Sweep, BorderConfig::circle()));
    host.resize(id, Size::ZERO);
    host.tick(1000.0);
    let frame = host.paint();
    assert_eq!(frame.layer(id).map(|l| l.commands.len()), Some(0));
}

#[test]
fn test_restart_runs_are_periodic() {
    let spec = AnimationSpec::new(1000.0, TimingFunction::FAST_OUT_SLOW_IN)
        .values(0.0, 360.0)
        .repeat(RepeatMode::Restart);
    let mut driver = ProgressDriver::start(spec);
    let values: Vec<f32> = driver.frames(std::iter::repeat(125.0).take(40)).collect();
    for i in 8..values.len() {
        assert_eq!(values[i], values[i - 8]);
    }
}

#[test]
fn test_boundary_is_deterministic() {
    let kind = ShapeKind::RoundedSquare {
        corner_radius: 12.0,
    };
    let a = compute_boundary(kind, Size::new(90.0, 60.0), 3.0);
    let b = compute_boundary(kind, Size::new(90.0, 60.0), 3.0);
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[test]
fn test_every_effect_unmounts_cleanly() {
    let mut host = Host::new();
    let ids = vec![
        host.mount(CircleBorder::new(CircleAnimation::RotationGradient, BorderConfig::circle())),
        host.mount(CoolCircleBorder::new(BorderConfig::cool())),
        host.mount(SquareBorder::new(SquareAnimation::BorderGradient, BorderConfig::square())),
        host.mount(Waves::new(WavesConfig::default())),
        host.mount(Heart::new(HeartConfig::default())),
        host.mount(Flashlight::new(FlashlightConfig::default())),
    ];
    for &id in &ids {
        host.resize(id, Size::new(200.0, 200.0));
    }
    for _ in 0..30 {
        host.tick(16.0);
    }
    let frame = host.paint();
    assert_eq!(frame.layers.len(), ids.len());
    assert!(frame.layers.iter().all(|l| !l.commands.is_empty()));
    assert!(host.is_animating());

    for id in ids {
        assert!(host.unmount(id));
    }
    host.tick(16.0);
    assert!(!host.has_pending_jobs());
    assert!(!host.is_animating());
    assert!(host.is_empty());
}
