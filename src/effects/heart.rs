//! Bouncing heart over a breathing shadow.

use std::f32::consts::TAU;

use super::Component;
use crate::animation::{AnimationSpec, ProgressDriver, ProgressValue, RepeatMode};
use crate::geometry::{Path, Point, Rect, Size};
use crate::jobs::Invalidator;
use crate::paint::{Color, DrawCommand, PaintContext};

/// Layout width the proportions below are expressed in.
const REFERENCE_WIDTH: f32 = 200.0;
const HEART_SIZE: f32 = 100.0;
const SHADOW_GAP: f32 = 30.0;
const SHADOW_WIDTH: f32 = 40.0;
const SHADOW_HEIGHT: f32 = 10.0;
const HEART_POINTS: usize = 48;
/// Share of the heart slot the drawn outline fills.
const HEART_FILL: f32 = 0.84;

#[derive(Clone, Debug, PartialEq)]
pub struct HeartConfig {
    pub color: Color,
    /// Duration of one bounce in milliseconds
    pub duration_ms: f32,
    /// Vertical travel of the heart, in reference units
    pub travel: f32,
}

impl Default for HeartConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            duration_ms: 1000.0,
            travel: 30.0,
        }
    }
}

impl HeartConfig {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn travel(mut self, travel: f32) -> Self {
        self.travel = travel;
        self
    }
}

pub struct Heart {
    config: HeartConfig,
    driver: ProgressDriver,
    bounce: ProgressValue,
    size: Size,
}

impl Heart {
    pub fn new(config: HeartConfig) -> Self {
        let driver = ProgressDriver::start(
            AnimationSpec::linear(config.duration_ms)
                .values(0.0, 1.0)
                .repeat(RepeatMode::Reverse),
        );
        Self {
            config,
            driver,
            bounce: ProgressValue::new(0.0, 0.0, 1.0),
            size: Size::ZERO,
        }
    }

    /// Bounce progress: 0 at the top, 1 resting on the shadow.
    pub fn bounce(&self) -> f32 {
        self.bounce.get()
    }

    fn unit(&self) -> f32 {
        self.size.width / REFERENCE_WIDTH
    }

    /// Top of the heart slot before translation.
    fn column_top(&self) -> f32 {
        let column = (HEART_SIZE + SHADOW_GAP + SHADOW_HEIGHT) * self.unit();
        (self.size.height - column) / 2.0
    }

    pub fn heart_rect(&self) -> Rect {
        let unit = self.unit();
        let side = HEART_SIZE * unit;
        Rect::new(
            (self.size.width - side) / 2.0,
            self.column_top() + self.bounce.get() * self.config.travel * unit,
            side,
            side,
        )
    }

    pub fn shadow_rect(&self) -> Rect {
        let unit = self.unit();
        let v = self.bounce.get();
        let top = self.column_top() + (HEART_SIZE + SHADOW_GAP) * unit;
        let center = Point::new(self.size.width / 2.0, top + SHADOW_HEIGHT * unit / 2.0);
        Rect::centered(
            center,
            SHADOW_WIDTH * unit * (0.5 + v / 2.0),
            SHADOW_HEIGHT * unit,
        )
    }

    pub fn shadow_alpha(&self) -> f32 {
        (0.3 + self.bounce.get() / 2.0).min(1.0)
    }
}

/// Classic parametric heart fitted into `rect`.
fn heart_path(rect: Rect) -> Path {
    let raw: Vec<(f32, f32)> = (0..HEART_POINTS)
        .map(|i| {
            let t = TAU * i as f32 / HEART_POINTS as f32;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            // Screen y grows downwards
            (x, -y)
        })
        .collect();

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f32::MAX, f32::MIN, f32::MAX, f32::MIN);
    for &(x, y) in &raw {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let scale = (rect.width / (max_x - min_x)).min(rect.height / (max_y - min_y)) * HEART_FILL;
    let center = rect.center();
    let (mid_x, mid_y) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    let mut path = Path::new();
    for (i, &(x, y)) in raw.iter().enumerate() {
        let p = Point::new(center.x + (x - mid_x) * scale, center.y + (y - mid_y) * scale);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close();
    path
}

impl Component for Heart {
    fn name(&self) -> &'static str {
        "heart"
    }

    fn bind(&mut self, invalidator: Invalidator) {
        self.bounce.bind(invalidator);
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn tick(&mut self, dt_ms: f32) {
        if let Some(value) = self.driver.tick(dt_ms) {
            self.bounce.set(value);
        }
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.size.is_empty() {
            return;
        }
        let heart = self.heart_rect();
        if !heart.is_empty() && !self.config.color.is_transparent() {
            ctx.push(DrawCommand::FillPath {
                path: heart_path(heart),
                color: self.config.color,
            });
        }
        ctx.fill_oval(
            self.shadow_rect(),
            self.config.color.with_alpha(self.config.color.a * self.shadow_alpha()),
        );
    }

    fn is_animating(&self) -> bool {
        self.driver.is_active()
    }

    fn unmount(&mut self) {
        self.driver.stop();
        self.bounce.unbind();
    }
}
