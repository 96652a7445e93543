//! Concentric waves radiating from a round button.

use super::Component;
use crate::animation::{AnimationSpec, ProgressDriver, ProgressValue, RepeatMode, TimingFunction};
use crate::geometry::{Point, Rect, Size};
use crate::jobs::Invalidator;
use crate::paint::{ClipShape, Color, PaintContext};

/// Growth of a wave at the end of its run, as a multiple of the base radius.
const WAVE_GROWTH: f32 = 4.0;

/// Icon slot size relative to the button diameter.
const ICON_FRACTION: f32 = 32.0 / 50.0;

#[derive(Clone, Debug, PartialEq)]
pub struct WavesConfig {
    pub color: Color,
    /// Radius of the button and of each wave at rest; `None` derives it
    /// from the layout
    pub base_radius: Option<f32>,
    pub wave_count: usize,
    /// Duration of one wave expansion in milliseconds
    pub duration_ms: f32,
    /// Delay between the start of consecutive waves
    pub stagger_ms: f32,
}

impl Default for WavesConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            base_radius: None,
            wave_count: 4,
            duration_ms: 4000.0,
            stagger_ms: 1000.0,
        }
    }
}

impl WavesConfig {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn base_radius(mut self, radius: f32) -> Self {
        self.base_radius = Some(radius);
        self
    }

    pub fn wave_count(mut self, count: usize) -> Self {
        self.wave_count = count;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn stagger(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }
}

struct Wave {
    driver: ProgressDriver,
    value: ProgressValue,
}

/// Staggered ripple circles behind a button with an icon slot.
pub struct Waves {
    config: WavesConfig,
    waves: Vec<Wave>,
    center: Point,
    base_radius: f32,
}

impl Waves {
    pub fn new(config: WavesConfig) -> Self {
        let waves = (0..config.wave_count)
            .map(|index| Wave {
                driver: ProgressDriver::start(
                    AnimationSpec::new(config.duration_ms, TimingFunction::FAST_OUT_LINEAR_IN)
                        .values(0.0, 1.0)
                        .repeat(RepeatMode::Restart)
                        .delay(index as f32 * config.stagger_ms),
                ),
                value: ProgressValue::new(0.0, 0.0, 1.0),
            })
            .collect();
        Self {
            config,
            waves,
            center: Point::ZERO,
            base_radius: 0.0,
        }
    }

    /// Current progress of every wave, in start order.
    pub fn wave_values(&self) -> Vec<f32> {
        self.waves.iter().map(|w| w.value.get()).collect()
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }
}

impl Component for Waves {
    fn name(&self) -> &'static str {
        "waves"
    }

    fn bind(&mut self, invalidator: Invalidator) {
        for wave in &mut self.waves {
            wave.value.bind(invalidator.clone());
        }
    }

    fn resize(&mut self, size: Size) {
        if size.is_empty() {
            self.base_radius = 0.0;
            return;
        }
        self.center = size.center();
        self.base_radius = match self.config.base_radius {
            Some(radius) if radius.is_finite() && radius > 0.0 => radius,
            // The largest wave still fits the layout
            _ => size.min_side() / (2.0 * (1.0 + WAVE_GROWTH)),
        };
        log::debug!("Waves resized to {}x{}", size.width, size.height);
    }

    fn tick(&mut self, dt_ms: f32) {
        for wave in &mut self.waves {
            if let Some(value) = wave.driver.tick(dt_ms) {
                wave.value.set(value);
            }
        }
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.base_radius <= 0.0 {
            return;
        }
        for wave in &self.waves {
            // Waves still waiting for their first run stay hidden
            if wave.driver.is_delayed() {
                continue;
            }
            let v = wave.value.get();
            ctx.fill_circle(
                self.center,
                self.base_radius * (1.0 + WAVE_GROWTH * v),
                self.config.color.with_alpha(self.config.color.a * (1.0 - v)),
            );
        }

        ctx.fill_circle(self.center, self.base_radius, self.config.color);
        let icon = 2.0 * self.base_radius * ICON_FRACTION;
        ctx.content(Rect::centered(self.center, icon, icon), ClipShape::Circle);
    }

    fn is_animating(&self) -> bool {
        self.waves.iter().any(|w| w.driver.is_active())
    }

    fn unmount(&mut self) {
        for wave in &mut self.waves {
            wave.driver.stop();
            wave.value.unbind();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::DrawCommand;

    fn circles(waves: &Waves) -> Vec<(f32, f32)> {
        let mut ctx = PaintContext::new(Size::new(200.0, 200.0));
        waves.paint(&mut ctx);
        ctx.into_commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { radius, color, .. } => Some((radius, color.a)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_waves_start_staggered() {
        let mut waves = Waves::new(WavesConfig::default().base_radius(20.0));
        waves.resize(Size::new(200.0, 200.0));

        // Only the first wave runs, plus the button itself
        waves.tick(10.0);
        assert_eq!(circles(&waves).len(), 2);

        waves.tick(1000.0);
        assert_eq!(circles(&waves).len(), 3);

        waves.tick(2000.0);
        assert_eq!(circles(&waves).len(), 5);
        let values = waves.wave_values();
        assert!(values[0] > values[1] && values[1] > values[2] && values[2] > values[3]);
    }

    #[test]
    fn test_wave_grows_and_fades() {
        let mut waves = Waves::new(WavesConfig::default().base_radius(10.0).wave_count(1));
        waves.resize(Size::new(200.0, 200.0));
        waves.tick(0.0);
        let start = circles(&waves);
        assert_eq!(start[0], (10.0, 1.0));

        waves.tick(3000.0);
        let later = circles(&waves);
        assert!(later[0].0 > 10.0 && later[0].0 <= 50.0);
        assert!(later[0].1 < 1.0);
        // The button never animates
        assert_eq!(later[1], (10.0, 1.0));
    }

    #[test]
    fn test_waves_repeat_forever() {
        let mut waves = Waves::new(WavesConfig::default());
        for _ in 0..200 {
            waves.tick(100.0);
        }
        assert!(waves.is_animating());
        assert!(waves.wave_values().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_default_radius_fits_layout() {
        let mut waves = Waves::new(WavesConfig::default());
        waves.resize(Size::new(200.0, 100.0));
        assert_eq!(waves.base_radius(), 10.0);
    }

    #[test]
    fn test_button_hosts_icon_slot() {
        let mut waves = Waves::new(WavesConfig::default().base_radius(25.0));
        waves.resize(Size::new(200.0, 200.0));
        let mut ctx = PaintContext::new(Size::new(200.0, 200.0));
        waves.paint(&mut ctx);
        assert!(ctx.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Content {
                clip: ClipShape::Circle,
                ..
            }
        )));
    }
}
