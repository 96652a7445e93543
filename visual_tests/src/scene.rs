use halo::prelude::*;
use halo::raster;
use image::{Rgba, RgbaImage};

use crate::{Result, VisualTestError};

/// A component mounted at a fixed size and advanced by a fixed list of ticks.
pub struct Scene {
    pub name: &'static str,
    pub size: Size,
    /// Total animation time before the frame is captured
    pub elapsed_ms: f32,
    mount: fn(&mut Host) -> ComponentId,
}

/// Frame delta used to reach `elapsed_ms`.
const FRAME_MS: f32 = 16.0;

impl Scene {
    /// Every scene covered by the visual suite.
    pub fn all() -> Vec<Scene> {
        vec![
            Scene {
                name: "circle_sweep",
                size: Size::new(160.0, 160.0),
                elapsed_ms: 2500.0,
                mount: |host| {
                    host.mount(CircleBorder::new(
                        CircleAnimation::Sweep,
                        BorderConfig::circle().track_color(Color::WHITE.with_alpha(0.2)),
                    ))
                },
            },
            Scene {
                name: "cool_clearing",
                size: Size::new(160.0, 160.0),
                elapsed_ms: 3400.0,
                mount: |host| host.mount(CoolCircleBorder::new(BorderConfig::cool().gradient(true))),
            },
            Scene {
                name: "square_gradient",
                size: Size::new(160.0, 160.0),
                elapsed_ms: 1800.0,
                mount: |host| {
                    host.mount(
                        SquareBorder::new(SquareAnimation::BorderGradient, BorderConfig::square())
                            .corner_radius(16.0),
                    )
                },
            },
            Scene {
                name: "waves",
                size: Size::new(240.0, 240.0),
                elapsed_ms: 3600.0,
                mount: |host| host.mount(Waves::new(WavesConfig::default())),
            },
            Scene {
                name: "heart",
                size: Size::new(200.0, 200.0),
                elapsed_ms: 400.0,
                mount: |host| host.mount(Heart::new(HeartConfig::default())),
            },
            Scene {
                name: "flashlight",
                size: Size::new(240.0, 160.0),
                elapsed_ms: 0.0,
                mount: |host| {
                    let id = host.mount(Flashlight::new(FlashlightConfig::default().radius(60.0)));
                    host.resize(id, Size::new(240.0, 160.0));
                    host.drag(id, -40.0, 20.0);
                    id
                },
            },
        ]
    }

    pub fn find(name: &str) -> Result<Scene> {
        Scene::all()
            .into_iter()
            .find(|scene| scene.name == name)
            .ok_or_else(|| VisualTestError::UnknownScene(name.to_string()))
    }

    /// Run the scene headlessly and rasterize its final frame.
    pub fn render(&self) -> Result<RgbaImage> {
        let mut host = Host::new();
        let id = (self.mount)(&mut host);
        host.resize(id, self.size);

        let mut remaining = self.elapsed_ms;
        while remaining > 0.0 {
            let dt = remaining.min(FRAME_MS);
            host.tick(dt);
            remaining -= dt;
        }

        let frame = host.paint();
        let pixmap = raster::rasterize_frame(&frame)
            .ok_or_else(|| VisualTestError::Render(format!("scene '{}' is empty", self.name)))?;
        log::debug!(
            "Rendered scene {} at {}x{}",
            self.name,
            pixmap.width(),
            pixmap.height()
        );

        let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
        for (pixel, out) in pixmap.pixels().iter().zip(image.pixels_mut()) {
            let c = pixel.demultiply();
            *out = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(image)
    }
}
