//! Drives every effect headlessly with synthetic frame ticks.
//!
//! Run with `RUST_LOG=debug` to see the host at work. Passing a directory as
//! the first argument also writes the last frame of each effect as a PNG.

use std::path::PathBuf;

use halo::prelude::*;
use halo::raster;

const FRAME_MS: f32 = 16.0;
const FRAMES: usize = 180;

fn main() {
    env_logger::init();

    let out_dir = std::env::args().nth(1).map(PathBuf::from);
    if let Some(dir) = &out_dir {
        if let Err(err) = std::fs::create_dir_all(dir) {
            log::warn!("Cannot create {}: {}", dir.display(), err);
        }
    }

    let size = Size::new(200.0, 200.0);
    let mut host = Host::new();
    let effects = [
        (
            "circle",
            host.mount(CircleBorder::new(
                CircleAnimation::RotationGradient,
                BorderConfig::circle().content_padding(12.0),
            )),
        ),
        (
            "cool",
            host.mount(CoolCircleBorder::new(BorderConfig::cool().gradient(true))),
        ),
        (
            "square",
            host.mount(
                SquareBorder::new(SquareAnimation::BorderGradient, BorderConfig::square())
                    .corner_radius(24.0),
            ),
        ),
        ("waves", host.mount(Waves::new(WavesConfig::default()))),
        ("heart", host.mount(Heart::new(HeartConfig::default()))),
        (
            "flashlight",
            host.mount(Flashlight::new(FlashlightConfig::default())),
        ),
    ];
    for (_, id) in &effects {
        host.resize(*id, size);
    }

    let (_, light) = effects[effects.len() - 1];
    let mut frame = host.paint();
    for i in 0..FRAMES {
        host.tick(FRAME_MS);
        // Sweep the flashlight right, then back
        host.drag(light, if i < FRAMES / 2 { 1.0 } else { -1.0 }, 0.0);
        frame = host.paint();
        log::debug!("Frame {}: repainted {} layer(s)", i, frame.repainted);
    }

    for (name, id) in &effects {
        let Some(layer) = frame.layer(*id) else {
            continue;
        };
        println!("{:<10} {:>3} command(s)", name, layer.commands.len());
        for command in &layer.commands {
            log::info!("{}: {:?}", name, command);
        }

        let Some(dir) = &out_dir else {
            continue;
        };
        let path = dir.join(format!("{}.png", name));
        match raster::rasterize(&layer.commands, layer.size, frame.background) {
            Some(pixmap) => match pixmap.save_png(&path) {
                Ok(()) => println!("  wrote {}", path.display()),
                Err(err) => log::warn!("Cannot write {}: {}", path.display(), err),
            },
            None => log::warn!("{} has nothing to draw", name),
        }
    }
}
