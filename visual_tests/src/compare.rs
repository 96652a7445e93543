use crate::{Result, VisualTestError};
use image::{DynamicImage, Rgba, RgbaImage};
use image_compare::Algorithm;

/// Channel difference below which pixels count as equal in diff images.
const DIFF_TOLERANCE: u8 = 10;

/// SSIM similarity of two frames, from 0.0 to 1.0
pub fn similarity(reference: &RgbaImage, captured: &RgbaImage) -> Result<f64> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "size mismatch: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    let reference = DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let captured = DynamicImage::ImageRgba8(captured.clone()).to_rgb8();
    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &reference, &captured)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;
    Ok(result.score)
}

/// Captured frame dimmed, with differing pixels painted red.
pub fn diff_image(reference: &RgbaImage, captured: &RgbaImage) -> RgbaImage {
    let (width, height) = captured.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let cap = captured.get_pixel(x, y);
        let delta = if x < reference.width() && y < reference.height() {
            channel_delta(reference.get_pixel(x, y), cap)
        } else {
            u8::MAX
        };
        if delta > DIFF_TOLERANCE {
            let intensity = (delta as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            Rgba([cap[0] / 3, cap[1] / 3, cap[2] / 3, 255])
        }
    })
}

fn channel_delta(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    (0..3).map(|i| a[i].abs_diff(b[i])).max().unwrap_or(0)
}
