use image::RgbImage;

use super::traits::FrameFilter;

const BLUE_GAIN: f32 = 1.2;
const RED_GAIN: f32 = 0.8;

/// Cool blue tint: boost blue, cut red, leave green alone.
///
/// Scaled values are truncated toward zero, not rounded.
pub struct BlueTint;

impl FrameFilter for BlueTint {
    fn apply(&self, frame: &mut RgbImage) {
        for pixel in frame.pixels_mut() {
            let [r, g, b] = pixel.0;
            pixel.0 = [scale_truncating(r, RED_GAIN), g, scale_truncating(b, BLUE_GAIN)];
        }
    }

    fn name(&self) -> &str {
        "blue_tint"
    }
}

fn scale_truncating(v: u8, gain: f32) -> u8 {
    (v as f32 * gain).clamp(0.0, 255.0) as u8
}
