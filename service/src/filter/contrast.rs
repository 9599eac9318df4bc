use image::RgbImage;

use super::traits::FrameFilter;

const ALPHA: f32 = 1.5;
const BETA: f32 = 0.0;

/// High contrast boost: `|v * alpha + beta|` per channel, rounded half to
/// even and saturated.
pub struct HighContrast;

impl FrameFilter for HighContrast {
    fn apply(&self, frame: &mut RgbImage) {
        for pixel in frame.pixels_mut() {
            pixel.0 = pixel
                .0
                .map(|v| (v as f32 * ALPHA + BETA).abs().round_ties_even().min(255.0) as u8);
        }
    }

    fn name(&self) -> &str {
        "high_contrast"
    }
}
