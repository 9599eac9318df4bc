use image::RgbImage;

use super::traits::FrameFilter;

const SATURATION_GAIN: f32 = 1.5;

/// Vibrant saturation boost in HSV space.
///
/// For a fixed hue and value, every channel sits at `v - (v - c)` where
/// `v - c` is proportional to saturation. Scaling saturation by `k` therefore
/// scales each channel's distance from `max(r, g, b)` by `k`, which avoids a
/// full round trip through hue. `k` is capped so saturation never exceeds 1.
pub struct Vibrant;

impl FrameFilter for Vibrant {
    fn apply(&self, frame: &mut RgbImage) {
        for pixel in frame.pixels_mut() {
            pixel.0 = saturate(pixel.0, SATURATION_GAIN);
        }
    }

    fn name(&self) -> &str {
        "vibrant"
    }
}

fn saturate(rgb: [u8; 3], gain: f32) -> [u8; 3] {
    let max = *rgb.iter().max().unwrap_or(&0);
    let min = *rgb.iter().min().unwrap_or(&0);
    if max == 0 || max == min {
        return rgb;
    }
    let v = max as f32;
    let s = (max - min) as f32 / v;
    let k = gain.min(1.0 / s);
    rgb.map(|c| (v - (v - c as f32) * k).round().clamp(0.0, 255.0) as u8)
}
