use image::RgbImage;

use super::traits::FrameFilter;

/// Rows produce R', G', B' from (R, G, B).
///
/// These are the usual sepia weights with the red and blue inputs swapped:
/// the coefficients were tuned against frames in BGR channel order, and the
/// output is kept identical to that.
const SEPIA: [[f32; 3]; 3] = [
    [0.189, 0.769, 0.393],
    [0.168, 0.686, 0.349],
    [0.131, 0.534, 0.272],
];

/// Warm sepia tone via a fixed 3x3 colour matrix.
pub struct Sepia;

impl FrameFilter for Sepia {
    fn apply(&self, frame: &mut RgbImage) {
        for pixel in frame.pixels_mut() {
            let [r, g, b] = pixel.0.map(f32::from);
            pixel.0 = SEPIA.map(|[kr, kg, kb]| {
                (kr * r + kg * g + kb * b)
                    .round_ties_even()
                    .clamp(0.0, 255.0) as u8
            });
        }
    }

    fn name(&self) -> &str {
        "sepia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sepia_of(rgb: [u8; 3]) -> [u8; 3] {
        let mut img = RgbImage::from_pixel(1, 1, Rgb(rgb));
        Sepia.apply(&mut img);
        img.get_pixel(0, 0).0
    }

    #[test]
    fn black_stays_black() {
        assert_eq!(sepia_of([0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn white_turns_cream() {
        // Red and green rows sum above 1.0 and saturate, blue lands at 238.935.
        assert_eq!(sepia_of([255, 255, 255]), [255, 255, 239]);
    }

    #[test]
    fn mid_grey_is_warm() {
        let [r, g, b] = sepia_of([100, 100, 100]);
        assert_eq!([r, g, b], [135, 120, 94]);
        assert!(r > g && g > b);
    }

    #[test]
    fn red_input_uses_smallest_weights() {
        // 255 * (.189, .168, .131)
        assert_eq!(sepia_of([255, 0, 0]), [48, 43, 33]);
    }

    #[test]
    fn blue_input_uses_largest_weights() {
        // 255 * (.393, .349, .272)
        assert_eq!(sepia_of([0, 0, 255]), [100, 89, 69]);
    }
}
