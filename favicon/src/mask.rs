use image::{GrayImage, Luma, RgbaImage};

const OPAQUE: u8 = 255;

/// Corner radius for a square icon: an eighth of the edge, never below 2px.
pub fn corner_radius(size: u32) -> u32 {
    (size / 8).max(2)
}

/// Opacity mask for a rounded rectangle spanning `(0, 0)..=(width-1, height-1)`.
///
/// Pixels inside are 255, the cut-away corners are 0. A pixel in a corner
/// square is inside when it lies within `radius` of that corner's arc centre.
pub fn rounded_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let r = radius.min(width.min(height) / 2) as i64;
    let (max_x, max_y) = (width as i64 - 1, height as i64 - 1);

    GrayImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let cx = x.clamp(r, (max_x - r).max(r));
        let cy = y.clamp(r, (max_y - r).max(r));
        let (dx, dy) = (x - cx, y - cy);
        if dx * dx + dy * dy <= r * r {
            Luma([OPAQUE])
        } else {
            Luma([0])
        }
    })
}

/// Composite `src` through `mask` onto a fully transparent canvas.
///
/// Every channel, alpha included, is scaled by `mask / 255`, so masked-out
/// pixels become `(0, 0, 0, 0)`.
pub fn apply_mask(src: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(src.dimensions(), mask.dimensions());
    let mut out = RgbaImage::new(src.width(), src.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let m = mask.get_pixel(x, y).0[0] as u16;
        pixel.0 = src
            .get_pixel(x, y)
            .0
            .map(|c| ((c as u16 * m + 127) / 255) as u8);
    }
    out
}
