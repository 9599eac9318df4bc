use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, ImageResult, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a multi-resolution `.ico` with one PNG-compressed entry per image,
/// in the order given.
pub fn write_ico(path: &Path, images: &[RgbaImage]) -> ImageResult<()> {
    let frames = images
        .iter()
        .map(|img| {
            IcoFrame::as_png(
                img.as_raw(),
                img.width(),
                img.height(),
                ExtendedColorType::Rgba8,
            )
        })
        .collect::<ImageResult<Vec<_>>>()?;

    let mut file = BufWriter::new(File::create(path)?);
    IcoEncoder::new(&mut file).encode_images(&frames)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn directory_lists_every_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.ico");
        let images = [
            RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255])),
            RgbaImage::from_pixel(32, 32, Rgba([0, 255, 0, 255])),
        ];
        write_ico(&path, &images).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // ICONDIR: reserved, type = 1 (icon), count
        assert_eq!(&bytes[0..6], &[0, 0, 1, 0, 2, 0]);
        // ICONDIRENTRY width/height bytes
        assert_eq!((bytes[6], bytes[7]), (16, 16));
        assert_eq!((bytes[22], bytes[23]), (32, 32));

        // The decoder picks the largest entry.
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }
}
