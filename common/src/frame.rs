use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageReader, RgbImage};
use std::io::Cursor;

pub const JPEG_MIME: &str = "image/jpeg";

/// A frame carried inside a JSON message as a data URI.
///
/// Wire format:
///
///   data:<media-type>[;base64],<payload>
///
/// Browsers produce these with `canvas.toDataURL("image/jpeg", q)`. Only the
/// part after the first comma is decoded; the header is kept for logging.
#[derive(Debug, Clone)]
pub struct DataUri {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn parse(uri: &str) -> Result<Self, FrameError> {
        let (header, payload) = uri.split_once(',').ok_or(FrameError::MissingComma)?;
        let header = header
            .strip_prefix("data:")
            .ok_or(FrameError::NotDataUri)?;
        let media_type = header
            .split(';')
            .next()
            .filter(|m| !m.is_empty())
            .unwrap_or("text/plain")
            .to_string();
        let data = BASE64_STANDARD.decode(payload.trim_end())?;
        Ok(Self { media_type, data })
    }

    /// Decode the embedded image into an RGB bitmap.
    pub fn decode_image(&self) -> Result<RgbImage, FrameError> {
        decode_frame(&self.data)
    }
}

/// Build `data:<mime>;base64,<payload>`.
pub fn to_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", BASE64_STANDARD.encode(bytes))
}

/// Decode an encoded image of any format the `image` crate recognises by
/// content sniffing, discarding alpha.
pub fn decode_frame(bytes: &[u8]) -> Result<RgbImage, FrameError> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FrameError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| FrameError::Decode(e.to_string()))?;
    Ok(img.to_rgb8())
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, FrameError> {
    let mut buf = Vec::with_capacity(img.as_raw().len() / 8);
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(img)
        .map_err(|e| FrameError::Encode(e.to_string()))?;
    Ok(buf)
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("data URI has no ',' separating header from payload")]
    MissingComma,
    #[error("frame is not a data URI")]
    NotDataUri,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decode frame image: {0}")]
    Decode(String),
    #[error("failed to encode frame as JPEG: {0}")]
    Encode(String),
}
