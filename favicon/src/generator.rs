use frame_filter_common::config::{FaviconConfig, MAX_ICON_SIZE};
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::icon;
use crate::mask::{apply_mask, corner_radius, rounded_mask};

/// Files written by a successful run.
#[derive(Debug)]
pub struct GenerationReport {
    pub variants: Vec<PathBuf>,
    pub icon: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("logo file not found: {0}")]
    SourceNotFound(String),
    #[error("no favicon sizes configured")]
    NoSizes,
    #[error("favicon size {0} is outside 1..={MAX_ICON_SIZE}")]
    InvalidSize(u32),
    #[error("ICO size {0}x{0} was not among the generated sizes")]
    MissingVariant(u32),
    #[error("image error on {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create output directory {0}: {1}")]
    OutputDir(String, std::io::Error),
}

pub fn variant_file_name(size: u32) -> String {
    format!("favicon-{size}x{size}.png")
}

/// Resize `src` to a square and cut its corners.
pub fn rounded_variant(src: &RgbaImage, size: u32) -> RgbaImage {
    let resized = image::imageops::resize(src, size, size, FilterType::Lanczos3);
    let mask = rounded_mask(size, size, corner_radius(size));
    apply_mask(&resized, &mask)
}

/// Regenerate every rounded favicon variant and the packaged `.ico`.
///
/// Stops at the first failure. Files written before the failure are left
/// in place.
pub fn generate(config: &FaviconConfig) -> Result<GenerationReport, GenerateError> {
    if config.sizes.is_empty() {
        return Err(GenerateError::NoSizes);
    }
    if let Some(&bad) = config.sizes.iter().find(|&&s| s == 0 || s > MAX_ICON_SIZE) {
        return Err(GenerateError::InvalidSize(bad));
    }

    let source = Path::new(&config.source);
    if !source.exists() {
        return Err(GenerateError::SourceNotFound(config.source.clone()));
    }

    let logo = open_rgba(source)?;
    info!(
        path = config.source,
        width = logo.width(),
        height = logo.height(),
        "loaded logo"
    );

    let output_dir = Path::new(&config.output_dir);
    std::fs::create_dir_all(output_dir)
        .map_err(|e| GenerateError::OutputDir(config.output_dir.clone(), e))?;

    let mut variants = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let path = output_dir.join(variant_file_name(size));
        rounded_variant(&logo, size)
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| image_error(&path, e))?;
        info!(path = %path.display(), size, "created favicon");
        variants.push(path);
    }

    // The container is assembled from the files just written, not from memory.
    let mut entries = Vec::with_capacity(config.ico_sizes.len());
    for &size in &config.ico_sizes {
        if !config.sizes.contains(&size) {
            return Err(GenerateError::MissingVariant(size));
        }
        entries.push(open_rgba(&output_dir.join(variant_file_name(size)))?);
    }

    let icon_path = output_dir.join(&config.ico_name);
    icon::write_ico(&icon_path, &entries).map_err(|e| image_error(&icon_path, e))?;
    info!(path = %icon_path.display(), entries = entries.len(), "created icon");

    Ok(GenerationReport {
        variants,
        icon: icon_path,
    })
}

fn open_rgba(path: &Path) -> Result<RgbaImage, GenerateError> {
    let img = ImageReader::open(path)
        .map_err(|e| image_error(path, e.into()))?
        .with_guessed_format()
        .map_err(|e| image_error(path, e.into()))?
        .decode()
        .map_err(|e| image_error(path, e))?;
    Ok(img.into_rgba8())
}

fn image_error(path: &Path, source: image::ImageError) -> GenerateError {
    GenerateError::Image {
        path: path.display().to_string(),
        source,
    }
}
