// Copyright 2020 @TwoCookingMice

pub mod exr_utils;
pub mod image_utils;
pub mod obj_utils;

use crate::math::bitmap::Bitmap;

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write OpenEXR image `{path}`")]
    Exr {
        path: String,
        #[source]
        source: exr::error::Error,
    },
    #[error("failed to write image `{path}`")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported output format for `{0}` (expected .exr, .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Writes `bitmap` to `path`, picking the format from the file extension:
/// linear radiance for `.exr`, tone-mapped 8-bit for `.ppm` and `.png`.
pub fn write_image(bitmap: &Bitmap, path: &str) -> Result<(), OutputError> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("exr") => exr_utils::write_exr_to_file(bitmap, path),
        Some("ppm") | Some("png") => image_utils::write_ldr_to_file(bitmap, path),
        _ => Err(OutputError::UnsupportedFormat(path.to_string())),
    }
}
