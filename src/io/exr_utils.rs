/* Copyright 2020 @TwoCookingMice */

use super::OutputError;
use crate::math::bitmap::Bitmap;

use exr::prelude::write_rgb_file;

/// Writes linear RGB radiance to an OpenEXR file.
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) -> Result<(), OutputError> {
    log::info!("Starting writing openexr images: {}.", file_path);

    let width = image.width();
    let pixels = image.pixels();
    write_rgb_file(file_path, width, image.height(), |x, y| {
        let p = pixels[y * width + x];
        (p.x, p.y, p.z)
    })
    .map_err(|source| OutputError::Exr { path: file_path.to_string(), source })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
