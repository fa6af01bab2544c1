// Copyright @yucwang 2026

use super::OutputError;
use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use image::{ImageBuffer, Rgb, RgbImage};

const DISPLAY_GAMMA: Float = 0.6;

/// Maps one linear radiance channel to an 8-bit display value.
pub fn tonemap(c: Float) -> u8 {
    let c = if c.is_nan() { 0.0 } else { c.max(0.0).min(1.0) };
    (255.0 * c.powf(DISPLAY_GAMMA)) as u8
}

pub fn to_rgb8(image: &Bitmap) -> RgbImage {
    ImageBuffer::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let p = image[(x as usize, y as usize)];
        Rgb([tonemap(p.x), tonemap(p.y), tonemap(p.z)])
    })
}

/// Writes a tone-mapped 8-bit image; the format follows the extension of
/// `file_path` (`.ppm` or `.png`).
pub fn write_ldr_to_file(image: &Bitmap, file_path: &str) -> Result<(), OutputError> {
    log::info!("Starting writing LDR image: {}.", file_path);
    to_rgb8(image)
        .save(file_path)
        .map_err(|source| OutputError::Image { path: file_path.to_string(), source })?;
    log::info!("Image written to: {}.", file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;
    use test_case::test_case;

    #[test_case(-1.0, 0 ; "negative clamps to black")]
    #[test_case(0.0, 0 ; "black")]
    #[test_case(1.0, 255 ; "white")]
    #[test_case(7.5, 255 ; "overexposed clamps to white")]
    #[test_case(0.5, 168 ; "mid grey is brightened")]
    #[test_case(Float::NAN, 0 ; "nan is black")]
    fn test_tonemap(c: Float, expected: u8) {
        assert_eq!(tonemap(c), expected);
    }

    #[test]
    fn test_write_ppm_and_png() {
        let mut bitmap = Bitmap::new(4, 3);
        bitmap[(1, 2)] = Vector3f::new(1.0, 0.0, 0.5);
        let rgb = to_rgb8(&bitmap);
        assert_eq!(rgb.get_pixel(1, 2), &Rgb([255, 0, 168]));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([0, 0, 0]));

        for name in ["bvhpath_image_utils_test.ppm", "bvhpath_image_utils_test.png"].iter() {
            let path = std::env::temp_dir().join(name).to_string_lossy().to_string();
            write_ldr_to_file(&bitmap, &path).expect("image written");
            let read_back = image::open(&path).expect("image readable").to_rgb8();
            assert_eq!(read_back.dimensions(), (4, 3));
            assert_eq!(read_back.get_pixel(1, 2), &Rgb([255, 0, 168]));
            let _ = std::fs::remove_file(&path);
        }
    }
}
