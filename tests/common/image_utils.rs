//! Image verification utilities for testing.

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat};
use std::path::Path;

/// Load an image from a file
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path)
}

/// Detect image format from bytes
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Check if an image has the expected dimensions
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (actual_width, actual_height) = image.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    Ok(())
}

/// Count pixels matching an exact RGBA value
pub fn count_pixels(image: &image::RgbaImage, color: [u8; 4]) -> usize {
    image.pixels().filter(|p| p.0 == color).count()
}

/// Number of distinct colors along one horizontal row of the image
pub fn distinct_colors_in_row(image: &image::RgbaImage, y: u32) -> usize {
    let mut colors: Vec<[u8; 4]> = (0..image.width()).map(|x| image.get_pixel(x, y).0).collect();
    colors.sort();
    colors.dedup();
    colors.len()
}
