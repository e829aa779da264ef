//! Checks on the images returned by the capture endpoint.

use image::{ImageFormat, RgbImage};

/// Decode a response body, requiring it to be a PNG
pub fn decode_png(bytes: &[u8]) -> Result<RgbImage, String> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => {}
        Ok(other) => return Err(format!("Expected PNG, got {:?}", other)),
        Err(e) => return Err(format!("Could not detect image format: {}", e)),
    }

    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| format!("Failed to decode PNG: {}", e))
}

/// Check `(width, height)` of an image
pub fn assert_dimensions(image: &RgbImage, width: u32, height: u32) -> Result<(), String> {
    if image.dimensions() != (width, height) {
        return Err(format!(
            "Image is {}x{}, expected {}x{}",
            image.width(),
            image.height(),
            width,
            height
        ));
    }
    Ok(())
}

/// Check that every pixel has the RGB value `expected`
pub fn assert_solid_rgb(image: &RgbImage, expected: [u8; 3]) -> Result<(), String> {
    match image.enumerate_pixels().find(|(_, _, p)| p.0 != expected) {
        Some((x, y, p)) => Err(format!(
            "Pixel ({}, {}) is {:?}, expected {:?}",
            x, y, p.0, expected
        )),
        None => Ok(()),
    }
}

/// Check that two images are pixel-for-pixel identical
pub fn assert_same_pixels(actual: &RgbImage, expected: &RgbImage) -> Result<(), String> {
    assert_dimensions(actual, expected.width(), expected.height())?;

    let differing = actual
        .pixels()
        .zip(expected.pixels())
        .filter(|(a, e)| a != e)
        .count();
    if differing > 0 {
        return Err(format!("{} pixels differ", differing));
    }
    Ok(())
}
