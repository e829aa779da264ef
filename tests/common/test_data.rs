//! Test photo generation.
//!
//! Small synthetic photos encoded the way a browser canvas would send them.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// A photo whose channels encode the pixel position, fully opaque
pub fn create_test_photo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 30 % 256) as u8, (y * 30 % 256) as u8, 128, 255])
    })
}

/// A single-color photo
pub fn create_solid_photo(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// Encode an image in `format`
pub fn encode(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .write_to(&mut buffer, format)
            .expect("Failed to encode test photo"),
        _ => img
            .write_to(&mut buffer, format)
            .expect("Failed to encode test photo"),
    }
    buffer.into_inner()
}

/// Wrap encoded bytes in a `data:` URL
pub fn data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// A PNG data URL of [`create_test_photo`]
pub fn png_data_url(width: u32, height: u32) -> String {
    data_url(&encode(&create_test_photo(width, height), ImageFormat::Png), "image/png")
}
