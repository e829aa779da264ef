//! Conversion between encoded images and pixel grids.
//!
//! Incoming photos arrive as base64 payloads, usually wrapped in a
//! `data:image/...;base64,` URL. Alpha is dropped here so the resampling core
//! only ever sees RGB pixels.

use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage};
use tracing::debug;

use crate::error::{PixeliftError, Result};
use crate::grid::PixelGrid;

/// Strip an optional `data:` URL header and decode the base64 payload.
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>> {
    let encoded = match payload.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        Some(_) => {
            return Err(PixeliftError::Decode {
                message: "payload contains a comma but no data URL header".to_string(),
            })
        }
        None => payload,
    };

    STANDARD
        .decode(encoded.trim())
        .map_err(|e| PixeliftError::Decode {
            message: format!("invalid base64 image data: {}", e),
        })
}

/// Decode image bytes of any supported format into an RGB grid.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid> {
    let format = image::guess_format(bytes).ok();
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    debug!(
        format = ?format,
        width = rgb.width(),
        height = rgb.height(),
        "Decoded image"
    );
    PixelGrid::from_rgb_image(rgb)
}

/// Decode a base64 data URL straight into a grid.
pub fn decode_data_url(payload: &str) -> Result<PixelGrid> {
    decode_image(&decode_base64_payload(payload)?)
}

/// Encode a grid as PNG bytes.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>> {
    let (height, width) = grid.dimensions();
    let too_large = || PixeliftError::ImageEncoding {
        message: format!("{}x{} grid exceeds image size limits", height, width),
    };
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;

    let data = grid.as_array();
    let raw: Cow<'_, [u8]> = match data.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(data.iter().copied().collect()),
    };

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(&raw, width, height, ColorType::Rgb8)
        .map_err(|e| PixeliftError::ImageEncoding {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(buffer)
}

impl PixelGrid {
    pub fn from_rgb_image(img: RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::from_raw(height as usize, width as usize, img.into_raw())
    }

    pub fn into_rgb_image(self) -> Result<RgbImage> {
        let (height, width) = self.dimensions();
        let too_large = || PixeliftError::ImageEncoding {
            message: format!("{}x{} grid exceeds image size limits", height, width),
        };
        let width = u32::try_from(width).map_err(|_| too_large())?;
        let height = u32::try_from(height).map_err(|_| too_large())?;
        RgbImage::from_raw(width, height, self.into_raw()).ok_or_else(too_large)
    }
}
