//! Pixel grid and scale factor types.
//!
//! A [`PixelGrid`] is a dense, row-major `height × width` array of RGB pixels
//! backed by an `ndarray::Array3<u8>` of shape `(height, width, 3)`.

use ndarray::{s, Array3};

use crate::error::{PixeliftError, Result};

/// Number of channels per pixel
pub const CHANNELS: usize = 3;

/// A single pixel, channels in RGB order
pub type Pixel = [u8; CHANNELS];

/// Placeholder value for cells awaiting interpolation
pub const SENTINEL: Pixel = [0, 0, 0];

/// Dense row-major grid of 3-channel pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    data: Array3<u8>,
}

impl PixelGrid {
    /// Create a grid with every cell set to [`SENTINEL`].
    pub fn new(height: usize, width: usize) -> Result<Self> {
        check_dimensions(height, width)?;
        Ok(Self {
            data: Array3::zeros((height, width, CHANNELS)),
        })
    }

    /// Create a grid with every cell set to `pixel`.
    pub fn filled(height: usize, width: usize, pixel: Pixel) -> Result<Self> {
        let mut grid = Self::new(height, width)?;
        for (channel, value) in pixel.iter().enumerate() {
            grid.data.slice_mut(s![.., .., channel]).fill(*value);
        }
        Ok(grid)
    }

    /// Create a grid from row-major pixels.
    pub fn from_pixels(height: usize, width: usize, pixels: Vec<Pixel>) -> Result<Self> {
        let raw = pixels.into_iter().flatten().collect();
        Self::from_raw(height, width, raw)
    }

    /// Create a grid from interleaved row-major channel bytes.
    pub fn from_raw(height: usize, width: usize, raw: Vec<u8>) -> Result<Self> {
        check_dimensions(height, width)?;
        let len = raw.len();
        let data = Array3::from_shape_vec((height, width, CHANNELS), raw).map_err(|_| {
            PixeliftError::InvalidDimensions {
                message: format!(
                    "{} bytes cannot fill a {}x{} grid of {} channels",
                    len, height, width, CHANNELS
                ),
            }
        })?;
        Ok(Self { data })
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        let (height, width, _) = self.data.dim();
        (height, width)
    }

    /// Read the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Pixel {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    /// Write the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, pixel: Pixel) {
        for (channel, value) in pixel.iter().enumerate() {
            self.data[[row, col, channel]] = *value;
        }
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let (height, width) = self.dimensions();
        (0..height).flat_map(move |row| (0..width).map(move |col| self.get(row, col)))
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    pub(crate) fn as_array_mut(&mut self) -> &mut Array3<u8> {
        &mut self.data
    }

    /// Consume the grid, returning interleaved row-major channel bytes.
    pub fn into_raw(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            self.data.into_raw_vec()
        } else {
            self.data.iter().copied().collect()
        }
    }
}

fn check_dimensions(height: usize, width: usize) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(PixeliftError::InvalidDimensions {
            message: format!(
                "grid dimensions must be at least 1x1, got {}x{}",
                height, width
            ),
        });
    }
    Ok(())
}

/// Integer multiplier applied to both grid dimensions, always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleFactor(usize);

impl ScaleFactor {
    pub fn new(scale: usize) -> Result<Self> {
        if scale == 0 {
            return Err(PixeliftError::InvalidDimensions {
                message: "scale factor must be at least 1".to_string(),
            });
        }
        Ok(Self(scale))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Output `(height, width)` for a grid of the given dimensions.
    pub fn scaled_dimensions(self, height: usize, width: usize) -> Result<(usize, usize)> {
        height
            .checked_mul(self.0)
            .zip(width.checked_mul(self.0))
            .filter(|(h, w)| h.checked_mul(*w).and_then(|n| n.checked_mul(CHANNELS)).is_some())
            .ok_or_else(|| PixeliftError::InvalidDimensions {
                message: format!(
                    "scaling a {}x{} grid by {} overflows",
                    height, width, self.0
                ),
            })
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u32> for ScaleFactor {
    type Error = PixeliftError;

    fn try_from(scale: u32) -> Result<Self> {
        Self::new(scale as usize)
    }
}
