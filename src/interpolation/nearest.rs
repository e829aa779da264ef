//! Nearest neighbor upscaling.
//!
//! Every output pixel is a verbatim copy of the source pixel that owns it.
//! It's the simplest technique, offering the fastest performance but with
//! blocky results compared to bilinear.

use super::common::source_index;
use super::Resampler;
use crate::error::Result;
use crate::grid::{PixelGrid, ScaleFactor};

/// Nearest neighbor resampler
pub struct NearestNeighborResampler;

impl Resampler for NearestNeighborResampler {
    fn resize(&self, input: PixelGrid, scale: ScaleFactor) -> Result<PixelGrid> {
        let (height, width) = input.dimensions();
        let (out_height, out_width) = scale.scaled_dimensions(height, width)?;
        let mut output = PixelGrid::new(out_height, out_width)?;

        let src_cols: Vec<usize> = (0..out_width)
            .map(|x| source_index(x, width, out_width))
            .collect();

        for y in 0..out_height {
            let src_row = source_index(y, height, out_height);
            for (x, &src_col) in src_cols.iter().enumerate() {
                output.set(y, x, input.get(src_row, src_col));
            }
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
