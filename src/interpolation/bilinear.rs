//! Bilinear upscaling.
//!
//! Source pixels are first scattered onto the enlarged canvas (see
//! [`scatter`](super::scatter::scatter)); the gaps are then filled by linear
//! interpolation, first along the anchor rows and then along every column.

use ndarray::{s, ArrayViewMut2};

use super::common::lerp;
use super::scatter::scatter;
use super::{Resampler, TrailingEdge};
use crate::error::Result;
use crate::grid::{Pixel, PixelGrid, ScaleFactor};

/// Fills the sentinel cells of a scattered canvas.
///
/// The row pass runs over rows at multiples of `step` and must complete for
/// the whole canvas before the column pass starts, since the column pass
/// reads the horizontally completed anchor rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowColumnInterpolator {
    edge: TrailingEdge,
}

impl RowColumnInterpolator {
    pub fn new(edge: TrailingEdge) -> Self {
        Self { edge }
    }

    pub fn interpolate(&self, mut canvas: PixelGrid, step: ScaleFactor) -> PixelGrid {
        let step = step.get();
        if step == 1 {
            return canvas;
        }

        self.row_pass(&mut canvas, step);
        self.column_pass(&mut canvas, step);
        canvas
    }

    fn row_pass(&self, canvas: &mut PixelGrid, step: usize) {
        let height = canvas.height();
        let data = canvas.as_array_mut();
        for y in (0..height).step_by(step) {
            sweep_line(data.slice_mut(s![y, .., ..]), step, self.edge);
        }
    }

    fn column_pass(&self, canvas: &mut PixelGrid, step: usize) {
        let width = canvas.width();
        let data = canvas.as_array_mut();
        for x in 0..width {
            sweep_line(data.slice_mut(s![.., x, ..]), step, self.edge);
        }
    }
}

/// Interpolate one line of `(len, 3)` channel values whose anchors sit at
/// multiples of `step`.
///
/// Anchors advance by `step`; the sweep stops once the next right anchor
/// would fall outside the line, so cells past the last anchor are only
/// touched by [`TrailingEdge::Replicate`].
fn sweep_line(mut line: ArrayViewMut2<'_, u8>, step: usize, edge: TrailingEdge) {
    let len = line.nrows();

    let mut x1 = 0;
    let mut x2 = step;
    if x2 < len {
        let mut left = pixel_at(&line, x1);
        let mut right = pixel_at(&line, x2);

        for x in 1..len {
            if x % step != 0 {
                put_pixel(&mut line, x, lerp(left, right, x, x1, x2));
            } else {
                x1 = x2;
                x2 += step;
                if x2 >= len {
                    break;
                }
                left = pixel_at(&line, x1);
                right = pixel_at(&line, x2);
            }
        }
    }

    if edge == TrailingEdge::Replicate {
        let last_anchor = (len - 1) / step * step;
        let value = pixel_at(&line, last_anchor);
        for x in last_anchor + 1..len {
            put_pixel(&mut line, x, value);
        }
    }
}

fn pixel_at(line: &ArrayViewMut2<'_, u8>, index: usize) -> Pixel {
    [line[[index, 0]], line[[index, 1]], line[[index, 2]]]
}

fn put_pixel(line: &mut ArrayViewMut2<'_, u8>, index: usize, pixel: Pixel) {
    for (channel, value) in pixel.iter().enumerate() {
        line[[index, channel]] = *value;
    }
}

/// Bilinear resampler: scatter followed by row/column interpolation
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearResampler {
    interpolator: RowColumnInterpolator,
}

impl BilinearResampler {
    pub fn new(edge: TrailingEdge) -> Self {
        Self {
            interpolator: RowColumnInterpolator::new(edge),
        }
    }
}

impl Resampler for BilinearResampler {
    fn resize(&self, input: PixelGrid, scale: ScaleFactor) -> Result<PixelGrid> {
        let canvas = scatter(input, scale)?;
        Ok(self.interpolator.interpolate(canvas, scale))
    }

    fn name(&self) -> &str {
        "bilinear"
    }
}
