//! Anchor placement for bilinear upscaling.
//!
//! Source pixels are scattered onto an enlarged canvas at multiples of the
//! scale factor. Every other cell holds the sentinel until the interpolator
//! fills it.

use crate::error::Result;
use crate::grid::{PixelGrid, ScaleFactor};

/// Place `input` pixel `(row, col)` at canvas cell `(scale*row, scale*col)`.
///
/// With a scale of 1 the input is returned as is.
pub fn scatter(input: PixelGrid, scale: ScaleFactor) -> Result<PixelGrid> {
    let step = scale.get();
    if step == 1 {
        return Ok(input);
    }

    let (height, width) = input.dimensions();
    let (out_height, out_width) = scale.scaled_dimensions(height, width)?;
    let mut canvas = PixelGrid::new(out_height, out_width)?;

    for row in 0..height {
        for col in 0..width {
            canvas.set(step * row, step * col, input.get(row, col));
        }
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Pixel, SENTINEL};
    use pretty_assertions::assert_eq;

    fn numbered(height: usize, width: usize) -> PixelGrid {
        let pixels: Vec<Pixel> = (1..=height * width)
            .map(|i| [i as u8, 100 + i as u8, 200])
            .collect();
        PixelGrid::from_pixels(height, width, pixels).unwrap()
    }

    #[test]
    fn test_scatter_places_anchors() {
        let input = numbered(2, 3);
        let canvas = scatter(input.clone(), ScaleFactor::new(3).unwrap()).unwrap();
        assert_eq!(canvas.dimensions(), (6, 9));

        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(canvas.get(3 * row, 3 * col), input.get(row, col));
            }
        }
    }

    #[test]
    fn test_scatter_non_anchors_are_sentinel() {
        for step in 2..=4 {
            let canvas = scatter(numbered(3, 2), ScaleFactor::new(step).unwrap()).unwrap();
            let (height, width) = canvas.dimensions();
            for row in 0..height {
                for col in 0..width {
                    if row % step != 0 || col % step != 0 {
                        assert_eq!(canvas.get(row, col), SENTINEL, "at ({}, {})", row, col);
                    }
                }
            }
        }
    }

    #[test]
    fn test_scatter_scale_one_passthrough() {
        let input = numbered(2, 2);
        let canvas = scatter(input.clone(), ScaleFactor::new(1).unwrap()).unwrap();
        assert_eq!(canvas, input);
    }
}
