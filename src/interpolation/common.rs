//! Common utilities for the resampling algorithms.
//!
//! This module provides the index mapping and blending helpers shared by the
//! nearest-neighbor and bilinear resamplers.

use crate::grid::{Pixel, CHANNELS};

/// Integer ceiling division, `ceil(numerator / denominator)`.
pub fn ceil_div(numerator: usize, denominator: usize) -> usize {
    numerator / denominator + usize::from(numerator % denominator != 0)
}

/// Map an output index to the source index that owns it.
///
/// Computes `ceil((index + 1) * src_len / dst_len) - 1`, which assigns each
/// output block to its upper-left source sample.
pub fn source_index(index: usize, src_len: usize, dst_len: usize) -> usize {
    ceil_div((index + 1) * src_len, dst_len) - 1
}

/// Get the integer weights `(a1 - pos, pos - a0)` of the two anchors
/// `a0 < a1` at `pos`. Both weights sum to the span `a1 - a0`.
pub fn linear_weight(pos: usize, a0: usize, a1: usize) -> (u64, u64) {
    ((a1 - pos) as u64, (pos - a0) as u64)
}

/// Linearly interpolate between anchor pixels `p0` at `a0` and `p1` at `a1`.
///
/// Channels are computed as exact weighted averages and truncated toward
/// zero, so equal anchors always reproduce their value.
pub fn lerp(p0: Pixel, p1: Pixel, pos: usize, a0: usize, a1: usize) -> Pixel {
    let (w0, w1) = linear_weight(pos, a0, a1);
    let span = w0 + w1;
    let mut out = [0u8; CHANNELS];
    for (channel, value) in out.iter_mut().enumerate() {
        *value = ((w0 * p0[channel] as u64 + w1 * p1[channel] as u64) / span) as u8;
    }
    out
}
