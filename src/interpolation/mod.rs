//! Resampling algorithms for upscaling pixel grids.
//!
//! This module provides the two upscaling techniques and the entry points
//! that select between them.

pub mod bilinear;
pub mod common;
pub mod nearest;
pub mod scatter;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{PixeliftError, Result};
use crate::grid::{PixelGrid, ScaleFactor};

pub use bilinear::{BilinearResampler, RowColumnInterpolator};
pub use nearest::NearestNeighborResampler;
pub use scatter::scatter;

/// Available upscaling techniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    #[serde(rename = "nearest")]
    NearestNeighbor,
    #[default]
    Bilinear,
}

impl Technique {
    pub fn as_str(&self) -> &'static str {
        match self {
            Technique::NearestNeighbor => "nearest",
            Technique::Bilinear => "bilinear",
        }
    }
}

impl FromStr for Technique {
    type Err = PixeliftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Technique::NearestNeighbor),
            "bilinear" => Ok(Technique::Bilinear),
            _ => Err(PixeliftError::InvalidTechnique {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treatment of cells past the last anchor on each axis during bilinear
/// interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingEdge {
    /// Leave them at the sentinel value
    #[default]
    Sentinel,
    /// Copy the last anchor value into them
    Replicate,
}

impl FromStr for TrailingEdge {
    type Err = PixeliftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sentinel" => Ok(TrailingEdge::Sentinel),
            "replicate" => Ok(TrailingEdge::Replicate),
            _ => Err(PixeliftError::InvalidParameter {
                param: "trailing_edge".to_string(),
                message: format!(
                    "Unknown trailing edge mode: {}. Must be one of: sentinel, replicate",
                    s
                ),
            }),
        }
    }
}

/// Trait for upscaling methods
pub trait Resampler: Send + Sync {
    /// Produce a grid `scale` times larger in both dimensions
    fn resize(&self, input: PixelGrid, scale: ScaleFactor) -> Result<PixelGrid>;

    /// Get the name of this technique
    fn name(&self) -> &str;
}

/// Get a resampler for the given technique
pub fn get_resampler(technique: Technique, edge: TrailingEdge) -> Box<dyn Resampler> {
    match technique {
        Technique::NearestNeighbor => Box::new(NearestNeighborResampler),
        Technique::Bilinear => Box::new(BilinearResampler::new(edge)),
    }
}

/// Full set of upscaling options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpscaleOptions {
    pub scale: ScaleFactor,
    pub technique: Technique,
    pub trailing_edge: TrailingEdge,
}

/// Upscale `image` by `scale` using `technique`.
pub fn upscale(image: PixelGrid, scale: u32, technique: Technique) -> Result<PixelGrid> {
    let options = UpscaleOptions {
        scale: ScaleFactor::try_from(scale)?,
        technique,
        ..Default::default()
    };
    upscale_with(image, &options)
}

/// Upscale `image` with an explicit set of options.
pub fn upscale_with(image: PixelGrid, options: &UpscaleOptions) -> Result<PixelGrid> {
    let resampler = get_resampler(options.technique, options.trailing_edge);
    let (height, width) = image.dimensions();

    debug!(
        technique = resampler.name(),
        scale = options.scale.get(),
        height = height,
        width = width,
        "Upscaling pixel grid"
    );

    resampler.resize(image, options.scale)
}
