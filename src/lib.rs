//! # pixelift
//!
//! An in-memory photo upscaling service.
//!
//! This library provides the upscaling core, two integer-factor resampling
//! techniques over a dense RGB [`PixelGrid`], and the HTTP service that
//! accepts captured photos and returns them enlarged.
//!
//! ## Techniques
//!
//! - **Nearest neighbor**: every output pixel copies the source pixel that owns it
//! - **Bilinear**: source pixels are scattered onto the enlarged canvas and the
//!   gaps are filled by linear interpolation, rows first, then columns
//!
//! ```
//! use pixelift::{upscale, PixelGrid, Technique};
//!
//! let photo = PixelGrid::from_pixels(1, 2, vec![[0, 0, 0], [255, 255, 255]]).unwrap();
//! let larger = upscale(photo, 2, Technique::Bilinear).unwrap();
//! assert_eq!(larger.dimensions(), (2, 4));
//! assert_eq!(larger.get(0, 1), [127, 127, 127]);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod handlers;
pub mod interpolation;
pub mod logging;
pub mod state;
pub mod storage;

pub use codec::{decode_data_url, decode_image, encode_png};
pub use config::Config;
pub use error::{PixeliftError, Result};
pub use grid::{Pixel, PixelGrid, ScaleFactor, SENTINEL};
pub use interpolation::{
    get_resampler, upscale, upscale_with, Resampler, Technique, TrailingEdge, UpscaleOptions,
};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_request_error,
    log_timed_operation,
};
pub use state::AppState;
pub use storage::TempStore;
