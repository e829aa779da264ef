//! Application state management for pixelift.
//!
//! This module defines the shared state that is passed to all handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::{PixeliftError, Result};
use crate::grid::ScaleFactor;
use crate::interpolation::UpscaleOptions;
use crate::storage::TempStore;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Options applied where a request leaves a field unset
    pub defaults: UpscaleOptions,
    /// Scratch storage for originals and results
    pub store: TempStore,
    /// When the state was created
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState from a configuration
    pub fn new(config: Config) -> Result<Self> {
        let defaults = config.default_options()?;
        let store = TempStore::new(config.storage.temp_dir.clone(), config.storage.persist);
        Ok(Self {
            config,
            defaults,
            store,
            started_at: Instant::now(),
        })
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Check a requested scale against the configured limit
    pub fn check_scale(&self, scale: u32) -> Result<()> {
        let max_scale = self.config.upscale.max_scale;
        if scale > max_scale {
            return Err(PixeliftError::InvalidParameter {
                param: "scale".to_string(),
                message: format!("Scale {} exceeds the maximum of {}", scale, max_scale),
            });
        }
        Ok(())
    }

    /// Check the canvas a `height x width` image would need at `scale`
    /// against the configured pixel limit
    pub fn check_output_size(&self, height: usize, width: usize, scale: ScaleFactor) -> Result<()> {
        let max_pixels = self.config.upscale.max_output_pixels;
        let (out_height, out_width) = scale.scaled_dimensions(height, width)?;
        let too_large = || PixeliftError::InvalidParameter {
            param: "scale".to_string(),
            message: format!(
                "{}x{} output exceeds the limit of {} pixels",
                out_width, out_height, max_pixels
            ),
        };

        match out_height.checked_mul(out_width) {
            Some(pixels) if pixels <= max_pixels => Ok(()),
            _ => Err(too_large()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::Technique;

    #[test]
    fn test_state_from_default_config() {
        let state = AppState::new(Config::default()).unwrap();
        assert_eq!(state.defaults.technique, Technique::Bilinear);
        assert_eq!(state.defaults.scale.get(), 2);
        assert!(!state.store.is_persistent());
    }

    #[test]
    fn test_state_rejects_bad_defaults() {
        let mut config = Config::default();
        config.upscale.default_technique = "lanczos".to_string();
        assert!(AppState::new(config).is_err());
    }

    #[test]
    fn test_check_output_size() {
        let mut config = Config::default();
        config.upscale.max_output_pixels = 100;
        let state = AppState::new(config).unwrap();

        let scale = ScaleFactor::new(2).unwrap();
        assert!(state.check_output_size(5, 5, scale).is_ok());
        assert!(matches!(
            state.check_output_size(5, 6, scale),
            Err(PixeliftError::InvalidParameter { .. })
        ));
        assert!(state
            .check_output_size(usize::MAX / 2, 3, scale)
            .is_err());
    }

    #[test]
    fn test_check_scale() {
        let state = AppState::new(Config::default()).unwrap();
        assert!(state.check_scale(8).is_ok());
        assert!(matches!(
            state.check_scale(9),
            Err(PixeliftError::InvalidParameter { .. })
        ));
    }
}
