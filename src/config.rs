//! Configuration management for pixelift.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{PixeliftError, Result};
use crate::grid::ScaleFactor;
use crate::interpolation::{Technique, TrailingEdge, UpscaleOptions};

/// Command-line arguments for pixelift
#[derive(Parser, Debug, Default)]
#[command(name = "pixelift")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "PIXELIFT_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PIXELIFT_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "PIXELIFT_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "PIXELIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PIXELIFT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Default scale factor for requests that do not name one
    #[arg(short, long, env = "PIXELIFT_SCALE")]
    pub scale: Option<u32>,

    /// Default technique (nearest, bilinear)
    #[arg(short, long, env = "PIXELIFT_TECHNIQUE")]
    pub technique: Option<String>,

    /// Largest output image, in pixels, a request may produce
    #[arg(long, env = "PIXELIFT_MAX_OUTPUT_PIXELS")]
    pub max_output_pixels: Option<usize>,

    /// Treatment of cells past the last anchor (sentinel, replicate)
    #[arg(long, env = "PIXELIFT_TRAILING_EDGE")]
    pub trailing_edge: Option<String>,

    /// Directory for saved originals and results
    #[arg(long, env = "PIXELIFT_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Save every original and upscaled photo to the temp directory
    #[arg(long, env = "PIXELIFT_PERSIST")]
    pub persist: bool,

    /// Directory of static files served for unmatched routes
    #[arg(long, env = "PIXELIFT_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Maximum request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    /// Directory of static files served as the router fallback
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// Upscaling defaults and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpscaleConfig {
    #[serde(default = "default_scale")]
    pub default_scale: u32,

    #[serde(default = "default_technique")]
    pub default_technique: String,

    /// Largest scale a request may ask for
    #[serde(default = "default_max_scale")]
    pub max_scale: u32,

    /// Largest output canvas (height * width) a request may produce
    #[serde(default = "default_max_output_pixels")]
    pub max_output_pixels: usize,

    #[serde(default = "default_trailing_edge")]
    pub trailing_edge: String,
}

/// Temp file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    #[serde(default)]
    pub persist: bool,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upscale configuration
    #[serde(default)]
    pub upscale: UpscaleConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from parsed arguments, reading the JSON file they name
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Config::default(),
        };
        config.apply_args(args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Override fields with any values given on the command line or in the environment
    fn apply_args(&mut self, args: Args) {
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if args.workers.is_some() {
            self.server.workers = args.workers;
        }
        if args.static_dir.is_some() {
            self.server.static_dir = args.static_dir;
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(scale) = args.scale {
            self.upscale.default_scale = scale;
        }
        if let Some(technique) = args.technique {
            self.upscale.default_technique = technique;
        }
        if let Some(max_output_pixels) = args.max_output_pixels {
            self.upscale.max_output_pixels = max_output_pixels;
        }
        if let Some(edge) = args.trailing_edge {
            self.upscale.trailing_edge = edge;
        }
        if let Some(temp_dir) = args.temp_dir {
            self.storage.temp_dir = temp_dir;
        }
        if args.persist {
            self.storage.persist = true;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate server host (must be a valid IP or hostname)
        if self.server.host.is_empty() {
            return Err(PixeliftError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(PixeliftError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.workers == Some(0) {
            return Err(PixeliftError::Config {
                message: "Worker count cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(PixeliftError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.upscale.max_scale == 0 {
            return Err(PixeliftError::Config {
                message: "Maximum scale cannot be 0".to_string(),
            });
        }

        if self.upscale.max_output_pixels == 0 {
            return Err(PixeliftError::Config {
                message: "Maximum output pixels cannot be 0".to_string(),
            });
        }

        if self.upscale.default_scale == 0 || self.upscale.default_scale > self.upscale.max_scale {
            return Err(PixeliftError::Config {
                message: format!(
                    "Default scale {} must be between 1 and {}",
                    self.upscale.default_scale, self.upscale.max_scale
                ),
            });
        }

        self.default_options().map(|_| ())
    }

    /// Upscale options applied to requests that leave fields unset
    pub fn default_options(&self) -> Result<UpscaleOptions> {
        let config_error = |e: PixeliftError| PixeliftError::Config {
            message: e.to_string(),
        };
        Ok(UpscaleOptions {
            scale: ScaleFactor::try_from(self.upscale.default_scale).map_err(config_error)?,
            technique: self
                .upscale
                .default_technique
                .parse::<Technique>()
                .map_err(config_error)?,
            trailing_edge: self
                .upscale
                .trailing_edge
                .parse::<TrailingEdge>()
                .map_err(config_error)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upscale: UpscaleConfig::default(),
            storage: StorageConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            body_limit_bytes: default_body_limit(),
            static_dir: None,
        }
    }
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self {
            default_scale: default_scale(),
            default_technique: default_technique(),
            max_scale: default_max_scale(),
            max_output_pixels: default_max_output_pixels(),
            trailing_edge: default_trailing_edge(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            persist: false,
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit() -> usize {
    16 * 1024 * 1024
}

fn default_scale() -> u32 {
    2
}

fn default_technique() -> String {
    "bilinear".to_string()
}

fn default_max_scale() -> u32 {
    8
}

fn default_max_output_pixels() -> usize {
    64 * 1024 * 1024
}

fn default_trailing_edge() -> String {
    "sentinel".to_string()
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("temp")
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.upscale.default_scale, 2);
        assert_eq!(config.upscale.default_technique, "bilinear");
        assert_eq!(config.upscale.max_output_pixels, 64 * 1024 * 1024);
        assert_eq!(config.storage.temp_dir, PathBuf::from("temp"));
        assert!(!config.storage.persist);
        assert_eq!(config.log_level, "info");

        let options = config.default_options().unwrap();
        assert_eq!(options.scale.get(), 2);
        assert_eq!(options.technique, Technique::Bilinear);
        assert_eq!(options.trailing_edge, TrailingEdge::Sentinel);
    }

    #[test]
    fn test_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixelift.json");
        std::fs::write(
            &path,
            r#"{"server": {"port": 9000}, "upscale": {"default_technique": "nearest", "default_scale": 3}}"#,
        )
        .unwrap();

        let args = Args {
            config: Some(path),
            scale: Some(4),
            persist: true,
            ..Default::default()
        };
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.upscale.default_technique, "nearest");
        assert_eq!(config.upscale.default_scale, 4);
        assert!(config.storage.persist);
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/pixelift.json")),
            ..Default::default()
        };
        assert!(matches!(Config::from_args(args), Err(PixeliftError::Io(_))));
    }

    #[test]
    fn test_config_validation() {
        // Valid config should pass
        let config = Config::default();
        assert!(config.validate().is_ok());

        // Test invalid host
        let mut config = Config::default();
        config.server.host = "".to_string();
        assert!(config.validate().is_err());

        // Test invalid port
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        // Test invalid log level
        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        // Test invalid technique
        let mut config = Config::default();
        config.upscale.default_technique = "bicubic".to_string();
        assert!(config.validate().is_err());

        // Test invalid trailing edge
        let mut config = Config::default();
        config.upscale.trailing_edge = "wrap".to_string();
        assert!(config.validate().is_err());

        // Test scale out of range
        let mut config = Config::default();
        config.upscale.default_scale = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upscale.default_scale = 9;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.upscale.max_output_pixels = 0;
        assert!(config.validate().is_err());
    }
}
