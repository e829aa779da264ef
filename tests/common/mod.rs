//! Common test utilities for pixelift.
//!
//! This module provides shared utilities for testing the pixelift server.

pub mod http_client;
pub mod image_utils;
pub mod test_data;
