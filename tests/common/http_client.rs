//! HTTP client utilities for testing.
//!
//! This module provides helper functions for making HTTP requests to the pixelift server during tests.

use reqwest::{Client, Response, StatusCode, Url};
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Upscaling a photo takes longer than a plain GET
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a default test client
pub fn create_test_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to build test HTTP client")
}

/// Build a URL for a pixelift server endpoint
pub fn build_url(addr: &SocketAddr, path: &str) -> Url {
    format!("http://{}{}", addr, path)
        .parse()
        .expect("Failed to parse URL")
}

/// Make a GET request to the pixelift server
pub async fn get(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    let url = build_url(addr, path);
    Ok(client.get(url).send().await?)
}

/// POST a JSON body to the pixelift server
pub async fn post_json(
    addr: &SocketAddr,
    path: &str,
    body: &serde_json::Value,
) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    let url = build_url(addr, path);
    Ok(client.post(url).json(body).send().await?)
}

/// POST a capture request and return the downloaded image bytes
pub async fn post_capture(
    addr: &SocketAddr,
    body: &serde_json::Value,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let response = post_json(addr, "/capture", body).await?;

    if response.status() != StatusCode::OK {
        return Err(format!(
            "Unexpected status code: {}, body: {:?}",
            response.status(),
            response.text().await
        )
        .into());
    }

    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let addr: SocketAddr = ([127, 0, 0, 1], 8000).into();
        let url = build_url(&addr, "/capture");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/capture");
    }
}
