//! Blocking HTTP GET
//!
//! Used for downloading gem archives and for fetching deployed pages.

use crate::error::{GemstageError, Result};

/// Something that can GET a URL
pub trait HttpClient {
    /// Fetch `url`; non-success statuses are errors
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetch `url` as text
    fn get_text(&self, url: &str) -> Result<String> {
        let bytes = self.get_bytes(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// `reqwest` blocking client with default timeouts
pub struct BlockingHttpClient {
    client: reqwest::blocking::Client,
}

impl BlockingHttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gemstage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GemstageError::HttpRequestFailed {
                url: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

fn request_failed(url: &str, err: &reqwest::Error) -> GemstageError {
    GemstageError::HttpRequestFailed {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

impl HttpClient for BlockingHttpClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| request_failed(url, &e))?;

        let bytes = response.bytes().map_err(|e| request_failed(url, &e))?;
        Ok(bytes.to_vec())
    }
}
