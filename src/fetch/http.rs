//! HTTP image fetcher backed by `reqwest`.

use super::ImageFetcher;
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Url};
use std::time::Duration;

/// Fetches images over HTTP(S) with a bounded per-request timeout.
///
/// Relative paths (as stored by the upload layer) are resolved against an
/// optional base URL.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
    base_url: Option<Url>,
}

impl HttpImageFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Resolve relative paths against `base`.
    pub fn with_base_url(mut self, base: &str) -> Result<Self> {
        let url = Url::parse(base)
            .map_err(|e| Error::HttpClient(format!("invalid base URL {}: {}", base, e)))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Turn a stored reference into an absolute HTTP(S) URL.
    fn resolve(&self, reference: &str) -> Option<Url> {
        let reference = reference.trim();
        let url = if reference.contains("://") {
            Url::parse(reference).ok()?
        } else {
            self.base_url.as_ref()?.join(reference).ok()?
        };
        matches!(url.scheme(), "http" | "https").then_some(url)
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let Some(resolved) = self.resolve(url) else {
            warn!("unsupported image reference: {}", url);
            return None;
        };

        let response = match self.client.get(resolved.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("failed to fetch image {}: {}", resolved, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("image {} returned HTTP {}", resolved, status);
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => {
                debug!("fetched {} bytes from {}", bytes.len(), resolved);
                Some(bytes.to_vec())
            }
            Err(e) => {
                warn!("failed to read image body {}: {}", resolved, e);
                None
            }
        }
    }
}
