//! Image fetching.
//!
//! Fetchers never fail: any transport error, bad status, or timeout is
//! logged and reported as "absent", and callers omit the image.
//!
//! # Example
//!
//! ```
//! use recdoc::fetch::{ImageFetcher, StaticImageFetcher};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let fetcher = StaticImageFetcher::new().with_image("https://cdn/a.png", vec![1, 2, 3]);
//! assert_eq!(fetcher.fetch("https://cdn/a.png").await, Some(vec![1, 2, 3]));
//! assert_eq!(fetcher.fetch("https://cdn/missing.png").await, None);
//! # });
//! ```

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpImageFetcher;

use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source of image bytes for URLs found in the content tree and attachments.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the bytes behind `url`, or `None` if they cannot be retrieved.
    async fn fetch(&self, url: &str) -> Option<Vec<u8>>;
}

#[async_trait]
impl<T: ImageFetcher + ?Sized> ImageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        (**self).fetch(url).await
    }
}

/// Fetcher that never returns an image. Renders text-only documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImageFetcher;

#[async_trait]
impl ImageFetcher for NoImageFetcher {
    async fn fetch(&self, _url: &str) -> Option<Vec<u8>> {
        None
    }
}

/// In-memory fetcher serving a fixed URL → bytes table.
///
/// Deterministic stand-in for the network; counts calls and can delay
/// individual URLs to exercise completion order.
#[derive(Debug, Default)]
pub struct StaticImageFetcher {
    images: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl StaticImageFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `data` for `url`.
    pub fn with_image(mut self, url: impl Into<String>, data: Vec<u8>) -> Self {
        self.images.insert(url.into(), data);
        self
    }

    /// Delay the response for `url`.
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// Number of fetches performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for StaticImageFetcher {
    async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        let found = self.images.get(url).cloned();
        if found.is_none() {
            warn!("image not found: {}", url);
        }
        found
    }
}
