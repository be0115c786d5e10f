//! Assembly options.

use super::approvers::ApproverLayout;
use super::style::DocumentStyle;
use std::time::Duration;

/// Default bound on a single image fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of image fetches in flight.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Options controlling document assembly.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Style preset; `None` picks the preset for the document kind
    pub style: Option<DocumentStyle>,

    /// Approver layout; `None` picks the layout for the document kind
    pub layout: Option<ApproverLayout>,

    /// Maximum wait for one image
    pub fetch_timeout: Duration,

    /// Maximum image fetches in flight
    pub max_concurrent_fetches: usize,
}

impl AssembleOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed style.
    pub fn with_style(mut self, style: DocumentStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Use a fixed approver layout.
    pub fn with_layout(mut self, layout: ApproverLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the per-image timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the fetch concurrency (at least 1).
    pub fn with_max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n.max(1);
        self
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            style: None,
            layout: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}
