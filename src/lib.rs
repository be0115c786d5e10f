//! # recdoc
//!
//! Assembles meeting-minutes and partnership-justification records into a
//! render-ready document model.
//!
//! A record's plain fields, its labeled rich-text sections, approvers,
//! attachments and action items go in; an ordered list of styled paragraphs
//! and bordered, merged tables with embedded images comes out. Encoding that
//! model into an office file is left to a serializer downstream.
//!
//! ## Quick Start
//!
//! ```no_run
//! use recdoc::{load_input, render, Recdoc};
//!
//! fn main() -> recdoc::Result<()> {
//!     let input = load_input("minutes.json")?;
//!
//!     let result = Recdoc::new()
//!         .with_base_url("https://files.example.com/")
//!         .build(&input)?;
//!
//!     println!("{}", result.to_text(&render::TextOptions::default())?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lenient input**: editor JSON is normalized once at the boundary; unknown
//!   or malformed nodes degrade to plain paragraphs instead of failing
//! - **Two-phase images**: the tree walk registers image slots, fetches run
//!   concurrently with a bounded timeout, results are spliced back by position
//! - **Two approver layouts**: affiliation columns or role rows with merged labels
//! - **Style presets**: one immutable style object per document template
//! - **Inspection output**: JSON model and plain-text preview

pub mod build;
pub mod error;
pub mod fetch;
pub mod input;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use build::{ApproverLayout, AssembleOptions, Assembler, DocumentStyle};
pub use error::{Error, Result};
pub use fetch::{ImageFetcher, NoImageFetcher, StaticImageFetcher};
pub use input::{
    ActionItem, Approver, ApproverCategory, AttachmentSection, ContentNode, DocumentInput,
    DocumentKind, Record, Section,
};
pub use model::{
    Alignment, Block, Document, InlineContent, Metadata, Paragraph, Resource, Table, TableCell,
    TableRow, TextRun,
};
pub use render::{DocumentStats, JsonFormat, TextOptions};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Load a document input from a JSON file.
///
/// # Example
///
/// ```no_run
/// use recdoc::load_input;
///
/// let input = load_input("minutes.json").unwrap();
/// println!("Sections: {}", input.sections.len());
/// ```
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<DocumentInput> {
    let json = std::fs::read_to_string(path)?;
    DocumentInput::from_json_str(&json)
}

/// Assemble a document with default options.
///
/// Images are fetched over HTTP when the `http` feature is enabled.
pub fn assemble(input: &DocumentInput) -> Result<Document> {
    Ok(Recdoc::new().build(input)?.document)
}

/// Load a JSON input file and assemble it with default options.
///
/// # Example
///
/// ```no_run
/// use recdoc::assemble_file;
///
/// let doc = assemble_file("minutes.json").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn assemble_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    assemble(&load_input(path)?)
}

/// Builder for assembling documents.
///
/// # Example
///
/// ```no_run
/// use recdoc::{DocumentInput, DocumentKind, JsonFormat, Record, Recdoc};
/// use std::time::Duration;
///
/// let input = DocumentInput::new(DocumentKind::MeetingMinutes, Record::new("Kick-off"));
/// let json = Recdoc::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_concurrency(4)
///     .with_home("Acme Corp")
///     .build(&input)?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), recdoc::Error>(())
/// ```
pub struct Recdoc {
    style: Option<DocumentStyle>,
    layout: Option<ApproverLayout>,
    home: Option<String>,
    timeout: Duration,
    concurrency: usize,
    fetch_images: bool,
    base_url: Option<String>,
    fetcher: Option<Arc<dyn ImageFetcher>>,
}

impl Recdoc {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            style: None,
            layout: None,
            home: None,
            timeout: build::DEFAULT_FETCH_TIMEOUT,
            concurrency: build::DEFAULT_MAX_CONCURRENT_FETCHES,
            fetch_images: true,
            base_url: None,
            fetcher: None,
        }
    }

    /// Use a fixed style instead of the preset for the document kind.
    pub fn with_style(mut self, style: DocumentStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Use a fixed approver layout instead of the one for the document kind.
    pub fn with_layout(mut self, layout: ApproverLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sort this organisation first in affiliation layouts.
    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Set the per-image fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of concurrent image fetches.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Skip image fetching; every image is omitted.
    pub fn without_images(mut self) -> Self {
        self.fetch_images = false;
        self
    }

    /// Resolve relative image paths against `base`.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    /// Fetch images through a custom fetcher.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ImageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Assemble options for `kind`.
    pub fn options_for(&self, kind: DocumentKind) -> AssembleOptions {
        let mut options = AssembleOptions::new()
            .with_fetch_timeout(self.timeout)
            .with_max_concurrent_fetches(self.concurrency);
        if let Some(ref style) = self.style {
            options = options.with_style(style.clone());
        }
        let layout = self.layout.clone().or_else(|| match kind {
            DocumentKind::MeetingMinutes => Some(ApproverLayout::ByAffiliation {
                home: self.home.clone(),
            }),
            DocumentKind::Justification => None,
        });
        if let Some(layout) = layout {
            options = options.with_layout(layout);
        }
        options
    }

    /// Create the assembler for `kind`.
    pub fn assembler(&self, kind: DocumentKind) -> Result<Assembler> {
        Ok(Assembler::from_shared(self.image_fetcher()?).with_options(self.options_for(kind)))
    }

    /// Assemble `input`, blocking the current thread.
    pub fn build(&self, input: &DocumentInput) -> Result<RecdocResult> {
        let document = self.assembler(input.kind)?.assemble_blocking(input)?;
        Ok(RecdocResult { document })
    }

    /// Assemble `input` on the caller's runtime.
    pub async fn build_async(&self, input: &DocumentInput) -> Result<RecdocResult> {
        let document = self.assembler(input.kind)?.assemble(input).await?;
        Ok(RecdocResult { document })
    }

    /// Load a JSON input file and assemble it.
    pub fn build_file<P: AsRef<Path>>(&self, path: P) -> Result<RecdocResult> {
        self.build(&load_input(path)?)
    }

    fn image_fetcher(&self) -> Result<Arc<dyn ImageFetcher>> {
        if let Some(ref fetcher) = self.fetcher {
            return Ok(fetcher.clone());
        }
        if !self.fetch_images {
            return Ok(Arc::new(NoImageFetcher));
        }
        self.network_fetcher()
    }

    #[cfg(feature = "http")]
    fn network_fetcher(&self) -> Result<Arc<dyn ImageFetcher>> {
        let mut fetcher = fetch::HttpImageFetcher::new(self.timeout)?;
        if let Some(ref base) = self.base_url {
            fetcher = fetcher.with_base_url(base)?;
        }
        Ok(Arc::new(fetcher))
    }

    #[cfg(not(feature = "http"))]
    fn network_fetcher(&self) -> Result<Arc<dyn ImageFetcher>> {
        log::warn!("built without the http feature, images are omitted");
        Ok(Arc::new(NoImageFetcher))
    }
}

impl Default for Recdoc {
    fn default() -> Self {
        Self::new()
    }
}

/// An assembled document with its output conversions.
pub struct RecdocResult {
    /// The assembled document
    pub document: Document,
}

impl RecdocResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert to a plain-text preview.
    pub fn to_text(&self, options: &TextOptions) -> Result<String> {
        render::to_text(&self.document, options)
    }

    /// Get plain text without formatting.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Structural statistics.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::collect(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
