//! Two-phase image resolution.
//!
//! Builders walk their input synchronously and produce [`Draft`] trees in
//! which every image is a numbered slot registered in [`ImageRequests`].
//! [`fetch_all`] then retrieves all slots concurrently, and [`resolve_all`]
//! splices the results back by position. A block's place in the output is
//! fixed during the walk, so fetch completion order never affects layout.

use super::style::ImageSize;
use crate::fetch::ImageFetcher;
use crate::model::{Alignment, Block, Paragraph, Resource, Table, TableCell, TableRow};
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// A block whose images may still be unresolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    /// A finished block
    Block(Block),

    /// An image paragraph waiting for its fetch
    Image(ImageSlot),

    /// A table whose cells may contain drafts
    Table(DraftTable),
}

impl From<Paragraph> for Draft {
    fn from(p: Paragraph) -> Self {
        Draft::Block(Block::Paragraph(p))
    }
}

impl From<DraftTable> for Draft {
    fn from(t: DraftTable) -> Self {
        Draft::Table(t)
    }
}

/// Placeholder for an image paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSlot {
    /// Index into [`ImageRequests`]
    pub slot: usize,
    /// Paragraph alignment
    pub alignment: Alignment,
    /// Fixed display size
    pub size: ImageSize,
}

/// A table under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftTable {
    /// Rows
    pub rows: Vec<DraftRow>,
    /// Number of header rows
    pub header_rows: u8,
    /// Column widths as percentages
    pub column_widths: Option<Vec<f32>>,
    /// Table alignment
    pub alignment: Alignment,
}

impl DraftTable {
    /// Create a table from rows.
    pub fn new(rows: Vec<DraftRow>) -> Self {
        Self {
            rows,
            header_rows: 0,
            column_widths: None,
            alignment: Alignment::Left,
        }
    }

    /// Set column widths and return self.
    pub fn widths(mut self, widths: Vec<f32>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    /// Set header row count and return self.
    pub fn header_rows(mut self, count: u8) -> Self {
        self.header_rows = count;
        self
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl From<Table> for DraftTable {
    fn from(table: Table) -> Self {
        Self {
            rows: table
                .rows
                .into_iter()
                .map(|row| DraftRow {
                    is_header: row.is_header,
                    cells: row.cells.into_iter().map(DraftCell::from).collect(),
                })
                .collect(),
            header_rows: table.header_rows,
            column_widths: table.column_widths,
            alignment: table.alignment,
        }
    }
}

/// A table row under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    /// Cells
    pub cells: Vec<DraftCell>,
    /// Whether this is a header row
    pub is_header: bool,
}

impl DraftRow {
    /// Create a body row.
    pub fn new(cells: Vec<DraftCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }
}

/// A table cell under construction.
///
/// `shell` carries the cell properties; its content is replaced by the
/// resolved drafts.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftCell {
    /// Cell content
    pub content: Vec<Draft>,
    /// Cell properties
    pub shell: TableCell,
}

impl DraftCell {
    /// Create a cell with drafts and properties.
    pub fn new(content: Vec<Draft>, shell: TableCell) -> Self {
        Self { content, shell }
    }
}

impl From<TableCell> for DraftCell {
    fn from(mut cell: TableCell) -> Self {
        let content = std::mem::take(&mut cell.content)
            .into_iter()
            .map(Draft::Block)
            .collect();
        Self {
            content,
            shell: cell,
        }
    }
}

/// URLs requested during the walk, one slot per distinct URL.
#[derive(Debug, Clone, Default)]
pub struct ImageRequests {
    urls: Vec<String>,
    index: HashMap<String, usize>,
}

impl ImageRequests {
    /// Create an empty request list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `url` and return its slot. Repeated URLs share a slot.
    pub fn request(&mut self, url: &str) -> usize {
        if let Some(&slot) = self.index.get(url) {
            return slot;
        }
        let slot = self.urls.len();
        self.urls.push(url.to_string());
        self.index.insert(url.to_string(), slot);
        slot
    }

    /// Requested URLs in slot order.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Number of distinct URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Check if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Outcome of fetching every slot.
#[derive(Debug, Clone, Default)]
pub struct FetchedImages {
    slots: Vec<Option<Resource>>,
}

impl FetchedImages {
    /// Build from per-slot results.
    pub fn from_slots(slots: Vec<Option<Resource>>) -> Self {
        Self { slots }
    }

    /// Resource ID used for a slot.
    pub fn resource_id(slot: usize) -> String {
        format!("image{}", slot + 1)
    }

    /// Check if a slot resolved to an image.
    pub fn is_available(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    /// Number of resolved images.
    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Number of failed slots.
    pub fn missing_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Resolved images keyed by resource ID.
    pub fn into_resources(self) -> BTreeMap<String, Resource> {
        self.slots
            .into_iter()
            .enumerate()
            .filter_map(|(slot, res)| res.map(|r| (Self::resource_id(slot), r)))
            .collect()
    }
}

/// Fetch every requested URL, at most `concurrency` at a time, each bounded
/// by `timeout`. Results come back in slot order.
pub async fn fetch_all(
    requests: &ImageRequests,
    fetcher: &dyn ImageFetcher,
    timeout: Duration,
    concurrency: usize,
) -> FetchedImages {
    if requests.is_empty() {
        return FetchedImages::default();
    }

    let slots = stream::iter(requests.urls())
        .map(|url| fetch_one(fetcher, url, timeout))
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let fetched = FetchedImages::from_slots(slots);
    debug!(
        "fetched {} of {} images",
        fetched.available_count(),
        requests.len()
    );
    fetched
}

async fn fetch_one(fetcher: &dyn ImageFetcher, url: &str, timeout: Duration) -> Option<Resource> {
    let bytes = match tokio::time::timeout(timeout, fetcher.fetch(url)).await {
        Ok(bytes) => bytes?,
        Err(_) => {
            warn!("image fetch timed out after {:?}: {}", timeout, url);
            return None;
        }
    };

    match Resource::sniff_image(bytes) {
        Some(resource) => Some(resource.with_source_url(url)),
        None => {
            warn!("fetched data is not a supported image: {}", url);
            None
        }
    }
}

/// Resolve drafts into blocks, dropping images whose fetch failed.
pub fn resolve_all(drafts: Vec<Draft>, images: &FetchedImages) -> Vec<Block> {
    drafts
        .into_iter()
        .filter_map(|draft| resolve(draft, images))
        .collect()
}

fn resolve(draft: Draft, images: &FetchedImages) -> Option<Block> {
    match draft {
        Draft::Block(block) => Some(block),
        Draft::Image(image) => {
            if !images.is_available(image.slot) {
                return None;
            }
            let mut p = Paragraph::new().align(image.alignment);
            p.add_image(
                FetchedImages::resource_id(image.slot),
                image.size.width,
                image.size.height,
            );
            Some(Block::Paragraph(p))
        }
        Draft::Table(table) => Some(Block::Table(resolve_table(table, images))),
    }
}

fn resolve_table(table: DraftTable, images: &FetchedImages) -> Table {
    let mut out = Table::with_header(table.header_rows).align(table.alignment);
    out.column_widths = table.column_widths;
    for row in table.rows {
        let cells = row
            .cells
            .into_iter()
            .map(|cell| {
                let mut shell = cell.shell;
                shell.content = resolve_all(cell.content, images);
                if shell.content.is_empty() {
                    shell.content.push(Block::Paragraph(Paragraph::empty()));
                }
                shell
            })
            .collect();
        out.add_row(if row.is_header {
            TableRow::header(cells)
        } else {
            TableRow::new(cells)
        });
    }
    out
}
