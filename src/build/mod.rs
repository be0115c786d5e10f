//! Assembly of input records into the document model.
//!
//! The pipeline runs in two phases. A synchronous walk turns the record, its
//! sections, approvers, attachments and action items into [`Draft`] blocks,
//! registering every image URL it meets. The images are then fetched
//! concurrently and spliced back in by position.

mod actions;
mod approvers;
mod assembler;
mod attachments;
mod content;
mod draft;
mod header;
mod options;
mod sections;
mod style;

pub use actions::action_table;
pub use approvers::{ApproverLayout, ApproverTableBuilder};
pub use assembler::{Assembler, DocumentPlan};
pub use attachments::AttachmentBlockBuilder;
pub use content::{resolve_alignment, ContentRenderer, RenderContext};
pub use draft::{
    fetch_all, resolve_all, Draft, DraftCell, DraftRow, DraftTable, FetchedImages, ImageRequests,
    ImageSlot,
};
pub use header::HeaderBuilder;
pub use options::{AssembleOptions, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONCURRENT_FETCHES};
pub use sections::SectionTableBuilder;
pub use style::{DocumentStyle, ImageSize, Labels};
