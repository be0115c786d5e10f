//! Document model types for the assembled output.
//!
//! This module defines the render-ready document object model handed to a
//! binary office-document serializer. It is independent of any file format
//! and holds no unresolved references: every image is already embedded.

mod block;
mod document;
mod paragraph;
mod resource;
mod table;

pub use block::Block;
pub use document::{Document, Metadata, PageSetup};
pub use paragraph::{
    Alignment, InlineContent, ListInfo, NumberingScheme, Paragraph, ParagraphStyle, TextRun,
    TextStyle,
};
pub use resource::{Resource, ResourceType};
pub use table::{
    Border, BorderStyle, CellBorders, Table, TableCell, TableRow, VerticalAlignment,
    VerticalMerge,
};
