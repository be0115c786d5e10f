//! Input types consumed by the assembler.
//!
//! The surrounding CRUD layer resolves foreign keys and hands over plain
//! values; nothing here touches storage.

mod content;
mod record;

pub use content::{ContentNode, Marks};
pub use record::{
    ActionItem, Approver, ApproverCategory, AttachmentFile, AttachmentSection, DocumentInput,
    DocumentKind, Record, Section,
};
