//! Document-level types.

use super::{Block, Resource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fully resolved document, ready for binary serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, kind, counts)
    pub metadata: Metadata,

    /// Page geometry
    pub page: PageSetup,

    /// Body blocks in display order
    pub blocks: Vec<Block>,

    /// Embedded resources (images) keyed by ID
    pub resources: BTreeMap<String, Resource>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            page: PageSetup::default(),
            blocks: Vec::new(),
            resources: BTreeMap::new(),
        }
    }

    /// Get the number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document kind label (e.g. "meeting_minutes")
    pub kind: String,

    /// Document title
    pub title: String,

    /// Record date
    pub date: Option<NaiveDate>,

    /// Number of content sections
    pub section_count: u32,

    /// Number of approvers
    pub approver_count: u32,

    /// Number of embedded images
    pub image_count: u32,

    /// Number of image references that could not be resolved
    pub missing_image_count: u32,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        lines.push(format!("kind: \"{}\"", escape_yaml(&self.kind)));
        lines.push(format!("title: \"{}\"", escape_yaml(&self.title)));
        if let Some(ref date) = self.date {
            lines.push(format!("date: {}", date.format("%Y-%m-%d")));
        }
        lines.push(format!("sections: {}", self.section_count));
        lines.push(format!("approvers: {}", self.approver_count));
        lines.push(format!("images: {}", self.image_count));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Page geometry in points (1 point = 1/72 inch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Top margin
    pub margin_top: f32,

    /// Bottom margin
    pub margin_bottom: f32,

    /// Left margin
    pub margin_left: f32,

    /// Right margin
    pub margin_right: f32,
}

impl PageSetup {
    /// A4 portrait (210 x 297 mm) with uniform margins.
    pub fn a4(margin: f32) -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        }
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4(56.7) // 2 cm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert_eq!(doc.block_count(), 0);
        assert!(doc.resources.is_empty());
    }

    #[test]
    fn test_plain_text_joins_blocks() {
        let mut doc = Document::new();
        doc.blocks.push(Paragraph::with_text("One").into());
        doc.blocks.push(Paragraph::with_text("Two").into());
        assert_eq!(doc.plain_text(), "One\n\nTwo");
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            kind: "meeting_minutes".to_string(),
            title: "Weekly \"sync\"".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            section_count: 2,
            ..Default::default()
        };

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.contains("title: \"Weekly \\\"sync\\\"\""));
        assert!(yaml.contains("date: 2024-03-05"));
        assert!(yaml.contains("sections: 2"));
    }

    #[test]
    fn test_page_setup() {
        let page = PageSetup::a4(50.0);
        assert_eq!((page.width, page.height), (595.0, 842.0));
        assert_eq!(page.margin_left, 50.0);
    }
}
