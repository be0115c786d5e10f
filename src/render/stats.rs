//! Structural statistics of an assembled document.

use crate::model::{Block, Document, InlineContent, Table};
use serde::{Deserialize, Serialize};

/// Counts gathered by walking every block, including blocks nested in tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of plain paragraphs
    pub paragraph_count: u32,

    /// Number of list-item paragraphs
    pub list_item_count: u32,

    /// Number of tables, nested ones included
    pub table_count: u32,

    /// Number of table rows
    pub row_count: u32,

    /// Number of horizontally or vertically merged cells
    pub merged_cell_count: u32,

    /// Number of embedded image references
    pub image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `doc` and count its content.
    pub fn collect(doc: &Document) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.add_block(block);
        }
        stats
    }

    fn add_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(p) => {
                if p.is_list_item() {
                    self.list_item_count += 1;
                } else {
                    self.paragraph_count += 1;
                }
                for item in &p.content {
                    match item {
                        InlineContent::Text(run) => self.count_text(&run.text),
                        InlineContent::Image { .. } => self.image_count += 1,
                        InlineContent::LineBreak => {}
                    }
                }
            }
            Block::Table(t) => self.add_table(t),
        }
    }

    fn add_table(&mut self, table: &Table) {
        self.table_count += 1;
        self.row_count += table.rows.len() as u32;
        for cell in table.rows.iter().flat_map(|r| &r.cells) {
            if cell.is_merged() {
                self.merged_cell_count += 1;
            }
            for block in &cell.content {
                self.add_block(block);
            }
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
