//! Section table: one row per labeled section.

use super::content::{ContentRenderer, RenderContext};
use super::draft::{Draft, DraftCell, DraftRow, DraftTable, ImageRequests};
use super::style::DocumentStyle;
use crate::input::Section;
use crate::model::{Alignment, Paragraph, TableCell};
use log::debug;

/// Builds the three-column (index, label, content) section table.
pub struct SectionTableBuilder<'a> {
    style: &'a DocumentStyle,
}

impl<'a> SectionTableBuilder<'a> {
    /// Create a builder using `style`.
    pub fn new(style: &'a DocumentStyle) -> Self {
        Self { style }
    }

    /// One row per section, in input order.
    pub fn rows(&self, sections: &[Section], requests: &mut ImageRequests) -> Vec<DraftRow> {
        sections
            .iter()
            .enumerate()
            .map(|(i, section)| self.row(i + 1, section, requests))
            .collect()
    }

    /// The whole table, or `None` when there are no sections.
    pub fn build(&self, sections: &[Section], requests: &mut ImageRequests) -> Option<DraftTable> {
        if sections.is_empty() {
            return None;
        }
        Some(DraftTable::new(self.rows(sections, requests)).widths(self.style.section_widths.to_vec()))
    }

    fn row(&self, index: usize, section: &Section, requests: &mut ImageRequests) -> DraftRow {
        let borders = self.style.cell_borders();

        let index_cell = TableCell::paragraph(
            Paragraph::with_text(index.to_string()).align(Alignment::Center),
        )
        .bordered(borders.clone());
        let label_cell = TableCell::text(section.label.as_str()).bordered(borders.clone());

        let mut renderer = ContentRenderer::new(self.style, requests);
        let mut content = Vec::new();
        for node in section.content.top_level() {
            if node.is_empty_paragraph() {
                debug!("section {}: skipping empty paragraph", index);
                continue;
            }
            content.extend(renderer.render(node, RenderContext::default()));
        }
        if content.is_empty() {
            content.push(Draft::from(Paragraph::empty()));
        }

        DraftRow::new(vec![
            index_cell.into(),
            label_cell.into(),
            DraftCell::new(content, TableCell::empty().bordered(borders)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::draft::{resolve_all, FetchedImages};
    use crate::input::ContentNode;
    use crate::model::Block;

    fn build(sections: &[Section]) -> crate::model::Table {
        let style = DocumentStyle::default();
        let mut requests = ImageRequests::new();
        let table = SectionTableBuilder::new(&style)
            .build(sections, &mut requests)
            .unwrap();
        let blocks = resolve_all(vec![table.into()], &FetchedImages::default());
        blocks[0].as_table().unwrap().clone()
    }

    #[test]
    fn test_one_row_per_section() {
        let sections: Vec<_> = (0..4)
            .map(|i| Section::new(format!("S{}", i), ContentNode::empty_doc()))
            .collect();
        let table = build(&sections);

        assert_eq!(table.row_count(), 4);
        for (i, row) in table.rows.iter().enumerate() {
            assert_eq!(row.cells.len(), 3);
            assert_eq!(row.cells[0].plain_text(), (i + 1).to_string());
        }
        assert_eq!(table.column_widths, Some(vec![8.0, 22.0, 70.0]));
    }

    #[test]
    fn test_background_scenario() {
        let doc = ContentNode::Doc {
            content: vec![ContentNode::paragraph("Hello")],
        };
        let table = build(&[Section::new("Background", doc)]);
        let row = &table.rows[0];

        assert_eq!(row.cells[0].plain_text(), "1");
        assert_eq!(row.cells[1].plain_text(), "Background");
        assert_eq!(row.cells[2].content.len(), 1);
        let p = row.cells[2].content[0].as_paragraph().unwrap();
        assert_eq!(p.plain_text(), "Hello");
        assert_eq!(p.style.alignment, Alignment::Justify);
    }

    #[test]
    fn test_empty_paragraphs_are_elided() {
        let empty = ContentNode::Paragraph {
            align: None,
            content: Vec::new(),
        };
        let doc = ContentNode::Doc {
            content: vec![
                empty.clone(),
                ContentNode::paragraph("a"),
                empty.clone(),
                ContentNode::paragraph("b"),
                empty,
            ],
        };
        let table = build(&[Section::new("x", doc)]);
        let texts: Vec<_> = table.rows[0].cells[2]
            .content
            .iter()
            .map(Block::plain_text)
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_section_gets_one_paragraph() {
        let doc = ContentNode::Doc {
            content: vec![ContentNode::Paragraph {
                align: None,
                content: Vec::new(),
            }],
        };
        let table = build(&[Section::new("x", doc)]);
        let cell = &table.rows[0].cells[2];
        assert_eq!(cell.content.len(), 1);
        assert!(cell.is_empty());
    }

    #[test]
    fn test_no_sections_no_table() {
        let style = DocumentStyle::default();
        let mut requests = ImageRequests::new();
        assert!(SectionTableBuilder::new(&style)
            .build(&[], &mut requests)
            .is_none());
    }
}
