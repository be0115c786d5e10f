//! Plain-text preview of an assembled document.

use crate::error::Result;
use crate::model::{Block, Document, InlineContent, ListInfo, NumberingScheme, Paragraph, Table};

use super::TextOptions;

/// Convert a document to a plain-text preview.
///
/// Paragraphs are separated by blank lines, list items carry their marker,
/// and every table row becomes one line of cells. Merged continuation cells
/// render empty.
pub fn to_text(doc: &Document, options: &TextOptions) -> Result<String> {
    let renderer = TextRenderer { options };
    let mut output = String::new();

    if options.include_frontmatter {
        output.push_str(&doc.metadata.to_yaml_frontmatter());
        output.push('\n');
    }

    for block in &doc.blocks {
        renderer.render_block(&mut output, block);
    }

    Ok(output.trim().to_string())
}

struct TextRenderer<'a> {
    options: &'a TextOptions,
}

impl TextRenderer<'_> {
    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Paragraph(p) => {
                if let Some(ref info) = p.style.list_info {
                    output.push_str(&self.list_marker(info));
                    output.push(' ');
                    output.push_str(&self.inline(p));
                    output.push('\n');
                } else {
                    if output.ends_with('\n') && !output.ends_with("\n\n") {
                        output.push('\n');
                    }
                    output.push_str(&self.inline(p));
                    output.push_str("\n\n");
                }
            }
            Block::Table(t) => {
                self.render_table(output, t);
                output.push('\n');
            }
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        for row in &table.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| {
                    cell.content
                        .iter()
                        .map(|b| self.cell_block(b))
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                        .join(" / ")
                })
                .collect();
            output.push_str(cells.join(&self.options.cell_separator).trim_end());
            output.push('\n');
        }
    }

    fn cell_block(&self, block: &Block) -> String {
        match block {
            Block::Paragraph(p) => {
                let text = match p.style.list_info {
                    Some(ref info) => format!("{} {}", self.list_marker(info), self.inline(p)),
                    None => self.inline(p),
                };
                text.replace('\n', " / ").trim().to_string()
            }
            // Nested tables flatten to their text
            Block::Table(t) => t.plain_text().replace(['\n', '\t'], " "),
        }
    }

    fn inline(&self, p: &Paragraph) -> String {
        p.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.clone(),
                InlineContent::LineBreak => "\n".to_string(),
                InlineContent::Image { resource_id, .. } if self.options.show_images => {
                    format!("[image: {}]", resource_id)
                }
                InlineContent::Image { .. } => String::new(),
            })
            .collect()
    }

    fn list_marker(&self, info: &ListInfo) -> String {
        let indent = "  ".repeat(info.level as usize);
        match info.scheme {
            NumberingScheme::Bullet => format!("{}{}", indent, self.options.list_marker),
            NumberingScheme::Ordinal => format!("{}{}.", indent, info.item_number.unwrap_or(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TableCell, TableRow};

    #[test]
    fn test_to_text() {
        let mut doc = Document::new();
        doc.blocks.push(Block::Paragraph(Paragraph::with_text("Hello, world!")));
        doc.blocks.push(Block::Paragraph(Paragraph::with_text("Second paragraph.")));

        let result = to_text(&doc, &TextOptions::default()).unwrap();
        assert_eq!(result, "Hello, world!\n\nSecond paragraph.");
    }

    #[test]
    fn test_lists_and_tables() {
        let mut doc = Document::new();
        doc.blocks.push(Paragraph::with_text("a").list(ListInfo::bullet(0)).into());
        doc.blocks.push(Paragraph::with_text("b").list(ListInfo::numbered(0, 2)).into());
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["1", "Label"]));
        table.add_row(TableRow::new(vec![TableCell::empty(), TableCell::text("x")]));
        doc.blocks.push(table.into());

        let result = to_text(&doc, &TextOptions::new().with_list_marker('*')).unwrap();
        assert_eq!(result, "* a\n2. b\n1 | Label\n | x");
    }

    #[test]
    fn test_image_markers() {
        let mut p = Paragraph::new();
        p.add_image("image1", 10.0, 10.0);
        let mut doc = Document::new();
        doc.blocks.push(p.into());

        assert_eq!(to_text(&doc, &TextOptions::default()).unwrap(), "[image: image1]");
        assert_eq!(to_text(&doc, &TextOptions::new().with_images(false)).unwrap(), "");
    }

    #[test]
    fn test_frontmatter() {
        let mut doc = Document::new();
        doc.metadata.title = "Minutes".to_string();
        doc.blocks.push(Paragraph::with_text("body").into());

        let result = to_text(&doc, &TextOptions::new().with_frontmatter(true)).unwrap();
        assert!(result.starts_with("---\n"));
        assert!(result.contains("title: \"Minutes\""));
        assert!(result.ends_with("body"));
    }
}
