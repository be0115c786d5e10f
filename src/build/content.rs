//! Content node renderer: editor tree → drafts.

use super::draft::{Draft, DraftCell, DraftRow, DraftTable, ImageRequests, ImageSlot};
use super::style::DocumentStyle;
use crate::input::{ContentNode, Marks};
use crate::model::{
    Alignment, InlineContent, ListInfo, NumberingScheme, Paragraph, TableCell, TextRun, TextStyle,
};
use log::debug;

/// Alignment policy for editor content: anything but an explicit
/// left/center/right is justified.
pub fn resolve_alignment(align: Option<Alignment>) -> Alignment {
    align.unwrap_or(Alignment::Justify)
}

/// Per-call rendering flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Inside a table header cell: all text renders bold
    pub header: bool,
}

impl RenderContext {
    /// Context for table header cells.
    pub fn header() -> Self {
        Self { header: true }
    }
}

/// Recursive renderer for one content tree.
///
/// Images are not fetched here; each one is registered with the shared
/// [`ImageRequests`] and left as a slot.
pub struct ContentRenderer<'a> {
    style: &'a DocumentStyle,
    requests: &'a mut ImageRequests,
}

impl<'a> ContentRenderer<'a> {
    /// Create a renderer registering images into `requests`.
    pub fn new(style: &'a DocumentStyle, requests: &'a mut ImageRequests) -> Self {
        Self { style, requests }
    }

    /// Render one node into zero, one, or many drafts.
    pub fn render(&mut self, node: &ContentNode, ctx: RenderContext) -> Vec<Draft> {
        match node {
            // Text is only ever consumed by its enclosing paragraph
            ContentNode::Text { .. } => Vec::new(),
            ContentNode::Paragraph { align, content } => {
                vec![self.paragraph(content, *align, ctx).into()]
            }
            ContentNode::BulletList { items } => self.list(items, NumberingScheme::Bullet, ctx),
            ContentNode::OrderedList { items } => self.list(items, NumberingScheme::Ordinal, ctx),
            ContentNode::Image { src, align } => match src {
                Some(url) => vec![self.image(url, resolve_alignment(*align))],
                None => {
                    debug!("image node without src");
                    Vec::new()
                }
            },
            ContentNode::Table { align, rows } => self
                .table(rows, resolve_alignment(*align), ctx)
                .map(|t| vec![Draft::Table(t)])
                .unwrap_or_default(),
            // Structural nodes found out of place: keep what they contain
            ContentNode::Doc { content }
            | ContentNode::ListItem { content }
            | ContentNode::TableCell { content, .. } => self.render_all(content, ctx),
            ContentNode::TableRow { cells } => self.render_all(cells, ctx),
            ContentNode::Other { kind, content } => {
                debug!("rendering unknown node type {:?} as plain paragraph", kind);
                if content.is_empty() {
                    vec![Paragraph::empty().align(Alignment::Justify).into()]
                } else {
                    let mut runs = Vec::new();
                    collect_text(content, ctx, &mut runs);
                    vec![Paragraph::from_runs(runs).align(Alignment::Justify).into()]
                }
            }
        }
    }

    /// Render a sequence of sibling nodes.
    pub fn render_all(&mut self, nodes: &[ContentNode], ctx: RenderContext) -> Vec<Draft> {
        nodes.iter().flat_map(|n| self.render(n, ctx)).collect()
    }

    fn paragraph(
        &self,
        content: &[ContentNode],
        align: Option<Alignment>,
        ctx: RenderContext,
    ) -> Paragraph {
        let mut p = Paragraph::new().align(resolve_alignment(align));
        let mut has_text = false;
        for child in content {
            match child {
                ContentNode::Text { text, marks } => {
                    p.add_run(styled_run(text, *marks, ctx));
                    has_text = true;
                }
                ContentNode::Other { kind, .. } if kind == "hardBreak" => p.add_line_break(),
                _ => {}
            }
        }
        if !has_text {
            p.content
                .insert(0, InlineContent::Text(styled_run("", Marks::default(), ctx)));
        }
        p
    }

    fn list(
        &mut self,
        items: &[ContentNode],
        scheme: NumberingScheme,
        ctx: RenderContext,
    ) -> Vec<Draft> {
        let mut out = Vec::new();
        let mut number = 0u32;
        for item in items {
            let ContentNode::ListItem { content } = item else {
                debug!("skipping {} inside list", item.kind_name());
                continue;
            };
            for child in content {
                match child {
                    ContentNode::Paragraph { align, content } => {
                        number += 1;
                        let info = match scheme {
                            NumberingScheme::Bullet => ListInfo::bullet(self.style.list_level),
                            NumberingScheme::Ordinal => {
                                ListInfo::numbered(self.style.list_level, number)
                            }
                        };
                        out.push(self.paragraph(content, *align, ctx).list(info).into());
                    }
                    // Single level only: nested lists are flattened in place
                    ContentNode::BulletList { items } => {
                        out.extend(self.list(items, NumberingScheme::Bullet, ctx))
                    }
                    ContentNode::OrderedList { items } => {
                        out.extend(self.list(items, NumberingScheme::Ordinal, ctx))
                    }
                    other => out.extend(self.render(other, ctx)),
                }
            }
        }
        out
    }

    fn image(&mut self, url: &str, alignment: Alignment) -> Draft {
        Draft::Image(ImageSlot {
            slot: self.requests.request(url),
            alignment,
            size: self.style.content_image,
        })
    }

    fn table(
        &mut self,
        rows: &[ContentNode],
        alignment: Alignment,
        ctx: RenderContext,
    ) -> Option<DraftTable> {
        let mut out_rows = Vec::new();
        for row in rows {
            let ContentNode::TableRow { cells } = row else {
                debug!("skipping {} inside table", row.kind_name());
                continue;
            };
            let mut out_cells = Vec::new();
            for cell in cells {
                let ContentNode::TableCell { header, content } = cell else {
                    debug!("skipping {} inside table row", cell.kind_name());
                    continue;
                };
                let cell_ctx = RenderContext {
                    header: *header || ctx.header,
                };
                let mut shell = TableCell::empty().bordered(self.style.cell_borders());
                if *header {
                    shell = shell.shade(self.style.header_shading.clone());
                }
                out_cells.push(DraftCell::new(self.render_all(content, cell_ctx), shell));
            }
            if !out_cells.is_empty() {
                out_rows.push(DraftRow::new(out_cells));
            }
        }

        if out_rows.is_empty() {
            debug!("table without rows renders nothing");
            return None;
        }

        // Ragged editor rows are padded so every row spans the same grid
        let columns = out_rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        for row in &mut out_rows {
            while row.cells.len() < columns {
                row.cells.push(DraftCell::new(
                    Vec::new(),
                    TableCell::empty().bordered(self.style.cell_borders()),
                ));
            }
        }

        let share = 100.0 / columns as f32;
        Some(
            DraftTable::new(out_rows)
                .widths(vec![share; columns])
                .align(alignment),
        )
    }
}

fn styled_run(text: &str, marks: Marks, ctx: RenderContext) -> TextRun {
    TextRun {
        text: text.to_string(),
        style: TextStyle {
            bold: ctx.header || marks.bold,
            italic: marks.italic,
            font_size: None,
        },
    }
}

fn collect_text(nodes: &[ContentNode], ctx: RenderContext, runs: &mut Vec<TextRun>) {
    for node in nodes {
        match node {
            ContentNode::Text { text, marks } => runs.push(styled_run(text, *marks, ctx)),
            other => collect_text(other.children(), ctx, runs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::draft::{resolve_all, FetchedImages};
    use crate::model::{Block, Resource};
    use serde_json::json;

    fn render_json(value: serde_json::Value) -> (Vec<Draft>, ImageRequests) {
        let style = DocumentStyle::default();
        let mut requests = ImageRequests::new();
        let node = ContentNode::from_value(&value);
        let drafts = ContentRenderer::new(&style, &mut requests).render(&node, RenderContext::default());
        (drafts, requests)
    }

    fn blocks(value: serde_json::Value) -> Vec<Block> {
        let (drafts, _) = render_json(value);
        resolve_all(drafts, &FetchedImages::default())
    }

    fn paragraph(block: &Block) -> &Paragraph {
        block.as_paragraph().expect("paragraph")
    }

    #[test]
    fn test_paragraph_without_text_has_one_empty_run() {
        let out = blocks(json!({ "type": "paragraph" }));
        assert_eq!(out.len(), 1);
        let runs: Vec<_> = paragraph(&out[0]).runs().collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "");
    }

    #[test]
    fn test_alignment_defaults_to_justify() {
        let cases = [
            (json!(null), Alignment::Justify),
            (json!("justify"), Alignment::Justify),
            (json!("left"), Alignment::Left),
            (json!("right"), Alignment::Right),
            (json!("center"), Alignment::Center),
            (json!("middle"), Alignment::Justify),
        ];
        for (align, expected) in cases {
            let out = blocks(json!({ "type": "paragraph", "attrs": { "align": align } }));
            assert_eq!(paragraph(&out[0]).style.alignment, expected, "align {}", align);
        }
    }

    #[test]
    fn test_marks_map_to_style() {
        let out = blocks(json!({
            "type": "paragraph",
            "content": [
                { "type": "text", "text": "b", "marks": [{ "type": "bold" }] },
                { "type": "text", "text": "i", "marks": [{ "type": "italic" }] },
                { "type": "text", "text": "p" }
            ]
        }));
        let runs: Vec<_> = paragraph(&out[0]).runs().collect();
        assert!(runs[0].style.bold && !runs[0].style.italic);
        assert!(!runs[1].style.bold && runs[1].style.italic);
        assert!(!runs[2].style.has_styling());
    }

    #[test]
    fn test_hard_break_becomes_line_break() {
        let out = blocks(json!({
            "type": "paragraph",
            "content": [
                { "type": "text", "text": "a" },
                { "type": "hardBreak" },
                { "type": "text", "text": "b" }
            ]
        }));
        assert_eq!(out[0].plain_text(), "a\nb");
    }

    #[test]
    fn test_lists_reference_scheme() {
        for (kind, scheme) in [
            ("bulletList", NumberingScheme::Bullet),
            ("orderedList", NumberingScheme::Ordinal),
        ] {
            let item = json!({ "type": "listItem", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "x" }] }] });
            let out = blocks(json!({ "type": kind, "content": [item.clone(), item.clone(), item] }));
            assert_eq!(out.len(), 3);
            for (i, block) in out.iter().enumerate() {
                let info = paragraph(block).style.list_info.as_ref().unwrap();
                assert_eq!(info.scheme, scheme);
                assert_eq!(info.level, 0);
                if scheme == NumberingScheme::Ordinal {
                    assert_eq!(info.item_number, Some(i as u32 + 1));
                }
            }
        }
    }

    #[test]
    fn test_nested_list_is_flattened() {
        let out = blocks(json!({
            "type": "bulletList",
            "content": [{
                "type": "listItem",
                "content": [
                    { "type": "paragraph", "content": [{ "type": "text", "text": "outer" }] },
                    { "type": "orderedList", "content": [{
                        "type": "listItem",
                        "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "inner" }] }]
                    }]}
                ]
            }]
        }));
        assert_eq!(out.len(), 2);
        let inner = paragraph(&out[1]).style.list_info.as_ref().unwrap();
        assert_eq!(inner.level, 0);
        assert_eq!(inner.scheme, NumberingScheme::Ordinal);
    }

    #[test]
    fn test_image_without_src_renders_nothing() {
        let (drafts, requests) = render_json(json!({ "type": "image", "attrs": {} }));
        assert!(drafts.is_empty());
        assert!(requests.is_empty());
    }

    #[test]
    fn test_image_registers_request() {
        let (drafts, requests) = render_json(json!({
            "type": "image",
            "attrs": { "src": "https://cdn/a.png", "align": "center" }
        }));
        assert_eq!(requests.urls(), &["https://cdn/a.png".to_string()]);

        let images = FetchedImages::from_slots(vec![Some(Resource::image(vec![0; 8], "image/png"))]);
        let out = resolve_all(drafts, &images);
        let p = paragraph(&out[0]);
        assert!(p.has_image());
        assert_eq!(p.style.alignment, Alignment::Center);
        assert!(matches!(
            p.content[0],
            InlineContent::Image { width, height, .. } if width == 300.0 && height == 200.0
        ));
    }

    #[test]
    fn test_table_header_cells_bold_and_shaded() {
        let out = blocks(json!({
            "type": "table",
            "content": [
                { "type": "tableRow", "content": [
                    { "type": "tableHeader", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "H" }] }] },
                    { "type": "tableHeader", "content": [] }
                ]},
                { "type": "tableRow", "content": [
                    { "type": "tableCell", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "v" }] }] }
                ]}
            ]
        }));

        let table = out[0].as_table().unwrap();
        assert!(table.is_rectangular());
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.alignment, Alignment::Justify);

        let header = &table.rows[0].cells[0];
        assert_eq!(header.shading.as_deref(), Some("D9D9D9"));
        let run = paragraph(&header.content[0]).runs().next().unwrap();
        assert!(run.style.bold);

        // empty header cell still holds one paragraph
        assert_eq!(table.rows[0].cells[1].content.len(), 1);

        let body = &table.rows[1].cells[0];
        assert!(body.shading.is_none());
        assert!(!paragraph(&body.content[0]).runs().next().unwrap().style.bold);
        // padded cell
        assert_eq!(table.rows[1].cells.len(), 2);
    }

    #[test]
    fn test_table_cell_keeps_empty_paragraphs() {
        let out = blocks(json!({
            "type": "table",
            "content": [{ "type": "tableRow", "content": [
                { "type": "tableCell", "content": [{ "type": "paragraph" }, { "type": "paragraph" }] }
            ]}]
        }));
        let table = out[0].as_table().unwrap();
        assert_eq!(table.rows[0].cells[0].content.len(), 2);
    }

    #[test]
    fn test_table_without_rows_renders_nothing() {
        assert!(blocks(json!({ "type": "table", "content": [] })).is_empty());
    }

    #[test]
    fn test_unknown_node_degrades_to_paragraph() {
        let out = blocks(json!({ "type": "horizontalRule" }));
        assert_eq!(out.len(), 1);
        assert_eq!(paragraph(&out[0]).runs().count(), 1);

        let out = blocks(json!({
            "type": "blockquote",
            "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "quoted" }] }]
        }));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].plain_text(), "quoted");
        assert_eq!(paragraph(&out[0]).style.alignment, Alignment::Justify);
    }

    #[test]
    fn test_bare_text_node_renders_nothing() {
        assert!(blocks(json!({ "type": "text", "text": "loose" })).is_empty());
    }
}
