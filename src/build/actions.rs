//! Next-action table for meeting minutes.

use super::style::DocumentStyle;
use crate::input::ActionItem;
use crate::model::{Alignment, Paragraph, Table, TableCell, TableRow, TextRun};

/// Header row, then one row per item in input order.
pub fn action_table(items: &[ActionItem], style: &DocumentStyle) -> Table {
    let borders = style.cell_borders();
    let header = style
        .labels
        .action_headers
        .iter()
        .map(|h| {
            TableCell::paragraph(
                Paragraph::from_runs(vec![TextRun::bold(h.as_str())]).align(Alignment::Center),
            )
            .shade(style.header_shading.clone())
            .bordered(borders.clone())
        })
        .collect();

    let mut table = Table::with_header(1).widths(style.action_widths.to_vec());
    table.add_row(TableRow::header(header));
    for (i, item) in items.iter().enumerate() {
        let text = |s: &str| TableCell::text(s.trim()).bordered(borders.clone());
        table.add_row(TableRow::new(vec![
            TableCell::paragraph(Paragraph::with_text((i + 1).to_string()).align(Alignment::Center))
                .bordered(borders.clone()),
            text(&item.description),
            text(&item.due_target),
            text(&item.responsible_party),
        ]));
    }
    table
}
