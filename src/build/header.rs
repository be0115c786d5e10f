//! Title paragraph and record info table.

use super::style::DocumentStyle;
use crate::input::{DocumentKind, Record};
use crate::model::{Alignment, Paragraph, Table, TableCell, TableRow, TextRun};

/// Builds the document header: title plus a label/value table.
pub struct HeaderBuilder<'a> {
    style: &'a DocumentStyle,
}

impl<'a> HeaderBuilder<'a> {
    /// Create a builder using `style`.
    pub fn new(style: &'a DocumentStyle) -> Self {
        Self { style }
    }

    /// Bold, centred title at the style's title size.
    pub fn title(&self, record: &Record) -> Paragraph {
        Paragraph::from_runs(vec![
            TextRun::bold(record.title.trim()).sized(self.style.title_font_size)
        ])
        .align(Alignment::Center)
    }

    /// Info table with the fields relevant to `kind`.
    pub fn info_table(&self, kind: DocumentKind, record: &Record) -> Table {
        let labels = &self.style.labels;
        let date = record.date.map(|d| d.format("%Y-%m-%d").to_string());

        let fields: Vec<(&str, Option<String>)> = match kind {
            DocumentKind::MeetingMinutes => vec![
                (labels.number.as_str(), record.number.clone()),
                (labels.date.as_str(), date),
                (labels.time.as_str(), time_range(record)),
                (labels.venue.as_str(), record.venue.clone()),
                (labels.organizer.as_str(), record.organizer.clone()),
                (labels.attendees.as_str(), record.attendee_count.map(|n| n.to_string())),
                (labels.absent.as_str(), record.absent_count.map(|n| n.to_string())),
            ],
            DocumentKind::Justification => vec![
                (labels.number.as_str(), record.number.clone()),
                (labels.date.as_str(), date),
                (labels.organizer.as_str(), record.organizer.clone()),
                (labels.partner.as_str(), record.partner.clone()),
            ],
        };

        let mut table = Table::new().widths(self.style.info_widths.to_vec());
        for (label, value) in fields {
            let value = value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| labels.placeholder.clone());
            table.add_row(TableRow::new(vec![
                TableCell::paragraph(Paragraph::from_runs(vec![TextRun::bold(label)]))
                    .shade(self.style.header_shading.clone())
                    .bordered(self.style.cell_borders()),
                TableCell::text(value).bordered(self.style.cell_borders()),
            ]));
        }
        table
    }
}

fn time_range(record: &Record) -> Option<String> {
    let fmt = |t: chrono::NaiveTime| t.format("%H:%M").to_string();
    match (record.start_time, record.end_time) {
        (Some(start), Some(end)) => Some(format!("{} - {}", fmt(start), fmt(end))),
        (Some(start), None) => Some(fmt(start)),
        (None, Some(end)) => Some(format!("- {}", fmt(end))),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn values(table: &Table) -> Vec<(String, String)> {
        table
            .rows
            .iter()
            .map(|r| (r.cells[0].plain_text(), r.cells[1].plain_text()))
            .collect()
    }

    #[test]
    fn test_title_paragraph() {
        let style = DocumentStyle::default();
        let p = HeaderBuilder::new(&style).title(&Record::new("  Weekly sync "));
        assert_eq!(p.plain_text(), "Weekly sync");
        assert_eq!(p.style.alignment, Alignment::Center);
        let run = p.runs().next().unwrap();
        assert!(run.style.bold);
        assert_eq!(run.style.font_size, Some(16.0));
    }

    #[test]
    fn test_minutes_info_table() {
        let style = DocumentStyle::default();
        let mut record = Record::new("Sync");
        record.date = NaiveDate::from_ymd_opt(2024, 3, 5);
        record.start_time = NaiveTime::from_hms_opt(9, 0, 0);
        record.end_time = NaiveTime::from_hms_opt(10, 30, 0);
        record.venue = Some("Room 4".to_string());
        record.attendee_count = Some(7);

        let table = HeaderBuilder::new(&style).info_table(DocumentKind::MeetingMinutes, &record);
        let rows = values(&table);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ("No.".to_string(), "-".to_string()));
        assert_eq!(rows[1].1, "2024-03-05");
        assert_eq!(rows[2].1, "09:00 - 10:30");
        assert_eq!(rows[3].1, "Room 4");
        assert_eq!(rows[5].1, "7");
        assert_eq!(rows[6].1, "-");
        assert_eq!(table.rows[0].cells[0].shading.as_deref(), Some("D9D9D9"));
    }

    #[test]
    fn test_justification_info_table() {
        let style = DocumentStyle::justification();
        let mut record = Record::new("Partner");
        record.partner = Some("Globex".to_string());
        record.organizer = Some("  ".to_string());

        let table = HeaderBuilder::new(&style).info_table(DocumentKind::Justification, &record);
        let rows = values(&table);
        let labels: Vec<_> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["No.", "Date", "Organizer", "Partner"]);
        assert_eq!(rows[2].1, "-");
        assert_eq!(rows[3].1, "Globex");
    }
}
