//! Visual preset threaded through every builder.

use crate::input::DocumentKind;
use crate::model::{Border, CellBorders, PageSetup};

/// Display size of an embedded image in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

impl ImageSize {
    /// Create an image size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Fixed texts used by the generated parts of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    /// Text for absent optional values
    pub placeholder: String,
    /// Heading of the attachment block
    pub attachments_heading: String,
    /// Action-item table headers: index, description, due, responsible
    pub action_headers: [String; 4],
    /// Info table: record number
    pub number: String,
    /// Info table: date
    pub date: String,
    /// Info table: time range
    pub time: String,
    /// Info table: venue
    pub venue: String,
    /// Info table: organiser
    pub organizer: String,
    /// Info table: partner
    pub partner: String,
    /// Info table: attendee count
    pub attendees: String,
    /// Info table: absentee count
    pub absent: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            placeholder: "-".to_string(),
            attachments_heading: "Attachments".to_string(),
            action_headers: [
                "No.".to_string(),
                "Action".to_string(),
                "Due".to_string(),
                "Responsible".to_string(),
            ],
            number: "No.".to_string(),
            date: "Date".to_string(),
            time: "Time".to_string(),
            venue: "Venue".to_string(),
            organizer: "Organizer".to_string(),
            partner: "Partner".to_string(),
            attendees: "Attendees".to_string(),
            absent: "Absent".to_string(),
        }
    }
}

/// Immutable style configuration for one document template.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStyle {
    /// Page geometry
    pub page: PageSetup,

    /// Border drawn around every generated table cell
    pub border: Border,

    /// Fill of header and label cells (hex without '#')
    pub header_shading: String,

    /// Display size of images inside section content
    pub content_image: ImageSize,

    /// Display size of attachment images
    pub attachment_image: ImageSize,

    /// Title font size in points
    pub title_font_size: f32,

    /// Indentation level of list paragraphs
    pub list_level: u8,

    /// Number of empty paragraphs between the approver table and attachments
    pub spacer_lines: u8,

    /// Info table widths: label, value
    pub info_widths: [f32; 2],

    /// Section table widths: index, label, content
    pub section_widths: [f32; 3],

    /// Role-row approver table widths: role, name, affiliation, signature
    pub role_widths: [f32; 4],

    /// Action-item table widths: index, description, due, responsible
    pub action_widths: [f32; 4],

    /// Fixed texts
    pub labels: Labels,
}

impl DocumentStyle {
    /// Create the default (meeting minutes) style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for meeting minutes.
    pub fn meeting_minutes() -> Self {
        Self::default()
    }

    /// Preset for partnership justifications.
    pub fn justification() -> Self {
        Self {
            title_font_size: 18.0,
            section_widths: [8.0, 27.0, 65.0],
            labels: Labels {
                attachments_heading: "Supporting Documents".to_string(),
                ..Labels::default()
            },
            ..Self::default()
        }
    }

    /// Preset matching a document kind.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::MeetingMinutes => Self::meeting_minutes(),
            DocumentKind::Justification => Self::justification(),
        }
    }

    /// Set the content image size.
    pub fn with_content_image(mut self, size: ImageSize) -> Self {
        self.content_image = size;
        self
    }

    /// Set the attachment image size.
    pub fn with_attachment_image(mut self, size: ImageSize) -> Self {
        self.attachment_image = size;
        self
    }

    /// Set the header shading.
    pub fn with_header_shading(mut self, fill: impl Into<String>) -> Self {
        self.header_shading = fill.into();
        self
    }

    /// Set the page geometry.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Set the fixed texts.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Borders applied to generated cells.
    pub fn cell_borders(&self) -> CellBorders {
        CellBorders::all(self.border.clone())
    }
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            page: PageSetup::default(),
            border: Border::single(4, "000000"),
            header_shading: "D9D9D9".to_string(),
            content_image: ImageSize::new(300.0, 200.0),
            attachment_image: ImageSize::new(450.0, 320.0),
            title_font_size: 16.0,
            list_level: 0,
            spacer_lines: 1,
            info_widths: [25.0, 75.0],
            section_widths: [8.0, 22.0, 70.0],
            role_widths: [20.0, 30.0, 30.0, 20.0],
            action_widths: [8.0, 52.0, 20.0, 20.0],
            labels: Labels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(widths: &[f32]) -> f32 {
        widths.iter().sum()
    }

    #[test]
    fn test_widths_sum_to_100() {
        for style in [DocumentStyle::meeting_minutes(), DocumentStyle::justification()] {
            assert_eq!(sum(&style.info_widths), 100.0);
            assert_eq!(sum(&style.section_widths), 100.0);
            assert_eq!(sum(&style.role_widths), 100.0);
            assert_eq!(sum(&style.action_widths), 100.0);
        }
    }

    #[test]
    fn test_preset_for_kind() {
        let style = DocumentStyle::for_kind(DocumentKind::Justification);
        assert_eq!(style.labels.attachments_heading, "Supporting Documents");
        assert_eq!(DocumentStyle::for_kind(DocumentKind::MeetingMinutes), DocumentStyle::new());
    }
}
