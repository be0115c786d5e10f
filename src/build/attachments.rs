//! Attachment block: heading, numbered section labels, embedded images.

use super::draft::{Draft, ImageRequests, ImageSlot};
use super::style::DocumentStyle;
use crate::input::AttachmentSection;
use crate::model::{Alignment, Paragraph, TextRun};

/// Builds the attachment block.
pub struct AttachmentBlockBuilder<'a> {
    style: &'a DocumentStyle,
}

impl<'a> AttachmentBlockBuilder<'a> {
    /// Create a builder using `style`.
    pub fn new(style: &'a DocumentStyle) -> Self {
        Self { style }
    }

    /// Drafts for all sections; empty when there are none.
    ///
    /// Files without a URL are skipped. Every URL becomes an image slot; a
    /// failed or non-image fetch drops the slot at resolution time.
    pub fn build(&self, sections: &[AttachmentSection], requests: &mut ImageRequests) -> Vec<Draft> {
        if sections.is_empty() {
            return Vec::new();
        }

        let mut out = vec![Draft::from(Paragraph::from_runs(vec![TextRun::bold(
            self.style.labels.attachments_heading.as_str(),
        )]))];

        for (i, section) in sections.iter().enumerate() {
            out.push(Paragraph::with_text(format!("{}. {}", i + 1, section.name.trim())).into());
            for url in section.files.iter().filter_map(|f| f.url()) {
                out.push(Draft::Image(ImageSlot {
                    slot: requests.request(url),
                    alignment: Alignment::Center,
                    size: self.style.attachment_image,
                }));
            }
        }
        out
    }
}
