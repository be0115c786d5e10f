//! Document assembler: the single entry point of the build pipeline.

use super::actions::action_table;
use super::approvers::{ApproverLayout, ApproverTableBuilder};
use super::attachments::AttachmentBlockBuilder;
use super::draft::{fetch_all, resolve_all, Draft, DraftTable, ImageRequests};
use super::header::HeaderBuilder;
use super::options::AssembleOptions;
use super::sections::SectionTableBuilder;
use super::style::DocumentStyle;
use crate::error::{Error, Result};
use crate::fetch::ImageFetcher;
use crate::input::{DocumentInput, Record};
use crate::model::{Document, Metadata, Paragraph};
use log::debug;
use std::sync::Arc;

/// Drafts produced by the synchronous walk, with the images they wait on.
#[derive(Debug, Clone)]
pub struct DocumentPlan {
    /// Top-level drafts in output order
    pub drafts: Vec<Draft>,
    /// Every image the drafts refer to
    pub requests: ImageRequests,
}

/// Assembles [`DocumentInput`]s into finished [`Document`]s.
///
/// # Example
///
/// ```
/// use recdoc::build::Assembler;
/// use recdoc::fetch::NoImageFetcher;
/// use recdoc::input::{DocumentInput, DocumentKind, Record};
///
/// let input = DocumentInput::new(DocumentKind::MeetingMinutes, Record::new("Kick-off"));
/// let doc = Assembler::new(NoImageFetcher).assemble_blocking(&input).unwrap();
/// assert_eq!(doc.metadata.title, "Kick-off");
/// ```
pub struct Assembler {
    options: AssembleOptions,
    fetcher: Arc<dyn ImageFetcher>,
}

impl Assembler {
    /// Create an assembler fetching images through `fetcher`.
    pub fn new<F: ImageFetcher + 'static>(fetcher: F) -> Self {
        Self::from_shared(Arc::new(fetcher))
    }

    /// Create an assembler sharing an existing fetcher.
    pub fn from_shared(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            options: AssembleOptions::default(),
            fetcher,
        }
    }

    /// Set options and return self.
    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Walk the input into drafts without fetching anything.
    ///
    /// Fails only when the record is missing or has no title.
    pub fn plan(&self, input: &DocumentInput) -> Result<DocumentPlan> {
        let record = validate(input)?;
        let style = self.style_for(input);
        let layout = self
            .options
            .layout
            .clone()
            .unwrap_or_else(|| ApproverLayout::for_kind(input.kind))
            .or_home(record.organizer.as_deref());

        let mut requests = ImageRequests::new();
        let mut drafts: Vec<Draft> = Vec::new();

        let header = HeaderBuilder::new(&style);
        drafts.push(header.title(record).into());
        drafts.push(DraftTable::from(header.info_table(input.kind, record)).into());

        if let Some(table) = SectionTableBuilder::new(&style).build(&input.sections, &mut requests)
        {
            drafts.push(table.into());
        }

        if let Some(table) = ApproverTableBuilder::new(&style).build(&input.approvers, &layout) {
            drafts.push(DraftTable::from(table).into());
        }

        for _ in 0..style.spacer_lines {
            drafts.push(Paragraph::empty().into());
        }

        drafts.extend(AttachmentBlockBuilder::new(&style).build(&input.attachments, &mut requests));

        if input.kind.has_action_items() {
            drafts.push(DraftTable::from(action_table(&input.action_items, &style)).into());
        }

        Ok(DocumentPlan { drafts, requests })
    }

    /// Assemble a fully resolved document.
    ///
    /// All image fetches complete (or time out) before this returns.
    pub async fn assemble(&self, input: &DocumentInput) -> Result<Document> {
        let plan = self.plan(input)?;
        let fetched = fetch_all(
            &plan.requests,
            self.fetcher.as_ref(),
            self.options.fetch_timeout,
            self.options.max_concurrent_fetches,
        )
        .await;

        let blocks = resolve_all(plan.drafts, &fetched);
        let image_count = fetched.available_count() as u32;
        let missing_image_count = fetched.missing_count() as u32;

        let record = validate(input)?;
        let mut doc = Document::new();
        doc.page = self.style_for(input).page;
        doc.metadata = Metadata {
            kind: input.kind.as_str().to_string(),
            title: record.title.trim().to_string(),
            date: record.date,
            section_count: input.sections.len() as u32,
            approver_count: input.approvers.len() as u32,
            image_count,
            missing_image_count,
        };
        doc.blocks = blocks;
        doc.resources = fetched.into_resources();

        debug!(
            "assembled {} \"{}\": {} blocks, {} images ({} missing)",
            input.kind,
            doc.metadata.title,
            doc.block_count(),
            image_count,
            missing_image_count
        );
        Ok(doc)
    }

    /// Assemble on a private current-thread runtime.
    ///
    /// Must not be called from within an async context.
    pub fn assemble_blocking(&self, input: &DocumentInput) -> Result<Document> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.assemble(input))
    }

    fn style_for(&self, input: &DocumentInput) -> DocumentStyle {
        self.options
            .style
            .clone()
            .unwrap_or_else(|| DocumentStyle::for_kind(input.kind))
    }
}

fn validate(input: &DocumentInput) -> Result<&Record> {
    let record = input.record.as_ref().ok_or(Error::RecordNotFound)?;
    if record.title.trim().is_empty() {
        return Err(Error::MissingField("title"));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{NoImageFetcher, StaticImageFetcher};
    use crate::input::{
        ActionItem, Approver, ApproverCategory, AttachmentSection, ContentNode, DocumentKind,
        Section,
    };
    use crate::model::Block;

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn minutes() -> DocumentInput {
        DocumentInput::new(DocumentKind::MeetingMinutes, Record::new("Weekly"))
            .with_section(Section::new(
                "Background",
                ContentNode::Doc {
                    content: vec![ContentNode::paragraph("Hello")],
                },
            ))
            .with_approver(Approver::new("Alice", ApproverCategory::Initiator, "Acme"))
            .with_action_item(ActionItem::new("Follow up", "Friday", "Bob"))
    }

    #[test]
    fn test_missing_record() {
        let input = DocumentInput {
            record: None,
            ..Default::default()
        };
        let result = Assembler::new(NoImageFetcher).assemble_blocking(&input);
        assert!(matches!(result, Err(Error::RecordNotFound)));
    }

    #[test]
    fn test_blank_title() {
        let input = DocumentInput::new(DocumentKind::Justification, Record::new("  "));
        let result = Assembler::new(NoImageFetcher).assemble_blocking(&input);
        assert!(matches!(result, Err(Error::MissingField("title"))));
    }

    #[test]
    fn test_minutes_block_order() {
        let doc = Assembler::new(NoImageFetcher)
            .assemble_blocking(&minutes())
            .unwrap();

        // title, info, sections, approvers, spacer, actions
        assert_eq!(doc.block_count(), 6);
        assert_eq!(doc.blocks[0].plain_text(), "Weekly");
        assert!(doc.blocks[1].is_table());
        assert!(doc.blocks[2].as_table().unwrap().plain_text().contains("Background"));
        assert!(doc.blocks[3].as_table().unwrap().plain_text().contains("Alice"));
        assert!(doc.blocks[4].is_paragraph());
        assert!(doc.blocks[5].as_table().unwrap().plain_text().contains("Follow up"));
        assert_eq!(doc.metadata.kind, "meeting_minutes");
        assert_eq!(doc.metadata.section_count, 1);
        assert_eq!(doc.metadata.approver_count, 1);
    }

    #[test]
    fn test_justification_has_no_action_table() {
        let mut input = minutes();
        input.kind = DocumentKind::Justification;
        let doc = Assembler::new(NoImageFetcher).assemble_blocking(&input).unwrap();

        // title, info, sections, role table, spacer
        assert_eq!(doc.block_count(), 5);
        assert!(!doc.plain_text().contains("Follow up"));
        let roles = doc.blocks[3].as_table().unwrap();
        assert_eq!(roles.row_count(), 3);
    }

    #[test]
    fn test_plan_does_not_fetch() {
        let fetcher = Arc::new(StaticImageFetcher::new().with_image("a.png", PNG.to_vec()));
        let input = minutes().with_attachment(AttachmentSection::new("Photos", ["a.png"]));
        let assembler = Assembler::from_shared(fetcher.clone());

        let plan = assembler.plan(&input).unwrap();
        assert_eq!(plan.requests.len(), 1);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_urls_fetched_once() {
        let fetcher = Arc::new(StaticImageFetcher::new().with_image("a.png", PNG.to_vec()));
        let input = minutes()
            .with_attachment(AttachmentSection::new("One", ["a.png"]))
            .with_attachment(AttachmentSection::new("Two", ["a.png", "gone.png"]));

        let doc = Assembler::from_shared(fetcher.clone())
            .assemble(&input)
            .await
            .unwrap();

        assert_eq!(fetcher.call_count(), 2);
        assert_eq!(doc.resources.len(), 1);
        assert_eq!(doc.metadata.image_count, 1);
        assert_eq!(doc.metadata.missing_image_count, 1);
        let images = doc
            .blocks
            .iter()
            .filter_map(Block::as_paragraph)
            .filter(|p| p.has_image())
            .count();
        assert_eq!(images, 2);
    }

    #[test]
    fn test_options_override_style() {
        let style = DocumentStyle::default().with_header_shading("FFFF00");
        let doc = Assembler::new(NoImageFetcher)
            .with_options(AssembleOptions::new().with_style(style))
            .assemble_blocking(&minutes())
            .unwrap();
        let info = doc.blocks[1].as_table().unwrap();
        assert_eq!(info.rows[0].cells[0].shading.as_deref(), Some("FFFF00"));
    }
}
