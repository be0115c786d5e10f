//! Record fields and relational side-lists supplied by the persistence layer.

use super::ContentNode;
use crate::error::Result;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::fmt;

/// Which document is being produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Meeting minutes: approvers grouped by affiliation, action items listed
    #[default]
    #[serde(alias = "minutes")]
    MeetingMinutes,

    /// Partnership justification: approvers grouped by role
    Justification,
}

impl DocumentKind {
    /// Machine-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::MeetingMinutes => "meeting_minutes",
            DocumentKind::Justification => "justification",
        }
    }

    /// Whether the document ends with the action-item table.
    pub fn has_action_items(&self) -> bool {
        matches!(self, DocumentKind::MeetingMinutes)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain fields of the record being rendered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Record number shown in the info table
    pub number: Option<String>,

    /// Document title (mandatory)
    pub title: String,

    /// Meeting or submission date
    pub date: Option<NaiveDate>,

    /// Meeting start time
    #[serde(alias = "startTime")]
    pub start_time: Option<NaiveTime>,

    /// Meeting end time
    #[serde(alias = "endTime")]
    pub end_time: Option<NaiveTime>,

    /// Meeting venue
    pub venue: Option<String>,

    /// Organising unit
    pub organizer: Option<String>,

    /// Partner company (justification documents)
    pub partner: Option<String>,

    /// Number of attendees
    #[serde(alias = "attendeeCount")]
    pub attendee_count: Option<u32>,

    /// Number of absentees
    #[serde(alias = "absentCount")]
    pub absent_count: Option<u32>,
}

impl Record {
    /// Create a record with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A labeled unit of document content.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Section {
    /// Section label (e.g. an agenda item)
    #[serde(default)]
    pub label: String,

    /// Content tree root
    #[serde(default)]
    pub content: ContentNode,
}

impl Section {
    /// Create a section.
    pub fn new(label: impl Into<String>, content: ContentNode) -> Self {
        Self {
            label: label.into(),
            content,
        }
    }
}

/// Function of an approver in the sign-off chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum ApproverCategory {
    /// Drafted or proposed the document
    #[serde(alias = "initiator", alias = "INITIATOR")]
    Initiator,

    /// Reviews before final sign-off
    #[default]
    #[serde(alias = "reviewer", alias = "REVIEWER")]
    Reviewer,

    /// Gives the final approval
    #[serde(
        alias = "final_approver",
        alias = "finalApprover",
        alias = "FINAL_APPROVER"
    )]
    FinalApprover,
}

impl ApproverCategory {
    /// The standard three-role order.
    pub const ALL: [ApproverCategory; 3] = [
        ApproverCategory::Initiator,
        ApproverCategory::Reviewer,
        ApproverCategory::FinalApprover,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ApproverCategory::Initiator => "Initiator",
            ApproverCategory::Reviewer => "Reviewer",
            ApproverCategory::FinalApprover => "Final Approver",
        }
    }
}

impl fmt::Display for ApproverCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A person who signs the document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Approver {
    /// Display name
    pub name: String,

    /// Role in the sign-off chain
    pub category: ApproverCategory,

    /// Organisation name, already resolved by the persistence layer
    pub affiliation: String,

    /// Secondary identifier (employee number, position)
    #[serde(alias = "secondaryId")]
    pub secondary_id: Option<String>,
}

impl Approver {
    /// Create an approver.
    pub fn new(
        name: impl Into<String>,
        category: ApproverCategory,
        affiliation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            affiliation: affiliation.into(),
            secondary_id: None,
        }
    }

    /// Set the secondary identifier and return self.
    pub fn with_secondary_id(mut self, id: impl Into<String>) -> Self {
        self.secondary_id = Some(id.into());
        self
    }
}

/// A named group of attached files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttachmentSection {
    /// Section name
    pub name: String,

    /// Attached files
    pub files: Vec<AttachmentFile>,
}

impl AttachmentSection {
    /// Create an attachment section from file URLs.
    pub fn new<S: Into<String>>(name: impl Into<String>, urls: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            files: urls.into_iter().map(AttachmentFile::new).collect(),
        }
    }
}

/// One attached file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttachmentFile {
    /// Location of the file
    pub url: Option<String>,
}

impl AttachmentFile {
    /// Create a file reference.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// The URL if present and non-blank.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// A follow-up action agreed in a meeting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    /// What has to be done
    pub description: String,

    /// When it is due
    #[serde(alias = "dueTarget")]
    pub due_target: String,

    /// Who is responsible
    #[serde(alias = "responsibleParty")]
    pub responsible_party: String,
}

impl ActionItem {
    /// Create an action item.
    pub fn new(
        description: impl Into<String>,
        due_target: impl Into<String>,
        responsible_party: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            due_target: due_target.into(),
            responsible_party: responsible_party.into(),
        }
    }
}

/// Everything needed to assemble one document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentInput {
    /// Document kind
    pub kind: DocumentKind,

    /// The record; `None` when the lookup found nothing
    pub record: Option<Record>,

    /// Content sections in display order
    pub sections: Vec<Section>,

    /// Approvers
    pub approvers: Vec<Approver>,

    /// Attachment sections
    pub attachments: Vec<AttachmentSection>,

    /// Action items in display order
    #[serde(alias = "actionItems")]
    pub action_items: Vec<ActionItem>,
}

impl DocumentInput {
    /// Create an input for a record.
    pub fn new(kind: DocumentKind, record: Record) -> Self {
        Self {
            kind,
            record: Some(record),
            ..Default::default()
        }
    }

    /// Decode an input document from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a section and return self.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append an approver and return self.
    pub fn with_approver(mut self, approver: Approver) -> Self {
        self.approvers.push(approver);
        self
    }

    /// Append an attachment section and return self.
    pub fn with_attachment(mut self, attachment: AttachmentSection) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Append an action item and return self.
    pub fn with_action_item(mut self, item: ActionItem) -> Self {
        self.action_items.push(item);
        self
    }
}
