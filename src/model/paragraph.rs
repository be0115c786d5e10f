//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs in the paragraph
    pub content: Vec<InlineContent>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new paragraph with no runs.
    ///
    /// Use [`Paragraph::empty`] for output; serializers collapse
    /// paragraphs that carry no runs at all.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            style: ParagraphStyle::default(),
        }
    }

    /// Create a paragraph holding exactly one empty run.
    pub fn empty() -> Self {
        Self::with_text("")
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph from styled runs, substituting one empty run
    /// when `runs` is empty.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        let mut p = Self::new();
        for run in runs {
            p.add_run(run);
        }
        if p.content.is_empty() {
            p.add_text("");
        }
        p
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.style.alignment = alignment;
        self
    }

    /// Mark the paragraph as a list item and return self.
    pub fn list(mut self, info: ListInfo) -> Self {
        self.style.list_info = Some(info);
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(InlineContent::Text(TextRun {
            text: text.into(),
            style: TextStyle::default(),
        }));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add a line break.
    pub fn add_line_break(&mut self) {
        self.content.push(InlineContent::LineBreak);
    }

    /// Add an embedded image.
    pub fn add_image(&mut self, resource_id: impl Into<String>, width: f32, height: f32) {
        self.content.push(InlineContent::Image {
            resource_id: resource_id.into(),
            width,
            height,
        });
    }

    /// Text runs of the paragraph, in order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.clone(),
                InlineContent::LineBreak => "\n".to_string(),
                InlineContent::Image { resource_id, .. } => format!("[image:{}]", resource_id),
            })
            .collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if the paragraph embeds an image.
    pub fn has_image(&self) -> bool {
        self.content
            .iter()
            .any(|c| matches!(c, InlineContent::Image { .. }))
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.style.list_info.is_some()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A line break
    LineBreak,

    /// An embedded image at a fixed display size
    Image {
        /// Resource ID in the document's resource table
        resource_id: String,
        /// Display width in points
        width: f32,
        /// Display height in points
        height: f32,
    },
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Set the font size and return self.
    pub fn sized(mut self, points: f32) -> Self {
        self.style.font_size = Some(points);
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Font size in points
    pub font_size: Option<f32>,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Text alignment
    pub alignment: Alignment,

    /// List information if this is a list item
    pub list_info: Option<ListInfo>,

    /// Space after paragraph in points
    pub space_after: Option<f32>,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default for generated labels)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// Parse an editor alignment keyword. Unknown keywords yield `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// Information about a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// Numbering definition the item refers to
    pub scheme: NumberingScheme,

    /// Indentation level (0 = top level)
    pub level: u8,

    /// Item number for ordinal lists (1-based within the list)
    pub item_number: Option<u32>,
}

impl ListInfo {
    /// Create a new bulleted list item.
    pub fn bullet(level: u8) -> Self {
        Self {
            scheme: NumberingScheme::Bullet,
            level,
            item_number: None,
        }
    }

    /// Create a new numbered list item.
    pub fn numbered(level: u8, number: u32) -> Self {
        Self {
            scheme: NumberingScheme::Ordinal,
            level,
            item_number: Some(number),
        }
    }
}

/// Numbering definition referenced by list paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingScheme {
    /// Bulleted list
    Bullet,
    /// 1, 2, 3, ...
    Ordinal,
}

impl NumberingScheme {
    /// Reference name of the numbering definition.
    pub fn reference(&self) -> &'static str {
        match self {
            NumberingScheme::Bullet => "bullet-points",
            NumberingScheme::Ordinal => "ordinal-points",
        }
    }
}
