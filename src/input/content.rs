//! Rich-text content tree as produced by the web editor.
//!
//! Editor JSON is loosely shaped: `attrs` is sometimes an empty array instead
//! of an object, `content` can be a single object, marks come as strings or
//! as `{type}` objects, and whole trees may be stored as JSON strings. All of
//! that is coerced here, once, into the closed [`ContentNode`] type so the
//! renderer only ever matches on known variants.

use crate::model::Alignment;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

/// Inline marks carried by a text node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks {
    /// Bold mark
    pub bold: bool,
    /// Italic mark
    pub italic: bool,
}

/// A normalized node of the rich-text content tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    /// Root of a section's content
    Doc {
        /// Top-level nodes
        content: Vec<ContentNode>,
    },

    /// A paragraph of text nodes
    Paragraph {
        /// Requested alignment (`None` when absent or unrecognised)
        align: Option<Alignment>,
        /// Inline children
        content: Vec<ContentNode>,
    },

    /// Bulleted list of `ListItem` nodes
    BulletList {
        /// List items
        items: Vec<ContentNode>,
    },

    /// Numbered list of `ListItem` nodes
    OrderedList {
        /// List items
        items: Vec<ContentNode>,
    },

    /// One list entry, holding paragraphs (and possibly nested lists)
    ListItem {
        /// Item children
        content: Vec<ContentNode>,
    },

    /// An image referenced by URL
    Image {
        /// Image URL
        src: Option<String>,
        /// Requested alignment
        align: Option<Alignment>,
    },

    /// A table of `TableRow` nodes
    Table {
        /// Requested alignment
        align: Option<Alignment>,
        /// Rows
        rows: Vec<ContentNode>,
    },

    /// A table row of `TableCell` nodes
    TableRow {
        /// Cells
        cells: Vec<ContentNode>,
    },

    /// A table cell; header cells render bold on a shaded background
    TableCell {
        /// Whether this is a header cell
        header: bool,
        /// Cell children
        content: Vec<ContentNode>,
    },

    /// A styled text leaf
    Text {
        /// Text content
        text: String,
        /// Inline marks
        marks: Marks,
    },

    /// Any node type the renderer does not know
    Other {
        /// Original type name
        kind: String,
        /// Children, if any
        content: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// An empty root document.
    pub fn empty_doc() -> Self {
        ContentNode::Doc {
            content: Vec::new(),
        }
    }

    /// A paragraph holding one plain text node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentNode::Paragraph {
            align: None,
            content: vec![ContentNode::text(text)],
        }
    }

    /// A plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    /// Parse a JSON string leniently; malformed JSON yields an empty document.
    pub fn from_json_str(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::empty_doc();
        }
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("content tree is not valid JSON, rendering it empty: {}", e);
                Self::empty_doc()
            }
        }
    }

    /// Normalize an editor JSON value into a node.
    pub fn from_value(value: &Value) -> Self {
        let obj = match value {
            Value::Object(obj) => obj,
            other => {
                debug!("content node is not an object: {}", other);
                return ContentNode::Other {
                    kind: String::new(),
                    content: Vec::new(),
                };
            }
        };

        let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
        let attrs = attrs_of(obj);
        let children = || children_of(obj);

        match kind {
            "doc" => ContentNode::Doc {
                content: children(),
            },
            "paragraph" => ContentNode::Paragraph {
                align: align_of(attrs),
                content: children(),
            },
            "bulletList" => ContentNode::BulletList { items: children() },
            "orderedList" => ContentNode::OrderedList { items: children() },
            "listItem" => ContentNode::ListItem {
                content: children(),
            },
            "image" => ContentNode::Image {
                src: attrs
                    .and_then(|a| a.get("src"))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                align: align_of(attrs),
            },
            "table" => ContentNode::Table {
                align: align_of(attrs),
                rows: children(),
            },
            "tableRow" => ContentNode::TableRow { cells: children() },
            "tableCell" => ContentNode::TableCell {
                header: false,
                content: children(),
            },
            "tableHeader" | "tableHeaderCell" => ContentNode::TableCell {
                header: true,
                content: children(),
            },
            "text" => ContentNode::Text {
                text: obj
                    .get("text")
                    .and_then(Value::as_str)
                    .map(|t| t.nfc().collect())
                    .unwrap_or_default(),
                marks: marks_of(obj.get("marks")),
            },
            other => ContentNode::Other {
                kind: other.to_string(),
                content: children(),
            },
        }
    }

    /// Children in document order. Leaves have none.
    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Doc { content }
            | ContentNode::Paragraph { content, .. }
            | ContentNode::ListItem { content }
            | ContentNode::TableCell { content, .. }
            | ContentNode::Other { content, .. } => content,
            ContentNode::BulletList { items } | ContentNode::OrderedList { items } => items,
            ContentNode::Table { rows, .. } => rows,
            ContentNode::TableRow { cells } => cells,
            ContentNode::Image { .. } | ContentNode::Text { .. } => &[],
        }
    }

    /// Nodes rendered at the top level of a section.
    ///
    /// A `Doc` root contributes its children; any other root stands for itself.
    pub fn top_level(&self) -> &[ContentNode] {
        match self {
            ContentNode::Doc { content } => content,
            other => std::slice::from_ref(other),
        }
    }

    /// Editor type name of the node.
    pub fn kind_name(&self) -> &str {
        match self {
            ContentNode::Doc { .. } => "doc",
            ContentNode::Paragraph { .. } => "paragraph",
            ContentNode::BulletList { .. } => "bulletList",
            ContentNode::OrderedList { .. } => "orderedList",
            ContentNode::ListItem { .. } => "listItem",
            ContentNode::Image { .. } => "image",
            ContentNode::Table { .. } => "table",
            ContentNode::TableRow { .. } => "tableRow",
            ContentNode::TableCell { header: false, .. } => "tableCell",
            ContentNode::TableCell { header: true, .. } => "tableHeaderCell",
            ContentNode::Text { .. } => "text",
            ContentNode::Other { kind, .. } => kind,
        }
    }

    /// Check if this is a paragraph without any children.
    pub fn is_empty_paragraph(&self) -> bool {
        matches!(self, ContentNode::Paragraph { content, .. } if content.is_empty())
    }

    /// Total number of nodes in the subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}

impl Default for ContentNode {
    fn default() -> Self {
        Self::empty_doc()
    }
}

impl<'de> Deserialize<'de> for ContentNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            // Stored as a JSON string column
            Value::String(s) => ContentNode::from_json_str(&s),
            Value::Null => ContentNode::empty_doc(),
            other => ContentNode::from_value(&other),
        })
    }
}

fn attrs_of(obj: &Map<String, Value>) -> Option<&Map<String, Value>> {
    obj.get("attrs").and_then(Value::as_object)
}

fn children_of(obj: &Map<String, Value>) -> Vec<ContentNode> {
    match obj.get("content") {
        Some(Value::Array(items)) => items.iter().map(ContentNode::from_value).collect(),
        Some(single @ Value::Object(_)) => vec![ContentNode::from_value(single)],
        _ => Vec::new(),
    }
}

fn align_of(attrs: Option<&Map<String, Value>>) -> Option<Alignment> {
    let attrs = attrs?;
    attrs
        .get("align")
        .or_else(|| attrs.get("textAlign"))
        .and_then(Value::as_str)
        .and_then(Alignment::from_keyword)
}

fn marks_of(marks: Option<&Value>) -> Marks {
    let mut out = Marks::default();
    let Some(Value::Array(items)) = marks else {
        return out;
    };
    for item in items {
        let name = match item {
            Value::String(s) => s.as_str(),
            Value::Object(o) => o.get("type").and_then(Value::as_str).unwrap_or_default(),
            _ => continue,
        };
        match name {
            "bold" | "strong" => out.bold = true,
            "italic" | "em" => out.italic = true,
            _ => {}
        }
    }
    out
}
