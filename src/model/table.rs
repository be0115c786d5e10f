//! Table types.

use super::{Alignment, Block, Paragraph};
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Column widths as percentages of the usable page width
    pub column_widths: Option<Vec<f32>>,

    /// Horizontal placement of the table
    pub alignment: Alignment,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            column_widths: None,
            alignment: Alignment::Left,
        }
    }

    /// Create a table with header.
    pub fn with_header(header_rows: u8) -> Self {
        Self {
            header_rows,
            ..Self::new()
        }
    }

    /// Set column widths (percentages) and return self.
    pub fn widths(mut self, widths: Vec<f32>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of grid columns (span of the first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.span()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get header rows.
    pub fn header(&self) -> &[TableRow] {
        &self.rows[..(self.header_rows as usize).min(self.rows.len())]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        &self.rows[(self.header_rows as usize).min(self.rows.len())..]
    }

    /// Check that every row covers the same number of grid columns.
    pub fn is_rectangular(&self) -> bool {
        let span = self.column_count();
        self.rows.iter().all(|r| r.span() == span)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Total number of grid columns covered by the row.
    pub fn span(&self) -> usize {
        self.cells.iter().map(|c| c.column_span as usize).sum()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
///
/// A cell always holds at least one block; an empty cell carries a single
/// empty paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Vec<Block>,

    /// Number of grid columns this cell spans
    pub column_span: u16,

    /// Vertical merge state
    pub vertical_merge: Option<VerticalMerge>,

    /// Background fill (hex colour without '#')
    pub shading: Option<String>,

    /// Cell borders
    pub borders: CellBorders,

    /// Vertical alignment
    pub vertical_alignment: VerticalAlignment,
}

impl TableCell {
    /// Create a cell from blocks, padding to one empty paragraph.
    pub fn new(mut content: Vec<Block>) -> Self {
        if content.is_empty() {
            content.push(Block::Paragraph(Paragraph::empty()));
        }
        Self {
            content,
            column_span: 1,
            vertical_merge: None,
            shading: None,
            borders: CellBorders::default(),
            vertical_alignment: VerticalAlignment::Center,
        }
    }

    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::paragraph(Paragraph::with_text(text))
    }

    /// Create a cell holding one paragraph.
    pub fn paragraph(paragraph: Paragraph) -> Self {
        Self::new(vec![Block::Paragraph(paragraph)])
    }

    /// Create an empty cell (one empty paragraph).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Set column span and return self.
    pub fn span(mut self, span: u16) -> Self {
        self.column_span = span.max(1);
        self
    }

    /// Set vertical merge state and return self.
    pub fn merge(mut self, merge: VerticalMerge) -> Self {
        self.vertical_merge = Some(merge);
        self
    }

    /// Set shading and return self.
    pub fn shade(mut self, fill: impl Into<String>) -> Self {
        self.shading = Some(fill.into());
        self
    }

    /// Set borders and return self.
    pub fn bordered(mut self, borders: CellBorders) -> Self {
        self.borders = borders;
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell has no visible text or images.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|b| match b {
            Block::Paragraph(p) => p.is_empty(),
            Block::Table(t) => t.is_empty(),
        })
    }

    /// Check if this cell spans multiple columns or takes part in a vertical merge.
    pub fn is_merged(&self) -> bool {
        self.column_span > 1 || self.vertical_merge.is_some()
    }
}

/// Vertical merge marker for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalMerge {
    /// First cell of a vertically merged range
    Start,
    /// Cell covered by the merge started above
    Continue,
}

/// Vertical alignment for table cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// Top alignment
    #[default]
    Top,
    /// Middle/center alignment
    Center,
    /// Bottom alignment
    Bottom,
}

/// Border line style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// No border
    #[default]
    None,
    /// Single solid line
    Single,
    /// Double line
    Double,
}

/// One border line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    /// Line style
    pub style: BorderStyle,
    /// Line width in eighths of a point
    pub size: u8,
    /// Line colour (hex without '#')
    pub color: String,
}

impl Border {
    /// A single solid line.
    pub fn single(size: u8, color: impl Into<String>) -> Self {
        Self {
            style: BorderStyle::Single,
            size,
            color: color.into(),
        }
    }

    /// No border.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Borders of a table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBorders {
    /// Top edge
    pub top: Border,
    /// Bottom edge
    pub bottom: Border,
    /// Left edge
    pub left: Border,
    /// Right edge
    pub right: Border,
}

impl CellBorders {
    /// The same border on all four edges.
    pub fn all(border: Border) -> Self {
        Self {
            top: border.clone(),
            bottom: border.clone(),
            left: border.clone(),
            right: border,
        }
    }
}
