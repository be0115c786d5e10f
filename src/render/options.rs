//! Text preview options.

/// Options for the plain-text preview.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Marker for bullet list items
    pub list_marker: char,

    /// Separator between table cells on one line
    pub cell_separator: String,

    /// Emit `[image: id]` where images are embedded
    pub show_images: bool,
}

impl TextOptions {
    /// Create new text options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the bullet marker.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the table cell separator.
    pub fn with_cell_separator(mut self, separator: impl Into<String>) -> Self {
        self.cell_separator = separator.into();
        self
    }

    /// Show or hide image markers.
    pub fn with_images(mut self, show: bool) -> Self {
        self.show_images = show;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: false,
            list_marker: '-',
            cell_separator: " | ".to_string(),
            show_images: true,
        }
    }
}
