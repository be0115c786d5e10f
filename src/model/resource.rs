//! Resource types for embedded content (images).

use serde::{Deserialize, Serialize};

/// An embedded resource in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Raw binary data
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/jpeg")
    pub mime_type: String,

    /// Resource type
    pub resource_type: ResourceType,

    /// URL the resource was fetched from
    pub source_url: Option<String>,
}

impl Resource {
    /// Create a new resource.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            resource_type,
            source_url: None,
        }
    }

    /// Create an image resource.
    pub fn image(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self::new(data, mime_type, ResourceType::Image)
    }

    /// Create an image resource if `data` is a recognised image format.
    pub fn sniff_image(data: Vec<u8>) -> Option<Self> {
        let mime = Self::detect_mime_type(&data)?;
        Some(Self::image(data, mime))
    }

    /// Set the source URL.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Get the size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Check if this is an image resource.
    pub fn is_image(&self) -> bool {
        matches!(self.resource_type, ResourceType::Image)
    }

    /// Get a suggested filename based on resource type and ID.
    pub fn suggested_filename(&self, id: &str) -> String {
        format!("{}.{}", id, self.extension())
    }

    /// Get the file extension based on MIME type.
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/tiff" => "tiff",
            "image/bmp" => "bmp",
            "image/webp" => "webp",
            _ => "bin",
        }
    }

    /// Detect an image MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 8 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some("image/gif");
        }

        // TIFF: 49 49 2A 00 (little-endian) or 4D 4D 00 2A (big-endian)
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some("image/tiff");
        }

        // BMP: BM
        if data.starts_with(b"BM") {
            return Some("image/bmp");
        }

        // WEBP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some("image/webp");
        }

        None
    }
}

/// Type of embedded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Image (JPEG, PNG, etc.)
    Image,
    /// Other/unknown
    Other,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Image => write!(f, "image"),
            ResourceType::Other => write!(f, "other"),
        }
    }
}
