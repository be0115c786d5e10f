//! JSON rendering of the document model.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
///
/// Resource bytes are not serialized; resources carry their MIME type and
/// source URL only.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Resource};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.metadata.title = "Test".to_string();
        doc.blocks.push(Paragraph::with_text("Hello").into());

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let mut doc = Document::new();
        doc.blocks.push(Paragraph::empty().into());

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_resource_bytes_skipped() {
        let mut doc = Document::new();
        doc.resources.insert(
            "image1".to_string(),
            Resource::image(vec![0xAB; 64], "image/png").with_source_url("https://cdn/a.png"),
        );

        let value: serde_json::Value =
            serde_json::from_str(&to_json(&doc, JsonFormat::Compact).unwrap()).unwrap();
        let resource = &value["resources"]["image1"];
        assert_eq!(resource["mime_type"], "image/png");
        assert_eq!(resource["source_url"], "https://cdn/a.png");
        assert!(resource.get("data").is_none());
    }
}
