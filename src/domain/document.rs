use std::path::Path;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata for a single uploaded file. The raw bytes travel alongside and
/// are discarded once the file has been processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Docx,
    Text,
}

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            m if m.starts_with("text/plain") => Some(Self::Text),
            _ => None,
        }
    }

    /// Browsers often upload with `application/octet-stream`, so the filename
    /// extension is the fallback signal.
    pub fn from_extension(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn sniff(mime: Option<&str>, filename: &str) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| Self::from_extension(filename))
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => DOCX_MIME,
            Self::Text => "text/plain",
        }
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes,
        }
    }

    /// Filename stem used to derive output artifact names. Any path
    /// components smuggled into the upload name are stripped first.
    pub fn stem(&self) -> String {
        let name = Path::new(&self.filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("uploaded");

        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_prefers_declared_mime() {
        let ct = ContentType::sniff(Some("application/pdf"), "notes.txt");
        assert_eq!(ct, Some(ContentType::Pdf));
    }

    #[test]
    fn sniff_falls_back_to_extension_for_octet_stream() {
        let ct = ContentType::sniff(Some("application/octet-stream"), "case1.docx");
        assert_eq!(ct, Some(ContentType::Docx));
    }

    #[test]
    fn sniff_rejects_unknown_type() {
        assert_eq!(ContentType::sniff(Some("image/png"), "scan.png"), None);
    }

    #[test]
    fn stem_drops_extension_and_path_components() {
        let doc = Document::new("../evil/case1.pdf".to_string(), ContentType::Pdf, 10);
        assert_eq!(doc.stem(), "case1");
    }

    #[test]
    fn stem_without_extension_is_whole_name() {
        let doc = Document::new("judgment".to_string(), ContentType::Text, 10);
        assert_eq!(doc.stem(), "judgment");
    }
}
