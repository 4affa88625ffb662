use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Dispatches extraction to the adapter registered for the document's
/// content type. Types without an adapter are rejected as unsupported.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// The standard PDF + DOCX + plain-text lineup.
    pub fn with_default_adapters() -> Self {
        use super::{DocxAdapter, PdfAdapter, PlainTextAdapter};

        Self::new(vec![
            (ContentType::Pdf, Arc::new(PdfAdapter::new()) as _),
            (ContentType::Docx, Arc::new(DocxAdapter::new()) as _),
            (ContentType::Text, Arc::new(PlainTextAdapter::new()) as _),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}
