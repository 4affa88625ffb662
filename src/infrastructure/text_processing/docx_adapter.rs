//! OOXML `.docx` extraction: unzip the archive, stream `word/document.xml`
//! with `quick-xml`, and collect the text runs. Paragraphs are joined with
//! newlines; formatting, tables and hyperlink targets are ignored.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>, FileLoaderError> {
        let cursor = Cursor::new(data);
        let mut archive = ZipArchive::new(cursor)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("not a docx archive: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("missing word/document.xml: {e}"))
            })?
            .read_to_string(&mut xml)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("unreadable document: {e}")))?;

        let mut reader = Reader::from_str(&xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = true,
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text_run => {
                    if let Ok(s) = t.unescape() {
                        current.push_str(&s);
                    }
                }
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"tab" => current.push('\t'),
                    b"br" => current.push('\n'),
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FileLoaderError::ExtractionFailed(format!(
                        "malformed document xml: {e}"
                    )));
                }
                _ => {}
            }
        }

        if !current.is_empty() {
            paragraphs.push(current);
        }

        Ok(paragraphs)
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let paragraphs = Self::extract_paragraphs(data)?;
        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOCX text extraction complete"
        );

        Ok(paragraphs.join("\n"))
    }
}
