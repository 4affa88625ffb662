use std::sync::Arc;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, FileLoader, FileLoaderError, LlmClient, LlmClientError,
    RenderError, ReportRenderer,
};
use crate::application::services::prompt::{self, SYSTEM_PROMPT};
use crate::domain::{Artifact, ContentType, Document, ReportFormat};

/// One file as received from the multipart request: declared name, declared
/// content type, raw bytes. Owned by a single request and dropped afterwards.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub declared_mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Successful pipeline run for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub document: Document,
    pub artifacts: Vec<Artifact>,
}

/// Per-file result in a batch. Failures carry the stage that broke; they
/// never abort sibling files.
#[derive(Debug)]
pub struct FileOutcome {
    pub filename: String,
    pub result: Result<FileReport, AnalysisError>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("{0}")]
    Extraction(#[from] FileLoaderError),
    #[error("{0}")]
    Summarization(#[from] LlmClientError),
    #[error("model returned an empty report")]
    EmptySummary,
    #[error("{0}")]
    Rendering(#[from] RenderError),
    #[error("{0}")]
    Write(#[from] ArtifactStoreError),
}

/// Drives the linear pipeline for each uploaded file:
/// extract text, build the prompt, call the model, render and store the
/// TXT and PDF artifacts.
pub struct AnalysisService<F, L, R, S>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
    R: ReportRenderer + ?Sized,
    S: ArtifactStore + ?Sized,
{
    file_loader: Arc<F>,
    llm_client: Arc<L>,
    renderer: Arc<R>,
    artifact_store: Arc<S>,
}

/// Replies shorter than this (trimmed) are treated as a model failure
/// rather than surfaced as a report.
const MIN_REPORT_CHARS: usize = 30;

impl<F, L, R, S> AnalysisService<F, L, R, S>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
    R: ReportRenderer + ?Sized,
    S: ArtifactStore + ?Sized,
{
    pub fn new(
        file_loader: Arc<F>,
        llm_client: Arc<L>,
        renderer: Arc<R>,
        artifact_store: Arc<S>,
    ) -> Self {
        Self {
            file_loader,
            llm_client,
            renderer,
            artifact_store,
        }
    }

    /// Process a batch in submitted order. Outcomes are returned in the same
    /// order, one per uploaded file.
    pub async fn analyze_batch(&self, files: Vec<UploadedFile>) -> Vec<FileOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            let filename = file.filename.clone();
            let result = self.analyze_file(file).await;

            if let Err(e) = &result {
                tracing::warn!(filename = %filename, error = %e, "File analysis failed");
            }

            outcomes.push(FileOutcome { filename, result });
        }

        outcomes
    }

    #[tracing::instrument(skip(self, file), fields(filename = %file.filename))]
    async fn analyze_file(&self, file: UploadedFile) -> Result<FileReport, AnalysisError> {
        let content_type = ContentType::sniff(file.declared_mime.as_deref(), &file.filename)
            .ok_or_else(|| {
                AnalysisError::UnsupportedFormat(
                    file.declared_mime
                        .clone()
                        .unwrap_or_else(|| file.filename.clone()),
                )
            })?;

        let document = Document::new(file.filename.clone(), content_type, file.bytes.len() as u64);

        let extracted = self
            .file_loader
            .extract_text(&file.bytes, &document)
            .await?;
        tracing::debug!(chars = extracted.chars().count(), "Text extracted");

        let prompt = prompt::build_prompt(&extracted);

        let report = self.llm_client.complete(SYSTEM_PROMPT, &prompt).await?;
        if report.trim().chars().count() < MIN_REPORT_CHARS {
            return Err(AnalysisError::EmptySummary);
        }

        let stem = document.stem();
        let mut artifacts = Vec::with_capacity(2);

        for format in [ReportFormat::Txt, ReportFormat::Pdf] {
            let bytes = self.renderer.render(&report, format)?;
            let artifact = Artifact::for_stem(&stem, format);
            self.artifact_store.save(&artifact.filename, bytes).await?;
            artifacts.push(artifact);
        }

        tracing::info!(
            document_id = %document.id.as_uuid(),
            artifact_count = artifacts.len(),
            "Case report rendered"
        );

        Ok(FileReport {
            document,
            artifacts,
        })
    }
}
