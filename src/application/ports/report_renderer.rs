use crate::domain::ReportFormat;

/// Turns the model's report text into the bytes of an output artifact.
/// Rendering is pure: the text is laid out as received, never restructured.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &str, format: ReportFormat) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
}
