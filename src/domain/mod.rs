mod artifact;
mod document;

pub use artifact::{Artifact, ReportFormat};
pub use document::{ContentType, Document, DocumentId};
