mod analysis_service;
pub mod prompt;

pub use analysis_service::{AnalysisError, AnalysisService, FileOutcome, FileReport, UploadedFile};
