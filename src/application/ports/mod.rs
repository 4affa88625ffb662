mod artifact_store;
mod file_loader;
mod llm_client;
mod report_renderer;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use report_renderer::{RenderError, ReportRenderer};
