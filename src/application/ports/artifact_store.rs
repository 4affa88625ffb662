use async_trait::async_trait;

/// Persists rendered report files in the output directory and serves them
/// back for download. Saving to an existing filename overwrites it.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<(), ArtifactStoreError>;

    async fn load(&self, filename: &str) -> Result<Vec<u8>, ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
}
