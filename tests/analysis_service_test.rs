use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use casebrief::application::ports::{
    ArtifactStore, ArtifactStoreError, FileLoader, FileLoaderError, LlmClient, LlmClientError,
};
use casebrief::application::services::{AnalysisError, AnalysisService, UploadedFile};
use casebrief::domain::Document;
use casebrief::infrastructure::rendering::CaseReportRenderer;

const MOCK_REPORT: &str = "1. 25 Word Summary of the Case including Category of Law\n\
    Tenant sues landlord for breach of habitability obligations, category: housing law.";

struct EchoFileLoader;

#[async_trait::async_trait]
impl FileLoader for EchoFileLoader {
    async fn extract_text(&self, data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

/// Records every prompt it receives, then replies with a fixed report.
#[derive(Default)]
struct RecordingLlmClient {
    prompts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(MOCK_REPORT.to_string())
    }
}

struct ShortReplyLlmClient;

#[async_trait::async_trait]
impl LlmClient for ShortReplyLlmClient {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmClientError> {
        Ok("   N/A   ".to_string())
    }
}

struct DownLlmClient;

#[async_trait::async_trait]
impl LlmClient for DownLlmClient {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::ServiceUnavailable(
            "connection refused".to_string(),
        ))
    }
}

#[derive(Default)]
struct InMemoryArtifactStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait::async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<(), ArtifactStoreError> {
        self.files
            .lock()
            .unwrap()
            .insert(filename.to_string(), bytes);
        Ok(())
    }

    async fn load(&self, filename: &str) -> Result<Vec<u8>, ArtifactStoreError> {
        self.files
            .lock()
            .unwrap()
            .get(filename)
            .cloned()
            .ok_or_else(|| ArtifactStoreError::NotFound(filename.to_string()))
    }
}

fn upload(filename: &str, mime: &str, bytes: &[u8]) -> UploadedFile {
    UploadedFile {
        filename: filename.to_string(),
        declared_mime: Some(mime.to_string()),
        bytes: bytes.to_vec(),
    }
}

fn service_with<L: LlmClient + 'static>(
    llm_client: L,
) -> (
    AnalysisService<EchoFileLoader, L, CaseReportRenderer, InMemoryArtifactStore>,
    Arc<InMemoryArtifactStore>,
) {
    let store = Arc::new(InMemoryArtifactStore::default());
    let service = AnalysisService::new(
        Arc::new(EchoFileLoader),
        Arc::new(llm_client),
        Arc::new(CaseReportRenderer::new()),
        Arc::clone(&store),
    );
    (service, store)
}

#[tokio::test]
async fn given_supported_file_when_analyzing_then_produces_txt_and_pdf_artifacts() {
    let (service, store) = service_with(RecordingLlmClient::default());

    let outcomes = service
        .analyze_batch(vec![upload("case1.txt", "text/plain", b"Plaintiff vs Defendant")])
        .await;

    let report = outcomes[0].result.as_ref().unwrap();
    let names: Vec<&str> = report
        .artifacts
        .iter()
        .map(|a| a.filename.as_str())
        .collect();
    assert_eq!(names, vec!["case1.txt", "case1.pdf"]);

    let files = store.files.lock().unwrap();
    assert_eq!(files.get("case1.txt").unwrap(), MOCK_REPORT.as_bytes());
    assert!(files.get("case1.pdf").unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn given_batch_with_unsupported_file_when_analyzing_then_only_that_file_fails() {
    let (service, _) = service_with(RecordingLlmClient::default());

    let outcomes = service
        .analyze_batch(vec![
            upload("a.txt", "text/plain", b"first"),
            upload("scan.png", "image/png", b"not a document"),
            upload("b.txt", "text/plain", b"third"),
        ])
        .await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].filename, "a.txt");
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(AnalysisError::UnsupportedFormat(_))
    ));
    assert_eq!(outcomes[2].filename, "b.txt");
    assert!(outcomes[2].result.is_ok());
}

#[tokio::test]
async fn given_unreachable_model_when_analyzing_then_no_artifacts_are_written() {
    let (service, store) = service_with(DownLlmClient);

    let outcomes = service
        .analyze_batch(vec![upload("case1.txt", "text/plain", b"case text")])
        .await;

    assert!(matches!(
        outcomes[0].result,
        Err(AnalysisError::Summarization(
            LlmClientError::ServiceUnavailable(_)
        ))
    ));
    assert!(store.files.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_trivially_short_model_reply_when_analyzing_then_treated_as_failure() {
    let (service, store) = service_with(ShortReplyLlmClient);

    let outcomes = service
        .analyze_batch(vec![upload("case1.txt", "text/plain", b"case text")])
        .await;

    assert!(matches!(
        outcomes[0].result,
        Err(AnalysisError::EmptySummary)
    ));
    assert!(store.files.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_extracted_text_when_analyzing_then_prompt_embeds_it() {
    let llm = Arc::new(RecordingLlmClient::default());
    let store = Arc::new(InMemoryArtifactStore::default());
    let service = AnalysisService::new(
        Arc::new(EchoFileLoader),
        Arc::clone(&llm),
        Arc::new(CaseReportRenderer::new()),
        Arc::clone(&store),
    );

    service
        .analyze_batch(vec![upload(
            "case1.txt",
            "text/plain",
            b"Plaintiff vs Defendant, breach of contract",
        )])
        .await;

    let prompts = llm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Plaintiff vs Defendant, breach of contract"));
    assert!(prompts[0].contains("MANDATORY OUTPUT FORMAT"));
}

#[tokio::test]
async fn given_same_filename_twice_when_analyzing_then_artifact_is_overwritten() {
    let (service, store) = service_with(RecordingLlmClient::default());

    service
        .analyze_batch(vec![upload("case1.txt", "text/plain", b"first version")])
        .await;
    service
        .analyze_batch(vec![upload("case1.txt", "text/plain", b"second version")])
        .await;

    let files = store.files.lock().unwrap();
    // One TXT and one PDF, regardless of how many times the name was used.
    assert_eq!(files.len(), 2);
}
