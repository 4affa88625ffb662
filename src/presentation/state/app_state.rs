use std::sync::Arc;

use crate::application::ports::{ArtifactStore, FileLoader, LlmClient, ReportRenderer};
use crate::application::services::AnalysisService;
use crate::presentation::config::Settings;

pub struct AppState<F, L, R, S>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
    R: ReportRenderer + ?Sized,
    S: ArtifactStore + ?Sized,
{
    pub analysis_service: Arc<AnalysisService<F, L, R, S>>,
    pub artifact_store: Arc<S>,
    pub settings: Settings,
}

impl<F, L, R, S> Clone for AppState<F, L, R, S>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
    R: ReportRenderer + ?Sized,
    S: ArtifactStore + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            artifact_store: Arc::clone(&self.artifact_store),
            settings: self.settings.clone(),
        }
    }
}
