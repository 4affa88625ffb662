use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment as EnvironmentSource, File};
use tokio::net::TcpListener;

use casebrief::application::services::AnalysisService;
use casebrief::infrastructure::llm::OllamaClient;
use casebrief::infrastructure::observability::{init_tracing, TracingConfig};
use casebrief::infrastructure::rendering::CaseReportRenderer;
use casebrief::infrastructure::storage::LocalArtifactStore;
use casebrief::infrastructure::text_processing::CompositeFileLoader;
use casebrief::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let configuration = Config::builder()
        .add_source(File::with_name(&format!("appsettings.{}", environment)).required(false))
        .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
        .build()
        .context("failed to build configuration")?;

    let settings: Settings = configuration
        .try_deserialize()
        .context("failed to deserialize settings")?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
            default_directives: format!(
                "{},casebrief=debug,tower_http=debug",
                settings.logging.level
            ),
        },
        settings.server.port,
    );

    let file_loader = Arc::new(CompositeFileLoader::with_default_adapters());
    let llm_client = Arc::new(OllamaClient::new(
        &settings.ollama.base_url,
        &settings.ollama.model,
        Duration::from_secs(settings.ollama.timeout_secs),
    ));
    let renderer = Arc::new(CaseReportRenderer::new());
    let artifact_store = Arc::new(
        LocalArtifactStore::new(PathBuf::from(&settings.output.dir))
            .context("failed to open output directory")?,
    );

    let analysis_service = Arc::new(AnalysisService::new(
        Arc::clone(&file_loader),
        Arc::clone(&llm_client),
        Arc::clone(&renderer),
        Arc::clone(&artifact_store),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        analysis_service,
        artifact_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
