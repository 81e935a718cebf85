use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use mediscan::application::ports::{LlmClient, SessionRepository, TextSplitter};
use mediscan::application::services::{AssistantService, DocumentProcessor, PromptBuilder};
use mediscan::infrastructure::llm::{CachedLlmClient, OpenAiClient};
use mediscan::infrastructure::observability::{TracingConfig, init_tracing};
use mediscan::infrastructure::persistence::InMemorySessionRepository;
use mediscan::infrastructure::text_processing::{FixedWindowSplitter, PdfAdapter};
use mediscan::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // No API key means no service: fail before binding anything.
    let settings = Settings::from_env()?;

    init_tracing(&TracingConfig {
        environment: Environment::from_env()
            .map(|e| e.to_string())
            .unwrap_or_else(|_| "local".to_string()),
        json_format: settings.logging.json,
        default_filter: format!(
            "{},mediscan=debug,tower_http=debug",
            settings.logging.level
        ),
    });

    let openai = OpenAiClient::new(settings.llm.api_key.clone(), settings.llm.model.clone())
        .with_base_url(settings.llm.base_url.clone())
        .with_sampling(settings.sampling())
        .with_timeout(settings.llm.timeout())?;

    let llm_client: Arc<dyn LlmClient> = if settings.cache.enabled {
        Arc::new(CachedLlmClient::new(
            Arc::new(openai),
            Duration::from_secs(settings.cache.ttl_secs),
        ))
    } else {
        Arc::new(openai)
    };

    let parameters = settings.prompts.parameters();
    let splitter = FixedWindowSplitter::new(parameters.summary.budget_chars);
    let summary_window = splitter.window_chars();
    let text_splitter: Arc<dyn TextSplitter> = Arc::new(splitter);
    let processor = Arc::new(DocumentProcessor::new(
        PromptBuilder::new(parameters, text_splitter),
        llm_client,
        settings.summary.max_concurrency,
    ));

    let file_loader = Arc::new(
        PdfAdapter::new()
            .with_timeout(Duration::from_secs(settings.extraction.timeout_secs))
            .with_max_file_size_bytes(settings.extraction.max_file_size_bytes())
            .with_normalized_text(settings.extraction.normalize_text),
    );
    let sessions: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());

    let assistant_service = Arc::new(AssistantService::new(file_loader, processor, sessions));

    spawn_idle_sweep(
        Arc::clone(&assistant_service),
        settings.session.sweep_interval(),
        settings.session.idle_ttl()?,
    );

    let state = AppState {
        assistant_service,
        max_upload_bytes: settings.extraction.max_file_size_bytes(),
    };
    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!(
        model = %settings.llm.model,
        preset = ?settings.prompts.preset,
        cache = settings.cache.enabled,
        summary_window,
        "Listening on {}",
        addr
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn spawn_idle_sweep(
    service: Arc<AssistantService<PdfAdapter>>,
    every: Duration,
    idle_for: chrono::Duration,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick fires immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            service.evict_idle_sessions(idle_for).await;
        }
    });
}
