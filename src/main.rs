use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use nyaya::application::services::{IngestionService, LegalAssistant, RetrievalService};
use nyaya::infrastructure::llm::{ChatCompletionClient, EmbedderFactory};
use nyaya::infrastructure::observability::{TracingConfig, init_tracing};
use nyaya::infrastructure::persistence::VectorStoreFactory;
use nyaya::infrastructure::text_processing::{PdfAdapter, RecursiveCharacterSplitter};
use nyaya::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(environment, &settings.logging));

    let api_key = settings
        .llm
        .resolve_api_key()
        .context("LLM API key is required")?;
    let llm_client = Arc::new(
        ChatCompletionClient::from_settings(&settings.llm, api_key)
            .context("Invalid LLM configuration")?,
    );

    let embedder =
        EmbedderFactory::create(&settings.embeddings).context("Failed to create embedder")?;
    let stores = VectorStoreFactory::create(&settings.vector_store)
        .context("Failed to create vector store")?;
    let text_splitter = Arc::new(
        RecursiveCharacterSplitter::new(
            settings.chunking.chunk_size,
            settings.chunking.chunk_overlap,
        )
        .context("Invalid chunking configuration")?,
    );

    let ingestion_service = Arc::new(IngestionService::new(
        Arc::new(PdfAdapter::new()),
        Arc::clone(&embedder),
        text_splitter,
        settings.embeddings.dimension,
    ));
    let retrieval_service = Arc::new(RetrievalService::new(
        embedder,
        llm_client,
        settings.retrieval.top_k,
        settings.retrieval.max_history_tokens,
    ));

    let assistant = Arc::new(LegalAssistant::new(
        ingestion_service,
        retrieval_service,
        stores.ipc,
        stores.custom,
        settings.documents.ipc_path.clone(),
    ));

    if let Err(e) = assistant.initialize_ipc().await {
        tracing::error!(error = %e, "Error initializing IPC document; IPC mode unavailable");
    }

    let state = AppState::new(assistant, settings.server.max_upload_bytes());
    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
