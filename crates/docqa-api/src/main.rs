use std::sync::Arc;

use anyhow::Context;
use docqa_core::config::AppConfig;
use docqa_llm::{Embedder, Generator, HuggingFaceEmbedder, HuggingFaceGenerator};
use docqa_store::{ChunkStore, DocumentStore, MemoryChunkStore, MemoryDocumentStore};
use docqa_store::{PostgresConfig, PostgresStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docqa_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docqa_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing::info!(
        port = config.server.port,
        embedding_model = %config.embedding.model,
        generation_model = %config.generation.model,
        max_words = config.chunking.max_words,
        top_k = config.retrieval.top_k,
        "Starting DocQA API server"
    );

    if config.api_token.is_none() {
        tracing::warn!("HUGGING_FACE_TOKEN is not set; embedding and generation calls will fail");
    }

    let (document_store, chunk_store): (Arc<dyn DocumentStore>, Arc<dyn ChunkStore>) =
        match &config.database_url {
            Some(database_url) => {
                tracing::info!("DATABASE_URL found, connecting to PostgreSQL...");
                let store = init_postgres_storage(database_url).await.context(
                    "Failed to connect to PostgreSQL. Ensure it is running and DATABASE_URL is correct",
                )?;
                (store.clone(), store)
            }
            None => {
                tracing::info!("Using in-memory storage (set DATABASE_URL for PostgreSQL)");
                (Arc::new(MemoryDocumentStore::new()), Arc::new(MemoryChunkStore::new()))
            }
        };

    let embedder: Arc<dyn Embedder> =
        Arc::new(HuggingFaceEmbedder::from_config(&config.embedding, config.api_token.clone()));
    let generator: Arc<dyn Generator> =
        Arc::new(HuggingFaceGenerator::from_config(&config.generation, config.api_token.clone()));

    let addr = config.bind_address();
    let cors_origin = config.server.cors_origin.clone();

    let state = Arc::new(AppState::new(config, document_store, chunk_store, embedder, generator)?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Initialize PostgreSQL storage from a database URL
async fn init_postgres_storage(database_url: &str) -> anyhow::Result<Arc<PostgresStore>> {
    let config = PostgresConfig::from_database_url(database_url).context("Invalid DATABASE_URL")?;
    let store = PostgresStore::with_migrations(config).await?;
    Ok(Arc::new(store))
}
