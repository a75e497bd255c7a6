use anyhow::Context;
use docs_assistant::api::{create_router, AppState};
use docs_assistant::application::{ChatService, RagService};
use docs_assistant::domain::ports::SnapshotStore;
use docs_assistant::infrastructure::{
    llm, AppConfig, InMemoryIndex, JsonFileSnapshotStore, TextEmbedding,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,docs_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let store = JsonFileSnapshotStore::new(&config.config.ingest.snapshot_path);
    let snapshot = store.load().await.with_context(|| {
        format!(
            "failed to load snapshot from {}; run the `ingest` binary first",
            store.path().display()
        )
    })?;
    info!(
        model = %snapshot.metadata.model,
        total_chunks = snapshot.len(),
        created_at = %snapshot.metadata.created_at,
        "snapshot loaded"
    );

    config
        .config
        .embedding
        .check_snapshot(&snapshot)
        .context("snapshot does not match the configured embedding model; re-run `ingest`")?;

    let metadata = snapshot.metadata.clone();
    let index = Arc::new(InMemoryIndex::from_snapshot(snapshot)?);
    let embedding = Arc::new(TextEmbedding::from_config(&config.config.embedding));
    let rag = Arc::new(RagService::new(embedding, index, config.config.rag.top_k));

    let generator = llm::from_config(&config.config.llm);
    let chat = Arc::new(
        ChatService::new(rag.clone(), generator, config.prompts.clone())
            .with_threshold(config.config.rag.threshold),
    );

    let addr = SocketAddr::new(
        config.config.server.host.parse()?,
        config.config.server.port,
    );

    let state = AppState::new(chat, rag, metadata, config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
