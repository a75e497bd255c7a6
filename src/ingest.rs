use anyhow::Context;
use docs_assistant::application::{IngestOptions, IngestService};
use docs_assistant::infrastructure::{AppConfig, JsonFileSnapshotStore, TextEmbedding};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Rebuilds the index snapshot from the configured source document.
///
/// Usage: `ingest [SOURCE] [SNAPSHOT]`; both default to the configured paths.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ingest=info,docs_assistant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let ingest = &config.config.ingest;

    let mut args = std::env::args().skip(1);
    let source_path = args.next().map(Into::into).unwrap_or_else(|| ingest.source_path.clone());
    let snapshot_path = args
        .next()
        .map(Into::into)
        .unwrap_or_else(|| ingest.snapshot_path.clone());

    info!(path = %source_path.display(), "reading source document");
    let content = tokio::fs::read_to_string(&source_path)
        .await
        .with_context(|| format!("failed to read {}", source_path.display()))?;

    let embedding = Arc::new(TextEmbedding::from_config(&config.config.embedding));
    let store = Arc::new(JsonFileSnapshotStore::new(&snapshot_path));
    let options = IngestOptions {
        chunk_size: ingest.chunk_size,
        chunk_overlap: ingest.chunk_overlap,
        clean_markdown: ingest.clean_markdown,
    };

    let snapshot = IngestService::with_options(embedding, store, options)
        .ingest(&content)
        .await
        .context("ingestion failed")?;

    info!(
        path = %snapshot_path.display(),
        total_chunks = snapshot.len(),
        model = %snapshot.metadata.model,
        "ingestion complete"
    );

    Ok(())
}
