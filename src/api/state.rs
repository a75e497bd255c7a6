use std::sync::Arc;

use crate::application::{ChatService, RagService};
use crate::domain::SnapshotMetadata;
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub rag_service: Arc<RagService>,
    pub snapshot: Arc<SnapshotMetadata>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        chat_service: Arc<ChatService>,
        rag_service: Arc<RagService>,
        snapshot: SnapshotMetadata,
        config: AppConfig,
    ) -> Self {
        Self {
            chat_service,
            rag_service,
            snapshot: Arc::new(snapshot),
            config: Arc::new(config),
        }
    }
}
