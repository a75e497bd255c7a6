mod embedding;
mod llm;
mod snapshot_store;
mod vector_index;

pub use embedding::EmbeddingService;
pub use llm::{GenerationRequest, LlmService};
pub use snapshot_store::SnapshotStore;
pub use vector_index::VectorIndex;
