mod chunk;
mod conversation;
mod embedding;
mod pathway;
mod retrieval;
mod snapshot;

pub use chunk::{chunk_text, clean_text, Chunk};
pub use conversation::{ChatMessage, ChatQuery, MessageRole};
pub use embedding::{cosine_similarity, Embedding};
pub use pathway::{ChatAnswer, Pathway, DEFAULT_SIMILARITY_THRESHOLD, KB_CITATION, KB_REFUSAL};
pub use retrieval::{build_context, RetrievalResult};
pub use snapshot::{EmbeddingRecord, IndexSnapshot, SnapshotMetadata};
