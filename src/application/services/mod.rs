mod chat;
mod ingest;
mod rag;

pub use chat::{canonicalize_refusal, ChatService};
pub use ingest::{IngestOptions, IngestService};
pub use rag::RagService;
