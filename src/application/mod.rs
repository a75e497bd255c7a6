//! Application layer - Use cases and orchestration.
//!
//! Services depend on domain ports (traits) rather than concrete
//! implementations, so every external model can be swapped for a test double.

pub mod services;

pub use services::{ChatService, IngestOptions, IngestService, RagService};
