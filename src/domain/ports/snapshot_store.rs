use crate::domain::{errors::DomainError, IndexSnapshot};
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads and validates the persisted snapshot.
    async fn load(&self) -> Result<IndexSnapshot, DomainError>;
    /// Replaces the persisted snapshot in one step.
    async fn save(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError>;
}
